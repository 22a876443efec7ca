//! Cron loop binding a [`TriggerSpec`] to [`handle_timer`].
//!
//! Purpose
//! -------
//! Sleep until each fire time of the trigger's schedule, invoke the handler
//! synchronously, and repeat until the shutdown future resolves.
//!
//! Key behaviors
//! -------------
//! - Triggers with `run_on_startup` fire once immediately, not past due.
//! - When an invocation overruns one or more fire times, they are collapsed
//!   into a single past-due firing for the latest missed occurrence.
//! - A failed invocation is logged at ERROR; the loop keeps scheduling.
//!
//! Invariants & assumptions
//! ------------------------
//! - Schedules are evaluated in UTC.
//! - Shutdown is only observed while waiting; a running invocation always
//!   completes.
use std::{future::Future, time::Duration};

use chrono::{DateTime, TimeDelta, Utc};
use cron::Schedule;
use tracing::{debug, error, info};

use crate::{
    optimization::minimizer::MinimizeOutcome,
    trigger::{
        errors::TriggerResult,
        handler::{TimerInfo, handle_timer},
        spec::TriggerSpec,
    },
};

/// Lateness tolerated before a firing counts as past due.
pub const PAST_DUE_GRACE: TimeDelta = TimeDelta::seconds(1);

/// First fire time of `schedule` strictly after `after`.
pub fn next_fire(schedule: &Schedule, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
    schedule.after(&after).next()
}

/// Whether a firing at `fired_at` for `scheduled_for` is later than `grace`.
pub fn is_past_due(
    scheduled_for: DateTime<Utc>, fired_at: DateTime<Utc>, grace: TimeDelta,
) -> bool {
    fired_at - scheduled_for > grace
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    spec: TriggerSpec,
    schedule: Schedule,
    grace: TimeDelta,
}

impl Scheduler {
    /// # Errors
    /// [`TriggerError::InvalidSchedule`](crate::trigger::TriggerError::InvalidSchedule)
    /// when the spec's cron expression does not parse.
    pub fn new(spec: TriggerSpec) -> TriggerResult<Self> {
        let schedule = spec.parse_schedule()?;
        Ok(Self { spec, schedule, grace: PAST_DUE_GRACE })
    }

    pub fn with_grace(mut self, grace: TimeDelta) -> Self {
        self.grace = grace;
        self
    }

    pub fn spec(&self) -> &TriggerSpec {
        &self.spec
    }

    /// Occurrence to fire next, given the last one handled and the current
    /// time. Missed occurrences collapse onto the latest one not after `now`.
    pub fn plan(&self, last: DateTime<Utc>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let next = next_fire(&self.schedule, last)?;
        if next >= now {
            return Some(next);
        }
        self.schedule.after(&last).take_while(|t| *t <= now).last().or(Some(next))
    }

    /// One immediate, on-time invocation.
    ///
    /// # Errors
    /// Whatever [`handle_timer`] returns.
    pub fn run_once(&self) -> TriggerResult<MinimizeOutcome> {
        handle_timer(&self.spec, &TimerInfo::on_time(Utc::now()))
    }

    /// Run the schedule until `shutdown` resolves or the schedule has no
    /// further fire times.
    pub async fn run_until<S>(&self, shutdown: S)
    where
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!(trigger = self.spec.name, schedule = self.spec.schedule, "scheduler started");
        if self.spec.run_on_startup {
            self.invoke(&TimerInfo::on_time(Utc::now()));
        }

        let mut last = Utc::now();
        loop {
            let now = Utc::now();
            let Some(target) = self.plan(last, now) else {
                info!(trigger = self.spec.name, "schedule has no further fire times");
                return;
            };
            let wait = (target - now).to_std().unwrap_or(Duration::ZERO);
            debug!(next = %target, wait_secs = wait.as_secs_f64(), "waiting for next fire time");

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!(trigger = self.spec.name, "scheduler stopped");
                    return;
                }
                _ = tokio::time::sleep(wait) => {}
            }

            self.invoke(&TimerInfo::observe(target, Utc::now(), self.grace));
            last = target;
        }
    }

    fn invoke(&self, timer: &TimerInfo) {
        if let Err(err) = handle_timer(&self.spec, timer) {
            error!(trigger = self.spec.name, error = %err, "trigger invocation failed");
        }
    }
}
