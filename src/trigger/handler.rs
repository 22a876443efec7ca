//! Handler invoked on every trigger firing.
//!
//! Purpose
//! -------
//! Wrap one minimization run in the log lines an operator watches for:
//! an optional past-due notice, the variant's start message, the result and
//! the finish message.
//!
//! Key behaviors
//! -------------
//! - Past-due firings are reported at the level chosen by the trigger's
//!   [`PastDueLevel`].
//! - Non-convergence is logged as a warning after the result; it is not an
//!   error.
//! - A failing run is returned as [`TriggerError::Optimization`] and the
//!   finish message is skipped.
use chrono::{DateTime, TimeDelta, Utc};
use tracing::{info, instrument, warn};

use crate::{
    job::run_minimization,
    optimization::{errors::OptResult, minimizer::MinimizeOutcome},
    trigger::{
        errors::TriggerResult,
        scheduler::is_past_due,
        spec::{FINISH_MESSAGE, PAST_DUE_MESSAGE, PastDueLevel, TriggerSpec},
    },
};

/// Timing facts about one firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerInfo {
    pub past_due: bool,
    pub scheduled_for: DateTime<Utc>,
    pub fired_at: DateTime<Utc>,
}

impl TimerInfo {
    /// A firing exactly at its scheduled time.
    pub fn on_time(at: DateTime<Utc>) -> Self {
        Self { past_due: false, scheduled_for: at, fired_at: at }
    }

    /// A firing at `fired_at` for the occurrence `scheduled_for`; past due
    /// when it is later than `grace`.
    pub fn observe(
        scheduled_for: DateTime<Utc>, fired_at: DateTime<Utc>, grace: TimeDelta,
    ) -> Self {
        Self { past_due: is_past_due(scheduled_for, fired_at, grace), scheduled_for, fired_at }
    }
}

/// Run the scheduled minimization for one firing of `spec`.
///
/// # Errors
/// [`TriggerError::Optimization`](crate::trigger::TriggerError::Optimization)
/// when the minimizer fails.
pub fn handle_timer(spec: &TriggerSpec, timer: &TimerInfo) -> TriggerResult<MinimizeOutcome> {
    handle_timer_with(spec, timer, run_minimization)
}

/// [`handle_timer`] with the run supplied by the caller.
#[instrument(
    name = "handle_timer",
    skip_all,
    fields(trigger = spec.name, scheduled_for = %timer.scheduled_for)
)]
pub fn handle_timer_with<R>(
    spec: &TriggerSpec, timer: &TimerInfo, run: R,
) -> TriggerResult<MinimizeOutcome>
where
    R: FnOnce() -> OptResult<MinimizeOutcome>,
{
    if timer.past_due {
        match spec.past_due_level {
            PastDueLevel::Info => info!("{PAST_DUE_MESSAGE}"),
            PastDueLevel::Warning => warn!("{PAST_DUE_MESSAGE}"),
        }
    }
    info!("{}", spec.start_message);

    let outcome = run()?;
    info!("Results: {outcome}");
    if !outcome.converged {
        warn!(status = %outcome.status, "minimizer did not converge");
    }

    info!("{FINISH_MESSAGE}");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        logging::{CaptureWriter, LogLevel, LoggingContext},
        optimization::errors::OptError,
        trigger::{errors::TriggerError, spec::TriggerKind},
    };
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, h, m, s).single().expect("valid timestamp")
    }

    fn late_timer() -> TimerInfo {
        TimerInfo::observe(at(0, 0, 0), at(0, 0, 30), TimeDelta::seconds(1))
    }

    fn run_with_capture(
        kind: TriggerKind, timer: &TimerInfo,
    ) -> (TriggerResult<MinimizeOutcome>, Vec<String>) {
        let capture = CaptureWriter::new();
        let ctx = LoggingContext::with_writer(LogLevel::Trace, capture.clone());
        let res = ctx.scoped(|| handle_timer(&kind.spec(), timer));
        (res, capture.lines())
    }

    #[test]
    fn observe_marks_late_firings() {
        assert!(late_timer().past_due);
        assert!(!TimerInfo::observe(at(0, 0, 0), at(0, 0, 0), TimeDelta::seconds(1)).past_due);
        assert!(!TimerInfo::on_time(at(1, 2, 3)).past_due);
    }

    #[test]
    // Purpose
    // -------
    // Verify the full log sequence of an on-time weekly firing.
    //
    // Given
    // -----
    // - The weekly spec, an on-time timer, a TRACE capture sink.
    //
    // Expect
    // ------
    // - No past-due line; start, `Results:` and finish lines in that order,
    //   all tagged with the `handle_timer` span; a converged outcome.
    fn on_time_firing_logs_start_result_and_finish() {
        // Act
        let (res, lines) = run_with_capture(TriggerKind::Weekly, &TimerInfo::on_time(at(0, 0, 0)));

        // Assert
        let outcome = res.expect("scheduled run should succeed");
        assert!(outcome.converged);
        assert!(lines.iter().all(|l| !l.contains(PAST_DUE_MESSAGE)), "{lines:?}");
        let pos = |needle: &str| {
            lines
                .iter()
                .position(|l| l.contains(needle))
                .unwrap_or_else(|| panic!("missing {needle}: {lines:?}"))
        };
        let start = pos(" - Timer trigger function started.");
        let result = pos(" - Results: x=[");
        let finish = pos(" - Timer trigger function finished.");
        assert!(start < result && result < finish);
        assert!(lines[start].contains("scheduled_minimize::trigger::handler:handle_timer:"));
    }

    #[test]
    fn frequent_trigger_reports_past_due_at_info() {
        let (res, lines) = run_with_capture(TriggerKind::Frequent, &late_timer());

        assert!(res.is_ok());
        let line = lines.iter().find(|l| l.contains(PAST_DUE_MESSAGE)).expect("past-due line");
        assert!(line.contains("| INFO     |"), "{line}");
        assert!(lines.iter().any(|l| l.ends_with(" - Timer trigger function executed.")));
    }

    #[test]
    fn weekly_trigger_reports_past_due_at_warning() {
        let (res, lines) = run_with_capture(TriggerKind::Weekly, &late_timer());

        assert!(res.is_ok());
        let line = lines.iter().find(|l| l.contains(PAST_DUE_MESSAGE)).expect("past-due line");
        assert!(line.contains("| WARNING  |"), "{line}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure a failing run propagates and the finish message is not logged.
    //
    // Given
    // -----
    // - A run that fails with `EmptyInitialGuess`.
    //
    // Expect
    // ------
    // - `TriggerError::Optimization(EmptyInitialGuess)`; start line present,
    //   finish line absent.
    fn failing_run_skips_finish_message() {
        // Arrange
        let capture = CaptureWriter::new();
        let ctx = LoggingContext::with_writer(LogLevel::Debug, capture.clone());
        let spec = TriggerSpec::frequent();

        // Act
        let res = ctx.scoped(|| {
            handle_timer_with(&spec, &TimerInfo::on_time(at(0, 0, 5)), || {
                Err(OptError::EmptyInitialGuess)
            })
        });

        // Assert
        assert_eq!(res, Err(TriggerError::Optimization(OptError::EmptyInitialGuess)));
        let text = capture.contents();
        assert!(text.contains(spec.start_message));
        assert!(!text.contains(FINISH_MESSAGE));
    }
}
