//! The two trigger definitions and their cron schedules.
use std::str::FromStr;

use clap::ValueEnum;
use cron::Schedule;

use crate::trigger::errors::{TriggerError, TriggerResult};

/// Selects one of the built-in trigger definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum TriggerKind {
    /// Every five seconds.
    Frequent,
    /// Sundays at midnight UTC, plus once on startup.
    Weekly,
}

impl TriggerKind {
    pub fn spec(self) -> TriggerSpec {
        match self {
            TriggerKind::Frequent => TriggerSpec::frequent(),
            TriggerKind::Weekly => TriggerSpec::weekly(),
        }
    }
}

/// Level at which a past-due firing is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PastDueLevel {
    Info,
    Warning,
}

/// A named schedule plus the per-variant logging choices of its handler.
///
/// `schedule` uses the six-field form `sec min hour day-of-month month
/// day-of-week`, evaluated in UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerSpec {
    pub name: &'static str,
    pub schedule: &'static str,
    pub run_on_startup: bool,
    pub past_due_level: PastDueLevel,
    pub start_message: &'static str,
}

pub const FINISH_MESSAGE: &str = "Timer trigger function finished.";
pub const PAST_DUE_MESSAGE: &str = "The timer is past due!";

impl TriggerSpec {
    pub fn frequent() -> Self {
        Self {
            name: "frequent",
            schedule: "0/5 * * * * *",
            run_on_startup: false,
            past_due_level: PastDueLevel::Info,
            start_message: "Timer trigger function executed.",
        }
    }

    pub fn weekly() -> Self {
        Self {
            name: "weekly",
            schedule: "0 0 0 * * Sun",
            run_on_startup: true,
            past_due_level: PastDueLevel::Warning,
            start_message: "Timer trigger function started.",
        }
    }

    /// Parse [`TriggerSpec::schedule`].
    ///
    /// # Errors
    /// [`TriggerError::InvalidSchedule`] when the expression is malformed.
    pub fn parse_schedule(&self) -> TriggerResult<Schedule> {
        Schedule::from_str(self.schedule)
            .map_err(|e| TriggerError::invalid_schedule(self.schedule, &e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_schedules_parse() {
        for kind in TriggerKind::value_variants() {
            let spec = kind.spec();

            assert!(spec.parse_schedule().is_ok(), "{}: {}", spec.name, spec.schedule);
        }
    }

    #[test]
    // Purpose
    // -------
    // Pin down the per-variant choices the handler and scheduler rely on.
    //
    // Given
    // -----
    // - Both built-in specs.
    //
    // Expect
    // ------
    // - Only the weekly trigger runs on startup and reports past-due at
    //   WARNING; the frequent one reports it at INFO.
    fn variants_differ_in_startup_and_past_due_level() {
        // Arrange
        let frequent = TriggerKind::Frequent.spec();
        let weekly = TriggerKind::Weekly.spec();

        // Assert
        assert!(!frequent.run_on_startup);
        assert_eq!(frequent.past_due_level, PastDueLevel::Info);
        assert_eq!(frequent.start_message, "Timer trigger function executed.");
        assert!(weekly.run_on_startup);
        assert_eq!(weekly.past_due_level, PastDueLevel::Warning);
        assert_eq!(weekly.start_message, "Timer trigger function started.");
    }

    #[test]
    fn malformed_expression_is_reported() {
        let spec = TriggerSpec { schedule: "every tuesday", ..TriggerSpec::weekly() };

        let err = spec.parse_schedule().expect_err("not a cron expression");

        assert!(matches!(
            err,
            TriggerError::InvalidSchedule { ref expr, .. } if expr == "every tuesday"
        ));
    }
}
