//! trigger — cron-bound entry points around the scheduled minimization.
//!
//! Purpose
//! -------
//! Describe each trigger as a plain [`TriggerSpec`] value (schedule, startup
//! behavior, log levels) and keep the logging around one invocation in
//! [`handle_timer`]. Binding a spec to wall-clock time lives in
//! [`scheduler`].
//!
//! Conventions
//! -----------
//! - All schedules are six-field cron expressions evaluated in UTC.
//! - Handlers return the outcome; the scheduler only logs it.
pub mod errors;
pub mod handler;
pub mod scheduler;
pub mod spec;

pub use self::errors::{TriggerError, TriggerResult};
pub use self::handler::{TimerInfo, handle_timer, handle_timer_with};
pub use self::scheduler::{PAST_DUE_GRACE, Scheduler, is_past_due, next_fire};
pub use self::spec::{PastDueLevel, TriggerKind, TriggerSpec};
