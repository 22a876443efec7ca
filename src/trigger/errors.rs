use thiserror::Error;

use crate::optimization::errors::OptError;

/// Result alias for trigger handlers and the scheduler.
pub type TriggerResult<T> = Result<T, TriggerError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TriggerError {
    /// The minimization run inside a handler failed.
    #[error("Minimization failed: {0}")]
    Optimization(#[from] OptError),

    /// A trigger's cron expression could not be parsed.
    #[error("Invalid cron expression '{expr}': {reason}")]
    InvalidSchedule { expr: String, reason: String },
}

impl TriggerError {
    pub(crate) fn invalid_schedule(expr: &str, err: &cron::error::Error) -> Self {
        TriggerError::InvalidSchedule { expr: expr.to_string(), reason: err.to_string() }
    }
}
