use thiserror::Error;

use crate::logging::level::LogLevel;

/// Result alias for logging setup.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Invalid-configuration errors raised while setting up the log sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Level name outside the recognized set.
    #[error("Invalid logging level '{name}'. Must be one of {:?}", LogLevel::NAMES)]
    InvalidLogLevel { name: String },

    /// A process-wide subscriber was already set.
    #[error("Logging sink already installed: {reason}")]
    AlreadyInstalled { reason: String },

    /// The reloadable level filter is gone (its subscriber was dropped).
    #[error("Failed to reload logging level: {reason}")]
    ReloadFailed { reason: String },
}
