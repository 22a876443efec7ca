//! logging — one explicit, reconfigurable log sink for the whole process.
//!
//! Purpose
//! -------
//! Replace an ambient global logger with a [`LoggingContext`] value: it is
//! built once at startup by [`setup_logging`], owns exactly one sink, and is
//! either installed as the process-wide default ([`LoggingContext::install`])
//! or scoped around a closure ([`LoggingContext::scoped`]) in tests.
//!
//! Key behaviors
//! -------------
//! - Level names are parsed case-insensitively from the recognized set in
//!   [`LogLevel`]; anything else is [`ConfigError::InvalidLogLevel`].
//! - The sink threshold sits behind a `tracing_subscriber::reload` layer so
//!   [`LoggingContext::set_level`] swaps it in place. A rejected name leaves
//!   the previous threshold untouched.
//! - Lines are rendered by [`format::LineFormat`].
//!
//! Conventions
//! -----------
//! - Library code logs through `tracing` macros only; it never touches the
//!   context. Only the binary and tests construct one.
use std::io::IsTerminal;

use tracing::{Dispatch, level_filters::LevelFilter};
use tracing_subscriber::{Registry, fmt::MakeWriter, layer::SubscriberExt, reload};

pub mod capture;
pub mod errors;
pub mod format;
pub mod level;

pub use self::capture::CaptureWriter;
pub use self::errors::{ConfigError, ConfigResult};
pub use self::format::LineFormat;
pub use self::level::LogLevel;

/// Where the context's one sink writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    /// Standard error, colorized when it is a terminal.
    Stderr,
    /// A caller-supplied writer, never colorized.
    Writer,
}

/// Owned logging configuration: a dispatcher with one formatted sink and a
/// reloadable threshold.
pub struct LoggingContext {
    level: LogLevel,
    sink: Sink,
    dispatch: Dispatch,
    handle: reload::Handle<LevelFilter, Registry>,
}

impl LoggingContext {
    /// Context writing to standard error at `level`.
    ///
    /// Colors are on exactly when stderr is a terminal; `colored`'s own
    /// stdout-based detection is overridden to agree.
    pub fn new(level: LogLevel) -> Self {
        let ansi = std::io::stderr().is_terminal();
        colored::control::set_override(ansi);
        Self::build(level, Sink::Stderr, std::io::stderr, ansi)
    }

    /// Context writing plain lines to `writer` at `level`.
    pub fn with_writer<W>(level: LogLevel, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        Self::build(level, Sink::Writer, writer, false)
    }

    fn build<W>(level: LogLevel, sink: Sink, writer: W, ansi: bool) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let (filter, handle) = reload::Layer::new(level.level_filter());
        let sink_layer = tracing_subscriber::fmt::layer()
            .event_format(LineFormat)
            .with_writer(writer)
            .with_ansi(ansi);
        let subscriber = Registry::default().with(filter).with(sink_layer);
        Self { level, sink, dispatch: Dispatch::new(subscriber), handle }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn sink(&self) -> Sink {
        self.sink
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Replace the sink threshold.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidLogLevel`] for an unrecognized name; the
    ///   current level is kept.
    /// - [`ConfigError::ReloadFailed`] if the filter can no longer be reached.
    pub fn set_level(&mut self, level: &str) -> ConfigResult<LogLevel> {
        let parsed: LogLevel = level.parse()?;
        self.handle
            .reload(parsed.level_filter())
            .map_err(|e| ConfigError::ReloadFailed { reason: e.to_string() })?;
        self.level = parsed;
        Ok(parsed)
    }

    /// Make this context the process-wide default. Succeeds at most once per
    /// process.
    ///
    /// # Errors
    /// [`ConfigError::AlreadyInstalled`] if a global default already exists.
    pub fn install(&self) -> ConfigResult<()> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())
            .map_err(|e| ConfigError::AlreadyInstalled { reason: e.to_string() })
    }

    /// Run `f` with this context as the thread's default dispatcher.
    pub fn scoped<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

impl std::fmt::Debug for LoggingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingContext")
            .field("level", &self.level)
            .field("sink", &self.sink)
            .finish_non_exhaustive()
    }
}

/// Build the process logging context.
///
/// `None` selects [`LogLevel::Info`]; names match case-insensitively.
///
/// # Errors
/// [`ConfigError::InvalidLogLevel`] for a name outside the recognized set.
pub fn setup_logging(level: Option<&str>) -> ConfigResult<LoggingContext> {
    let level = match level {
        Some(name) => name.parse()?,
        None => LogLevel::default(),
    };
    Ok(LoggingContext::new(level))
}
