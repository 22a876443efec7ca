//! logging::format — the single-line event layout of the job's sink.
//!
//! ```text
//! 2026-10-18 23:42:07 | INFO     | scheduled_minimize::trigger::handler:handle_timer:83 - Results: ...
//! ```
//!
//! `<function>` is the innermost span's name (handlers are instrumented), or
//! `-` when the event fires outside any span. Colors are applied only when
//! the underlying writer accepts ANSI escapes.
use chrono::Local;
use colored::{ColoredString, Colorize};
use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    fmt::{FmtContext, FormatEvent, FormatFields, format::Writer},
    registry::LookupSpan,
};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Width the level column is padded to.
pub const LEVEL_WIDTH: usize = 8;

/// `FormatEvent` producing `<timestamp> | <level> | <module>:<function>:<line> - <message>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let level = format!("{:<width$}", level_label(meta.level()), width = LEVEL_WIDTH);
        let module = meta.module_path().unwrap_or_else(|| meta.target());
        let function = ctx.lookup_current().map(|span| span.name()).unwrap_or("-");
        let location = format!("{module}:{function}:{}", meta.line().unwrap_or(0));

        let mut message = String::new();
        ctx.field_format().format_fields(Writer::new(&mut message), event)?;

        if writer.has_ansi_escapes() {
            writeln!(
                writer,
                "{} | {} | {} - {}",
                timestamp.green(),
                paint(meta.level(), &level),
                location.cyan(),
                paint(meta.level(), &message)
            )
        } else {
            writeln!(writer, "{timestamp} | {level} | {location} - {message}")
        }
    }
}

/// Name printed for a tracing level; `WARN` reads as `WARNING`.
pub fn level_label(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "TRACE",
        Level::DEBUG => "DEBUG",
        Level::INFO => "INFO",
        Level::WARN => "WARNING",
        Level::ERROR => "ERROR",
    }
}

fn paint(level: &Level, text: &str) -> ColoredString {
    match *level {
        Level::TRACE => text.cyan(),
        Level::DEBUG => text.blue(),
        Level::INFO => text.bold(),
        Level::WARN => text.yellow().bold(),
        Level::ERROR => text.red().bold(),
    }
}
