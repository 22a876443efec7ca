//! cli — command-line options for the scheduled job.
//!
//! Only the flags declared on [`CliOptions`] are parsed; any other flag, its
//! values, and stray positionals are dropped before clap sees them, so
//! wrappers can pass extra arguments through without breaking the job.
//! Unique prefixes of known long flags are expanded first (`--log` reads as
//! `--log-level`), and a repeated flag keeps its last value.
use clap::Parser;
use std::ffi::OsString;

use crate::{logging::LogLevel, trigger::TriggerKind};

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "scheduled-minimize",
    version,
    args_override_self = true,
    about = "Run the scheduled minimization job",
    long_about = "Runs an L-BFGS minimization of a fixed objective on a cron schedule \
                  and logs each result to stderr."
)]
pub struct CliOptions {
    /// List of sample models to process
    #[arg(long, num_args = 1.., value_name = "NAME")]
    pub samples: Option<Vec<String>>,

    /// Set the logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Debug, value_name = "LEVEL")]
    pub log_level: LogLevel,

    /// Which trigger definition to schedule
    #[arg(long, value_enum, default_value_t = TriggerKind::Weekly, value_name = "TRIGGER")]
    pub trigger: TriggerKind,

    /// Run a single invocation immediately and exit
    #[arg(long)]
    pub once: bool,
}

/// Parse the process arguments.
///
/// # Errors
/// A `clap::Error` when a recognized flag has a bad value (e.g. a log level
/// outside the choice set); `--help`/`--version` also arrive as errors.
pub fn parse_args() -> Result<CliOptions, clap::Error> {
    parse_args_from(std::env::args_os())
}

/// Parse an explicit argument list whose first item is the program name.
pub fn parse_args_from<I, T>(args: I) -> Result<CliOptions, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    CliOptions::try_parse_from(retain_known_args(args))
}

// ---- Helper Methods ----

const VALUE_FLAGS: [&str; 3] = ["--samples", "--log-level", "--trigger"];
const SWITCH_FLAGS: [&str; 4] = ["--once", "--help", "-h", "--version"];

/// Keep the program name, recognized flags and the values that follow them.
fn retain_known_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut kept: Vec<OsString> = args.next().into_iter().collect();
    let mut taking_values = false;
    for arg in args {
        let text = arg.to_string_lossy().into_owned();
        if text.starts_with('-') && text.len() > 1 {
            let (given, value) = match text.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (text.as_str(), None),
            };
            let name = expand_flag(given);
            let known_value = VALUE_FLAGS.contains(&name);
            taking_values = known_value && value.is_none();
            if known_value || SWITCH_FLAGS.contains(&name) {
                kept.push(match value {
                    Some(value) => OsString::from(format!("{name}={value}")),
                    None => OsString::from(name),
                });
            }
        } else if taking_values {
            kept.push(arg);
        }
    }
    kept
}

/// Full name of a known long flag that `given` uniquely abbreviates, or
/// `given` itself.
fn expand_flag(given: &str) -> &str {
    if given.len() < 3 || !given.starts_with("--") {
        return given;
    }
    let mut candidates = VALUE_FLAGS
        .iter()
        .chain(SWITCH_FLAGS.iter())
        .copied()
        .filter(|flag| flag.starts_with("--") && flag.starts_with(given));
    match (candidates.next(), candidates.next()) {
        (Some(flag), None) => flag,
        _ => given,
    }
}
