//! Integration tests for the scheduled minimization job.
//!
//! Purpose
//! -------
//! - Validate the end-to-end path an operator relies on: arguments are
//!   parsed, a logging context is built, and a trigger firing runs the
//!   minimization and reports the result through the log sink.
//!
//! Coverage
//! --------
//! - `cli::parse_args_from`: known flags with foreign arguments mixed in.
//! - `logging::setup_logging` / `LoggingContext::set_level`: accepted and
//!   rejected level names.
//! - `job::run_minimization`: convergence from the default start.
//! - `trigger::handle_timer`: log sequence of an on-time and a past-due
//!   firing through an in-memory sink.
//!
//! Exclusions
//! ----------
//! - Waiting on real fire times of the cron loop; next-fire and collapsing
//!   are covered by unit tests on fixed timestamps.
//! - The process-wide sink installed by the binary.
use chrono::{TimeDelta, TimeZone, Utc};
use scheduled_minimize::{
    cli::parse_args_from,
    job::{DEFAULT_X0, run_minimization},
    logging::{CaptureWriter, ConfigError, LogLevel, LoggingContext, setup_logging},
    optimization::objective::objective,
    trigger::{TimerInfo, TriggerKind, handle_timer},
};

#[test]
// Purpose
// -------
// Cover the documented argument scenario end to end.
//
// Given
// -----
// - `--samples a b --log-level ERROR` plus an unrelated host flag.
//
// Expect
// ------
// - Both known values are applied; the log level feeds `setup_logging`.
fn parsed_options_configure_logging() {
    // Act
    let opts = parse_args_from([
        "scheduled-minimize",
        "--host-port",
        "7071",
        "--samples",
        "a",
        "b",
        "--log-level",
        "ERROR",
    ])
    .expect("known args parse");
    let ctx = setup_logging(Some(opts.log_level.as_str())).expect("choice set is recognized");

    // Assert
    assert_eq!(opts.samples, Some(vec!["a".to_string(), "b".to_string()]));
    assert_eq!(ctx.level(), LogLevel::Error);
    assert_eq!(opts.trigger, TriggerKind::Weekly);
}

#[test]
fn verbose_level_is_invalid_configuration() {
    let mut ctx = setup_logging(Some("DEBUG")).expect("DEBUG is recognized");

    let err = ctx.set_level("VERBOSE").expect_err("VERBOSE is not a level");

    assert!(matches!(err, ConfigError::InvalidLogLevel { ref name } if name == "VERBOSE"));
    assert_eq!(ctx.level(), LogLevel::Debug);
}

#[test]
fn default_run_finds_the_bowl_center() {
    let out = run_minimization().expect("scheduled minimization succeeds");

    assert!(out.converged);
    assert!((out.x[0] - 2.0).abs() < 1e-4);
    assert!(out.value <= objective(&ndarray::array![DEFAULT_X0]));
    assert!(out.value <= 5.0);
}

#[test]
// Purpose
// -------
// Verify a late firing of each trigger produces the full log sequence.
//
// Given
// -----
// - A timer 30s late, each trigger kind, an INFO capture sink.
//
// Expect
// ------
// - Past-due, start, `Results:` and finish lines in order, with the
//   past-due line at the variant's level.
fn late_firing_logs_full_sequence() {
    let scheduled = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).single().expect("valid timestamp");
    let fired_at = scheduled + TimeDelta::seconds(30);
    let timer = TimerInfo::observe(scheduled, fired_at, TimeDelta::seconds(1));

    let expected_levels =
        [(TriggerKind::Frequent, "| INFO     |"), (TriggerKind::Weekly, "| WARNING  |")];
    for (kind, level) in expected_levels {
        // Arrange
        let capture = CaptureWriter::new();
        let ctx = LoggingContext::with_writer(LogLevel::Info, capture.clone());
        let spec = kind.spec();

        // Act
        let out = ctx.scoped(|| handle_timer(&spec, &timer)).expect("handler succeeds");

        // Assert
        assert!(out.converged);
        let lines = capture.lines();
        assert!(lines.len() >= 4, "{lines:?}");
        assert!(lines[0].contains(level), "{lines:?}");
        assert!(lines[0].ends_with(" - The timer is past due!"), "{lines:?}");
        assert!(lines[1].ends_with(&format!(" - {}", spec.start_message)));
        assert!(lines[2].contains(" - Results: x=["));
        assert!(lines[lines.len() - 1].ends_with(" - Timer trigger function finished."));
    }
}
