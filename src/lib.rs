//! scheduled_minimize — a cron-driven job that minimizes a fixed objective
//! with L-BFGS and logs the outcome.
//!
//! Purpose
//! -------
//! Serve as the crate root for the `scheduled-minimize` binary and for Rust
//! callers that want to run or embed the job. The binary only wires the
//! pieces below together; all behavior lives in the library.
//!
//! Key behaviors
//! -------------
//! - `optimization`: the objective, its minimizer built on `argmin`'s L-BFGS,
//!   and the unified [`optimization::OptError`] surface.
//! - `job`: the single composed call every trigger runs.
//! - `trigger`: trigger definitions, the per-firing handler, and the cron
//!   loop that drives them.
//! - `logging`: an explicit, reconfigurable log sink.
//! - `cli`: command-line options, tolerant of unknown arguments.
//!
//! Invariants & assumptions
//! ------------------------
//! - Non-convergence is a reported outcome, never an error.
//! - Library code logs through `tracing` only; the process-wide sink is
//!   installed once by the binary.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/` drives the job end to end
//!   through the public API with an in-memory log sink.

pub mod cli;
pub mod job;
pub mod logging;
pub mod optimization;
pub mod trigger;
