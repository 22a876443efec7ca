//! `scheduled-minimize` binary: parse options, install logging, then run the
//! selected trigger once or on its schedule until Ctrl-C.
use anyhow::Context;
use tracing::{debug, error, info};

use scheduled_minimize::{cli::parse_args, logging::setup_logging, trigger::Scheduler};

fn main() -> anyhow::Result<()> {
    let opts = parse_args().unwrap_or_else(|e| e.exit());

    let logging = setup_logging(Some(opts.log_level.as_str()))?;
    logging.install()?;
    debug!(samples = ?opts.samples, trigger = ?opts.trigger, once = opts.once, "parsed options");

    let scheduler = Scheduler::new(opts.trigger.spec())?;
    if opts.once {
        let outcome = scheduler.run_once()?;
        info!(converged = outcome.converged, "single invocation complete");
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the scheduler runtime")?;
    runtime.block_on(scheduler.run_until(shutdown_signal()));
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "unable to listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
}
