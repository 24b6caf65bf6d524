use std::sync::Arc;

use clap::Parser;
use tracing::info;

use reqchain::args::ChainArgs;
use reqchain::config::load_config;
use reqchain::error::AppResult;
use reqchain::http::HttpTransport;
use reqchain::shutdown::{ShutdownCoordinator, ShutdownReason};
use reqchain::shutdown_handlers::setup_signal_shutdown_handler;
use reqchain::supervisor::Supervisor;

pub(crate) fn run() -> AppResult<()> {
    let args = ChainArgs::parse();

    reqchain::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

async fn run_async(args: ChainArgs) -> AppResult<()> {
    let config = load_config(args.config.as_deref())?;
    info!(
        "loaded {} chains from {}",
        config.chains.len(),
        config.path.display()
    );

    let transport = Arc::new(HttpTransport::new()?);
    let shutdown = ShutdownCoordinator::new();
    let mut supervisor = Supervisor::init(config.chains, shutdown.clone(), transport)?;

    let signal_handler = setup_signal_shutdown_handler(&shutdown);
    let deadline = args
        .duration
        .or(config.duration)
        .map(|limit| shutdown.arm_deadline(limit));

    supervisor.run();
    let report = supervisor.wait().await;

    // Releases the signal handler and deadline when every chain ended on its own.
    shutdown.signal(ShutdownReason::Completed);
    signal_handler.await?;
    if let Some(deadline) = deadline {
        deadline.await?;
    }

    report.print_summary();
    Ok(())
}
