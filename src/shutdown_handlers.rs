use crate::shutdown::{ShutdownCoordinator, ShutdownReason};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tracing::warn;

/// Translates Ctrl+C and SIGTERM into a shutdown signal. The task exits as
/// soon as the coordinator fires for any reason.
pub fn setup_signal_shutdown_handler(
    coordinator: &ShutdownCoordinator,
) -> tokio::task::JoinHandle<()> {
    let coordinator = coordinator.clone();
    tokio::spawn(async move {
        #[cfg(unix)]
        let mut term_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(err) => {
                warn!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };

        #[cfg(unix)]
        {
            tokio::select! {
                () = coordinator.signaled() => {}
                result = tokio::signal::ctrl_c() => {
                    if let Err(err) = result {
                        warn!("Failed to listen for Ctrl+C: {}", err);
                    }
                    coordinator.signal(ShutdownReason::Interrupt);
                }
                () = async {
                    if let Some(signal) = term_signal.as_mut() {
                        signal.recv().await;
                    } else {
                        std::future::pending::<()>().await;
                    }
                } => {
                    coordinator.signal(ShutdownReason::Terminate);
                }
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                () = coordinator.signaled() => {}
                result = tokio::signal::ctrl_c() => {
                    if let Err(err) = result {
                        warn!("Failed to listen for Ctrl+C: {}", err);
                    }
                    coordinator.signal(ShutdownReason::Interrupt);
                }
            }
        }
    })
}
