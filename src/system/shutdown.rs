use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Cancels `token` on Ctrl-C or SIGTERM.
///
/// The task ends on its own once `token` is cancelled by anyone else.
pub fn spawn_signal_handler(token: &CancellationToken) -> tokio::task::JoinHandle<()> {
    let token = token.clone();
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
                () = token.cancelled() => {}
                result = tokio::signal::ctrl_c() => {
                    if let Err(err) = result {
                        warn!("Failed to listen for Ctrl-C: {}", err);
                        return;
                    }
                    info!("Ctrl-C received, finishing in-flight requests");
                    token.cancel();
                }
                () = async {
                    if let Some(signal) = term_signal.as_mut() {
                        signal.recv().await;
                    } else {
                        std::future::pending::<()>().await;
                    }
                } => {
                    info!("SIGTERM received, finishing in-flight requests");
                    token.cancel();
                }
            }
        }

        #[cfg(not(unix))]
        {
            tokio::select! {
                () = token.cancelled() => {}
                result = tokio::signal::ctrl_c() => {
                    if let Err(err) = result {
                        warn!("Failed to listen for Ctrl-C: {}", err);
                        return;
                    }
                    info!("Ctrl-C received, finishing in-flight requests");
                    token.cancel();
                }
            }
        }
    })
}
