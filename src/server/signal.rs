// Signal handling module
//
// SIGINT (Ctrl+C) and SIGTERM stop the server. Nothing else is handled.

use std::sync::Arc;

use tokio::sync::Notify;

use crate::error::ServerError;
use crate::logger;

/// Register the shutdown signals and notify `shutdown` when one arrives.
///
/// Registration happens before this returns, so a failure is reported to
/// the caller instead of being lost in the spawned task.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) -> Result<(), ServerError> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate()).map_err(ServerError::Signal)?;
    let mut sigint = signal(SignalKind::interrupt()).map_err(ServerError::Signal)?;

    tokio::spawn(async move {
        let name = tokio::select! {
            _ = sigint.recv() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
        };
        logger::log_shutdown(name);
        shutdown.notify_one();
    });
    Ok(())
}

/// Non-unix fallback: only Ctrl+C is handled
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) -> Result<(), ServerError> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                logger::log_shutdown("Ctrl+C");
                shutdown.notify_one();
            }
            Err(e) => logger::log_error(&format!("Failed to listen for Ctrl+C: {e}")),
        }
    });
    Ok(())
}
