// Server loop module
// Accepts connections until the shutdown signal fires

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::serve_connection;
use crate::config::AppState;
use crate::logger;

/// Accept and serve connections until `shutdown` is notified.
///
/// With `server.concurrent` off (the default) connections are served one
/// at a time in accept order; a slow client delays the next one. With it
/// on, each connection runs in its own task.
pub async fn start_server_loop(listener: TcpListener, state: Arc<AppState>, shutdown: Arc<Notify>) {
    let concurrent = state.config.server.concurrent;

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        let conn = serve_connection(stream, peer_addr, Arc::clone(&state));
                        if concurrent {
                            tokio::spawn(conn);
                        } else {
                            tokio::select! {
                                () = conn => {}
                                () = shutdown.notified() => return,
                            }
                        }
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => return,
        }
    }
}
