// Connection module
// Serves one accepted TCP connection with hyper's HTTP/1 implementation

use std::net::SocketAddr;
use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;
use tokio::sync::Notify;

use crate::config::AppState;
use crate::handler;
use crate::http::CrossOriginIsolation;
use crate::logger;

/// Serve every request arriving on `stream` until the connection closes.
///
/// Requests go through [`CrossOriginIsolation`], so every response written
/// on this connection carries the isolation headers. Header names are
/// written in title case. Keep-alive is only offered when
/// `performance.keep_alive_timeout` is non-zero; otherwise the connection
/// closes after the first response. A kept-alive connection that stays idle
/// for `keep_alive_timeout` seconds is shut down.
pub async fn serve_connection(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    let io = TokioIo::new(stream);
    let performance = &state.config.performance;
    let timeout = performance.connection_timeout();
    let idle_timeout = performance.keep_alive_idle();

    let mut builder = http1::Builder::new();
    builder
        .title_case_headers(true)
        .keep_alive(performance.keep_alive());

    // Signalled when a request arrives and when its response is ready
    let activity = Arc::new(Notify::new());

    let handler_state = Arc::clone(&state);
    let handler_activity = Arc::clone(&activity);
    let service = CrossOriginIsolation::new(service_fn(move |req| {
        let state = Arc::clone(&handler_state);
        let activity = Arc::clone(&handler_activity);
        activity.notify_one();
        async move {
            let response = handler::handle_request(req, state, peer_addr).await;
            activity.notify_one();
            response
        }
    }));
    let conn = builder.serve_connection(io, service);

    let served = async {
        match idle_timeout {
            Some(idle) => {
                let mut conn = pin!(conn);
                loop {
                    tokio::select! {
                        result = conn.as_mut() => break result,
                        () = activity.notified() => {}
                        () = tokio::time::sleep(idle) => {
                            // Closes now if idle, after the in-flight response otherwise
                            conn.as_mut().graceful_shutdown();
                            break conn.as_mut().await;
                        }
                    }
                }
            }
            None => conn.await,
        }
    };

    let result = match timeout {
        Some(duration) => {
            if let Ok(result) = tokio::time::timeout(duration, served).await {
                result
            } else {
                log_timeout(peer_addr, duration);
                return;
            }
        }
        None => served.await,
    };

    if let Err(err) = result {
        logger::log_connection_error(&err);
    }
}

fn log_timeout(peer_addr: SocketAddr, duration: Duration) {
    logger::log_warning(&format!(
        "Connection from {peer_addr} timed out after {} seconds",
        duration.as_secs()
    ));
}
