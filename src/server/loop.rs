// Server loop module
// Accepts connections until shutdown, then drains in-flight connections

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config;
use crate::logger;

/// How often the drain checks for remaining connections
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Accept connections until `shutdown` resolves.
///
/// Must run inside a `LocalSet`: connections are served with `spawn_local`.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<config::AppState>,
    shutdown: impl Future<Output = ()>,
) {
    let active_connections = Arc::new(AtomicUsize::new(0));
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = &mut shutdown => {
                break;
            }
        }
    }

    // Stop accepting before waiting on in-flight requests
    drop(listener);

    let deadline = Duration::from_secs(std::cmp::max(
        state.config.performance.read_timeout,
        state.config.performance.write_timeout,
    ));
    drain_connections(&active_connections, deadline).await;
    logger::log_server_stop();
}

/// Wait for active connections to finish, up to `deadline`
///
/// Connections still open when the deadline passes are dropped with the runtime.
async fn drain_connections(conn_counter: &AtomicUsize, deadline: Duration) {
    let started = tokio::time::Instant::now();
    loop {
        let remaining = conn_counter.load(Ordering::SeqCst);
        if remaining == 0 {
            return;
        }
        if started.elapsed() >= deadline {
            logger::log_warning(&format!(
                "[Shutdown] Giving up on {remaining} open connection(s) after {}s",
                deadline.as_secs()
            ));
            return;
        }
        logger::log_debug(&format!("[Shutdown] Waiting for {remaining} connection(s)"));
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}
