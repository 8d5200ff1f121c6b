// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use crate::logger;

/// Resolve once the process is asked to stop
#[cfg(unix)]
pub async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let (mut sigterm, mut sigint) = match (
        signal(SignalKind::terminate()),
        signal(SignalKind::interrupt()),
    ) {
        (Ok(term), Ok(int)) => (term, int),
        (Err(e), _) | (_, Err(e)) => {
            logger::log_warning(&format!(
                "[SIGNAL] Failed to register SIGTERM/SIGINT handlers ({e}), falling back to Ctrl+C"
            ));
            wait_for_ctrl_c().await;
            return;
        }
    };

    logger::log_info(&format!(
        "[SIGNAL] Process ID: {} (SIGTERM or Ctrl+C to stop)",
        std::process::id()
    ));

    tokio::select! {
        _ = sigterm.recv() => logger::log_info("\n[SIGNAL] SIGTERM received, shutting down..."),
        _ = sigint.recv() => logger::log_info("\n[SIGNAL] SIGINT received, shutting down..."),
    }
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    wait_for_ctrl_c().await;
}

async fn wait_for_ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logger::log_info("\n[SIGNAL] Ctrl+C received, shutting down..."),
        Err(e) => {
            logger::log_error(&format!("[SIGNAL] Unable to listen for Ctrl+C: {e}"));
            // Without a signal source the server runs until killed
            std::future::pending::<()>().await;
        }
    }
}
