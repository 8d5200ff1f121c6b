//! Logger module
//!
//! Provides logging utilities for the lookup server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Leveled diagnostic logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;
pub use writer::Level;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        &config.logging.level,
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn write(level: Level, message: &str) {
    match writer::get() {
        Some(w) => w.write(level, message),
        // Before init: keep the console behaviour, without debug noise
        None => match level {
            Level::Debug => {}
            Level::Info => println!("{message}"),
            Level::Warn | Level::Error => eprintln!("{message}"),
        },
    }
}

fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, source: &str) {
    write(Level::Info, "======================================");
    write(Level::Info, "Sheet lookup server started");
    write(Level::Info, &format!("Listening on: http://{addr}"));
    write(
        Level::Info,
        &format!(
            "Lookup endpoint: GET http://{addr}{}?{}=<n>",
            config.lookup.path, config.lookup.id_param
        ),
    );
    write(Level::Info, &format!("Dataset: {source}"));
    match &config.lookup.id_header {
        Some(header) => write(Level::Info, &format!("Identifier column: '{header}'")),
        None => write(
            Level::Info,
            &format!("Identifier column: index {}", config.lookup.id_column),
        ),
    }
    if config.auth.api_key.is_some() {
        write(
            Level::Info,
            &format!("API key required in '{}' parameter", config.auth.param),
        );
    }
    write(Level::Info, &format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write(Level::Info, &format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write(Level::Info, &format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write(Level::Info, &format!("Error log: {path}"));
    }
    write(Level::Info, "======================================\n");
}

pub fn log_server_stop() {
    write(Level::Info, "[Shutdown] Listener closed, server stopped");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write(Level::Debug, &format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write(
        Level::Error,
        &format!("[ERROR] Failed to serve connection: {err:?}"),
    );
}

pub fn log_debug(message: &str) {
    write(Level::Debug, &format!("[DEBUG] {message}"));
}

pub fn log_info(message: &str) {
    write(Level::Info, message);
}

pub fn log_error(message: &str) {
    write(Level::Error, &format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write(Level::Warn, &format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}
