//! Logger module
//!
//! Provides logging utilities for the file server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Leveled error, warning and debug logging
//! - File-based logging support

mod format;
mod level;
pub mod writer;

pub use format::{AccessLogEntry, LogFormat};
pub use level::LogLevel;

use crate::config::Config;
use std::net::SocketAddr;
use std::path::Path;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
        LogLevel::parse(&config.logging.level),
        LogFormat::parse(&config.logging.access_log_format),
    )
}

/// Level threshold; `Info` until the writer is initialized
fn threshold() -> LogLevel {
    writer::get().map_or(LogLevel::Info, writer::LogWriter::level)
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, root: &Path) {
    write_info("======================================");
    write_info("Static file server starting");
    write_info(&format!("Binding: http://{addr}"));
    write_info(&format!("Serving: {}", root.display()));
    write_info(&format!("Index file: {}", config.serve.index_file));
    write_info(&format!("Log level: {}", threshold()));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================");
}

pub fn log_listening(port: u16) {
    write_info(&format!("Server listening on port {port}"));
}

pub fn log_port_in_use(port: u16) {
    write_error(&format!("Port {port} already in use."));
}

pub fn log_shutdown() {
    write_info("[Shutdown] Stopped accepting connections");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    if LogLevel::Error.enabled(threshold()) {
        write_error(&format!("[ERROR] {message}"));
    }
}

pub fn log_warning(message: &str) {
    if LogLevel::Warn.enabled(threshold()) {
        write_error(&format!("[WARN] {message}"));
    }
}

pub fn log_debug(message: &str) {
    if LogLevel::Debug.enabled(threshold()) {
        write_info(&format!("[DEBUG] {message}"));
    }
}

/// Write one access log line in the configured format
pub fn log_access(entry: &AccessLogEntry) {
    match writer::get() {
        Some(w) => w.write_access(&entry.format(w.access_format())),
        None => println!("{}", entry.format(&LogFormat::Combined)),
    }
}
