//! Single-shot host snapshots: filesystem usage with threshold alerts, and a host inventory.

pub mod classify;
pub mod collectors;
pub mod command;
pub mod config;
pub mod report;
pub mod snapshot;

use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout carries only the snapshot.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
