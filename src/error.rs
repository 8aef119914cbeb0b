//! Startup error types
//!
//! Request-level failures never surface here: they become HTTP statuses.
//! Everything in this module is fatal and ends the process with exit code 1.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("invalid listen address '{addr}': {source}")]
    Address {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error("failed to bind {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },

    #[error("served directory '{}' is not accessible: {source}", path.display())]
    Root { path: PathBuf, source: io::Error },

    #[error("failed to open log file: {0}")]
    LogFile(#[source] io::Error),

    #[error("failed to register signal handler: {0}")]
    Signal(#[source] io::Error),

    #[error("failed to build runtime: {0}")]
    Runtime(#[source] io::Error),
}
