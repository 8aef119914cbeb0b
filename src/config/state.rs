// Application state module
// Holds the immutable configuration plus values derived from it at startup

use std::path::PathBuf;

use super::types::Config;
use crate::error::ServerError;

/// Application state, shared read-only by every connection
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    /// Canonical served directory
    pub root: PathBuf,
}

impl AppState {
    /// Resolve the served directory and freeze the configuration
    pub fn new(config: &Config) -> Result<Self, ServerError> {
        let root = PathBuf::from(&config.http.root);
        let root = root
            .canonicalize()
            .map_err(|source| ServerError::Root { path: root, source })?;

        if !root.is_dir() {
            return Err(ServerError::Root {
                path: root,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            });
        }

        Ok(Self {
            config: config.clone(),
            root,
        })
    }

    pub const fn access_log(&self) -> bool {
        self.config.logging.access_log
    }
}
