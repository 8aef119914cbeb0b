// Configuration module entry point
// Built-in defaults reproduce the fixed behaviour (127.0.0.1:8080, serve the
// working directory); an optional coi-serve.toml may override them.

mod state;
mod types;

use std::net::SocketAddr;

use ::config::FileFormat;

use crate::error::ServerError;

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig};

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "coi-serve.toml";

impl Config {
    /// Load `coi-serve.toml` if present, defaults otherwise
    pub fn load() -> Result<Self, ServerError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from specified TOML file path (`.toml` optional)
    ///
    /// A missing file is not an error. Other formats are never read, nor
    /// are environment variables.
    pub fn load_from(config_path: &str) -> Result<Self, ServerError> {
        let settings = config::Config::builder()
            .add_source(config::File::new(config_path, FileFormat::Toml).required(false))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.concurrent", false)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .set_default("performance.keep_alive_timeout", 0)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.root", ".")?
            .set_default(
                "http.server_name",
                concat!("coi-serve/", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("http.index_files", vec!["index.html", "index.htm"])?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| ServerError::Address { addr, source })
    }
}

/// State serving `root` with default settings
#[cfg(test)]
pub(crate) fn test_state(root: &std::path::Path) -> AppState {
    let absent = root.join("no-such-config");
    let mut cfg = Config::load_from(absent.to_str().unwrap()).unwrap();
    cfg.http.root = root.display().to_string();
    AppState::new(&cfg).unwrap()
}
