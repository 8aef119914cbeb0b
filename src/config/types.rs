// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads (default: CPU cores)
    #[serde(default)]
    pub workers: Option<usize>,
    /// Serve connections in spawned tasks instead of one at a time
    pub concurrent: bool,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    pub access_log_format: String,
    /// Access log file path (optional, stderr if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Performance configuration, all values in seconds
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PerformanceConfig {
    /// 0 closes the connection after every response
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
}

impl PerformanceConfig {
    pub const fn keep_alive(&self) -> bool {
        self.keep_alive_timeout > 0
    }

    /// How long a kept-alive connection may sit idle between requests
    pub fn keep_alive_idle(&self) -> Option<std::time::Duration> {
        self.keep_alive()
            .then(|| std::time::Duration::from_secs(self.keep_alive_timeout))
    }

    /// Upper bound for a whole connection, `None` when both timeouts are 0
    pub fn connection_timeout(&self) -> Option<std::time::Duration> {
        let secs = self.read_timeout.max(self.write_timeout);
        (secs > 0).then(|| std::time::Duration::from_secs(secs))
    }
}

/// HTTP configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    /// Directory served as `/`
    pub root: String,
    /// Value of the `Server` response header
    pub server_name: String,
    /// Files tried, in order, when a directory is requested
    pub index_files: Vec<String>,
}
