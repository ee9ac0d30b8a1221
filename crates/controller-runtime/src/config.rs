//! Controller configuration.
//!
//! Sources, lowest to highest precedence:
//!
//! 1. Built-in defaults
//! 2. TOML file
//! 3. Environment (`OC_*`)
//! 4. Command-line flags (applied by `main`)
//!
//! ```toml
//! [http]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [registry.address_space]
//! network = "10.0.0.0"
//! prefix_len = 24
//! first_host_offset = 2
//!
//! [logging]
//! level = "info"
//! json = false
//!
//! [report]
//! interval_secs = 30
//! ```

use crate::error::RuntimeError;
use oc_peer_registry::RegistryConfig;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_HTTP_HOST: &str = "OC_HTTP_HOST";
pub const ENV_HTTP_PORT: &str = "OC_HTTP_PORT";
pub const ENV_LOG_LEVEL: &str = "OC_LOG_LEVEL";
pub const ENV_JSON_LOGS: &str = "OC_JSON_LOGS";
pub const ENV_REPORT_INTERVAL_SECS: &str = "OC_REPORT_INTERVAL_SECS";

/// Main controller configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// Peer registry configuration
    pub registry: RegistryConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Periodic roster report
    pub report: ReportConfig,
}

impl ControllerConfig {
    /// Load defaults, then the optional TOML file, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, RuntimeError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file. Missing sections fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, RuntimeError> {
        let content = std::fs::read_to_string(path).map_err(|source| RuntimeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, RuntimeError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `OC_*` overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), RuntimeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = parse_env(&lookup, ENV_HTTP_HOST)? {
            self.http.host = host;
        }
        if let Some(port) = parse_env(&lookup, ENV_HTTP_PORT)? {
            self.http.port = port;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(json) = parse_env(&lookup, ENV_JSON_LOGS)? {
            self.logging.json = json;
        }
        if let Some(secs) = parse_env(&lookup, ENV_REPORT_INTERVAL_SECS)? {
            self.report.interval_secs = secs;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), RuntimeError> {
        if self.http.port == 0 {
            return Err(RuntimeError::InvalidConfig("http.port cannot be 0".into()));
        }
        if self.logging.level.trim().is_empty() {
            return Err(RuntimeError::InvalidConfig(
                "logging.level cannot be empty".into(),
            ));
        }
        self.registry.validate()?;
        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

fn parse_env<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, RuntimeError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| RuntimeError::InvalidEnv { var, value }),
        None => Ok(None),
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 8080)
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (trace, debug, info, warn, error)
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Roster report configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Seconds between reports; 0 disables the report
    pub interval_secs: u64,
}

impl ReportConfig {
    pub fn interval(&self) -> Option<Duration> {
        (self.interval_secs > 0).then(|| Duration::from_secs(self.interval_secs))
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { interval_secs: 30 }
    }
}
