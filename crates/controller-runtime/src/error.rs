//! Runtime-level errors (configuration, logging, server lifecycle).

use oc_peer_registry::RegistryError;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// Config file could not be read
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `ControllerConfig`
    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Environment override could not be parsed
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },

    /// Configuration failed validation
    #[error("configuration error: {0}")]
    InvalidConfig(String),

    /// Registry could not be built
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Logging could not be initialized
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),

    /// Server socket bind error
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// HTTP server terminated with an error
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
