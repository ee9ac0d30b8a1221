//! # Overlay Controller Runtime
//!
//! Process wiring around the peer registry.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, TOML file, `OC_*` environment, CLI flags)
//! 2. Initialize logging
//! 3. Build the registry (one instance, shared by `Arc`)
//! 4. Bind the HTTP listener and start the roster report
//! 5. Serve until Ctrl-C / SIGTERM, then drain connections
//!
//! Registry state lives only in memory. A restart forgets every node and
//! every node must join again.

pub mod config;
pub mod error;
pub mod report;
pub mod runtime;
pub mod telemetry;

pub use config::{ControllerConfig, HttpConfig, LoggingConfig, ReportConfig};
pub use error::RuntimeError;
pub use runtime::{shutdown_signal, ControllerRuntime};
pub use telemetry::init_tracing;
