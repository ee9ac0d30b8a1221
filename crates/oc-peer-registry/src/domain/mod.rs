//! Domain Layer - Pure registry logic with no I/O
//!
//! This module contains:
//! - Peer record value types (node id, public key, endpoint, virtual address)
//! - The monotonic virtual address allocator
//! - The lock-guarded peer registry table
//! - Address space configuration and domain errors
//! - Health and error response bodies

pub mod allocator;
pub mod config;
pub mod errors;
pub mod registry;
pub mod types;
pub mod wire;

pub use allocator::*;
pub use config::*;
pub use errors::*;
pub use registry::*;
pub use types::*;
pub use wire::*;
