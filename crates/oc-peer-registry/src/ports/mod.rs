//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! - **Driving Ports (Inbound):** the API the HTTP adapter (or any other
//!   transport) drives.
//!
//! The registry has no driven ports: it performs no I/O and keeps no state
//! outside process memory.

pub mod inbound;

pub use inbound::PeerRegistryApi;
