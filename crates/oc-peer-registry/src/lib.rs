//! # Overlay Peer Registry
//!
//! Control-plane registry for a virtual overlay network. Nodes register a
//! claimed identity, a public key and a declared UDP port; the registry
//! assigns each identity a stable virtual address and returns the full roster
//! so nodes can open direct tunnels to each other.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** Peer records, address allocation, the locked registry table
//! - **Ports Layer:** The inbound `PeerRegistryApi` trait
//! - **Service Layer:** Join and query protocols wired to the registry
//! - **Adapters Layer:** HTTP binding (feature `http`)
//!
//! ```text
//!   POST /join ──► JoinProtocol ──► PeerRegistry::register ──► AddressAllocator
//!                                          │
//!   GET /peers ──► QueryProtocol ──► PeerRegistry::snapshot
//! ```
//!
//! ## Trust Model
//!
//! Neither the node id nor the public key nor the declared port is verified.
//! Any party that can reach the controller can register any identity. Identity
//! verification is a prerequisite for production use and is not provided here.
//!
//! ## Example
//!
//! ```rust
//! use oc_peer_registry::{JoinRequest, PeerRegistryApi, RegistryConfig, RegistryService};
//! use std::net::{IpAddr, Ipv4Addr};
//!
//! let service = RegistryService::new(RegistryConfig::default()).unwrap();
//! let request = JoinRequest::new("node-a", "cHVia2V5", 51820);
//! let outcome = service
//!     .join(request, IpAddr::V4(Ipv4Addr::new(203, 0, 113, 5)))
//!     .unwrap();
//!
//! assert_eq!(outcome.record.virtual_ip.to_string(), "10.0.0.2");
//! assert_eq!(outcome.record.endpoint.to_string(), "203.0.113.5:51820");
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod ports;
pub mod service;

/// Adapters for external integrations.
/// Requires feature: `http`
#[cfg(feature = "http")]
pub mod adapters;

pub use domain::{
    AddressAllocator, AddressSpace, AddressSpaceConfig, Endpoint, ErrorBody, HealthBody,
    JoinRequest, NodeId, PeerRecord, PeerRegistry, PublicKey, Registration, RegistryConfig,
    RegistryError, RegistryStats, Upserted, VirtualAddress,
};
pub use ports::PeerRegistryApi;
pub use service::{JoinOutcome, JoinProtocol, QueryProtocol, RegistryService};

#[cfg(feature = "http")]
pub use adapters::http::{router, serve, ApiError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
