//! # Registry Service
//!
//! Implements the `PeerRegistryApi` driving port by wiring the join and
//! query protocols to one shared [`PeerRegistry`].

mod join;
mod query;

pub use join::{JoinOutcome, JoinProtocol};
pub use query::QueryProtocol;

use crate::domain::{
    JoinRequest, PeerRecord, PeerRegistry, RegistryConfig, RegistryResult, RegistryStats,
};
use crate::ports::PeerRegistryApi;
use std::net::IpAddr;
use std::sync::Arc;

/// Registry service implementing the driving port.
///
/// # Example
///
/// ```rust,ignore
/// let service = Arc::new(RegistryService::new(RegistryConfig::default())?);
/// let router = oc_peer_registry::router(service);
/// ```
#[derive(Debug, Clone)]
pub struct RegistryService {
    registry: Arc<PeerRegistry>,
    join: JoinProtocol,
    query: QueryProtocol,
}

impl RegistryService {
    /// Create a service over a fresh, empty registry.
    pub fn new(config: RegistryConfig) -> RegistryResult<Self> {
        let registry = Arc::new(PeerRegistry::from_config(&config)?);
        Ok(Self::with_registry(registry))
    }

    /// Create a service over an existing registry handle.
    pub fn with_registry(registry: Arc<PeerRegistry>) -> Self {
        Self {
            join: JoinProtocol::new(Arc::clone(&registry)),
            query: QueryProtocol::new(Arc::clone(&registry)),
            registry,
        }
    }

    /// Get the underlying registry.
    pub fn registry(&self) -> &Arc<PeerRegistry> {
        &self.registry
    }
}

impl PeerRegistryApi for RegistryService {
    fn join(&self, request: JoinRequest, observed_host: IpAddr) -> RegistryResult<JoinOutcome> {
        self.join.join(request, observed_host)
    }

    fn peers(&self) -> Vec<PeerRecord> {
        self.query.peers()
    }

    fn stats(&self) -> RegistryStats {
        self.query.stats()
    }
}
