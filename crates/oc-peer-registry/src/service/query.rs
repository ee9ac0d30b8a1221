//! Query protocol: read-only roster access.

use crate::domain::{PeerRecord, PeerRegistry, RegistryStats};
use std::sync::Arc;

/// Stateless read path over the registry.
#[derive(Debug, Clone)]
pub struct QueryProtocol {
    registry: Arc<PeerRegistry>,
}

impl QueryProtocol {
    pub fn new(registry: Arc<PeerRegistry>) -> Self {
        Self { registry }
    }

    /// Current roster, same shape as a join response.
    pub fn peers(&self) -> Vec<PeerRecord> {
        self.registry.snapshot()
    }

    pub fn stats(&self) -> RegistryStats {
        self.registry.stats()
    }
}
