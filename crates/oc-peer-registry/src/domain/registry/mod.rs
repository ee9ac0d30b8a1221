//! # Peer Registry
//!
//! The authoritative in-memory table of registered nodes.
//!
//! ## Invariants
//!
//! - One record per `NodeId` (the map key).
//! - A `VirtualAddress` is assigned once per `NodeId` and never changes;
//!   re-registration only refreshes the public key and endpoint.
//! - Addresses come from the owned [`AddressAllocator`] and are never
//!   released. There is no removal path.
//!
//! All reads and writes go through a single `parking_lot::Mutex`. Nothing
//! inside the critical section performs I/O.

use super::allocator::AddressAllocator;
use super::config::{AddressSpace, RegistryConfig};
use super::errors::RegistryResult;
use super::types::{Endpoint, NodeId, PeerRecord, PublicKey};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;

/// Whether an upsert created a record or refreshed an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Registration {
    /// First join for this node id; a fresh address was allocated.
    New,
    /// Re-join; public key and endpoint overwritten, address kept.
    Refreshed,
}

/// Result of a committed upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upserted {
    pub record: PeerRecord,
    pub registration: Registration,
}

/// Registry counters for health reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub peers: usize,
    pub addresses_allocated: u32,
    pub addresses_remaining: u32,
}

/// Table plus allocator; only ever touched under the registry lock.
#[derive(Debug)]
struct RegistryState {
    peers: HashMap<NodeId, PeerRecord>,
    allocator: AddressAllocator,
}

impl RegistryState {
    fn upsert(
        &mut self,
        node_id: NodeId,
        public_key: PublicKey,
        endpoint: Endpoint,
    ) -> RegistryResult<Upserted> {
        if let Some(existing) = self.peers.get_mut(&node_id) {
            existing.public_key = public_key;
            existing.endpoint = endpoint;
            return Ok(Upserted {
                record: existing.clone(),
                registration: Registration::Refreshed,
            });
        }

        // Allocation is the only fallible step and happens before insertion.
        let virtual_ip = self.allocator.allocate()?;
        let record = PeerRecord {
            node_id: node_id.clone(),
            public_key,
            endpoint,
            virtual_ip,
        };
        self.peers.insert(node_id, record.clone());

        Ok(Upserted {
            record,
            registration: Registration::New,
        })
    }

    fn snapshot(&self) -> Vec<PeerRecord> {
        let mut roster: Vec<PeerRecord> = self.peers.values().cloned().collect();
        roster.sort_by_key(|p| p.virtual_ip);
        roster
    }

    fn stats(&self) -> RegistryStats {
        RegistryStats {
            peers: self.peers.len(),
            addresses_allocated: self.allocator.allocated(),
            addresses_remaining: self.allocator.remaining(),
        }
    }
}

/// Lock-guarded peer table owning the address allocator.
///
/// Constructed once at startup and shared by handle (`Arc`) with every
/// request handler.
#[derive(Debug)]
pub struct PeerRegistry {
    state: Mutex<RegistryState>,
}

impl PeerRegistry {
    pub fn new(space: AddressSpace) -> Self {
        Self {
            state: Mutex::new(RegistryState {
                peers: HashMap::new(),
                allocator: AddressAllocator::new(space),
            }),
        }
    }

    /// Build a registry from validated configuration.
    pub fn from_config(config: &RegistryConfig) -> RegistryResult<Self> {
        let space = AddressSpace::try_from(&config.address_space)?;
        Ok(Self::new(space))
    }

    /// Insert or refresh the record for `node_id`.
    ///
    /// Existing ids keep their address; new ids get the next one from the
    /// allocator. On `AddressSpaceExhausted` nothing is stored.
    pub fn upsert(
        &self,
        node_id: NodeId,
        public_key: PublicKey,
        endpoint: Endpoint,
    ) -> RegistryResult<Upserted> {
        self.state.lock().upsert(node_id, public_key, endpoint)
    }

    /// Every known record, ordered by virtual address.
    ///
    /// Callers must not rely on the ordering.
    pub fn snapshot(&self) -> Vec<PeerRecord> {
        self.state.lock().snapshot()
    }

    /// Upsert then snapshot under one lock acquisition.
    ///
    /// The returned roster is exactly the table as left by this upsert.
    pub fn register(
        &self,
        node_id: NodeId,
        public_key: PublicKey,
        endpoint: Endpoint,
    ) -> RegistryResult<(Upserted, Vec<PeerRecord>)> {
        let mut state = self.state.lock();
        let upserted = state.upsert(node_id, public_key, endpoint)?;
        Ok((upserted, state.snapshot()))
    }

    pub fn stats(&self) -> RegistryStats {
        self.state.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.state.lock().peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PeerRegistry {
    fn default() -> Self {
        Self::new(AddressSpace::default())
    }
}
