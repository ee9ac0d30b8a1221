//! Virtual address allocator.
//!
//! Hands out addresses from an [`AddressSpace`] in strictly increasing order.
//! Addresses are never released, so the k-th successful allocation since
//! process start is always `first_host + k - 1`.

use super::config::AddressSpace;
use super::errors::{RegistryError, RegistryResult};
use super::types::VirtualAddress;

/// Monotonic allocator over a fixed address space.
///
/// Has no locking of its own; the [`PeerRegistry`](super::PeerRegistry) only
/// calls it while holding its exclusive lock.
#[derive(Debug, Clone)]
pub struct AddressAllocator {
    space: AddressSpace,
    next_index: u32,
}

impl AddressAllocator {
    pub fn new(space: AddressSpace) -> Self {
        Self {
            space,
            next_index: 0,
        }
    }

    /// Issue the next address.
    ///
    /// Returns `AddressSpaceExhausted` once the last host below broadcast has
    /// been issued. A failed call leaves the allocator unchanged.
    pub fn allocate(&mut self) -> RegistryResult<VirtualAddress> {
        let addr = self
            .space
            .nth(self.next_index)
            .ok_or_else(|| RegistryError::AddressSpaceExhausted {
                network: self.space.network(),
                prefix_len: self.space.prefix_len(),
                capacity: self.space.capacity(),
            })?;
        self.next_index += 1;
        Ok(VirtualAddress::new(addr))
    }

    /// Addresses issued so far.
    pub fn allocated(&self) -> u32 {
        self.next_index
    }

    /// Addresses still available.
    pub fn remaining(&self) -> u32 {
        self.space.capacity() - self.next_index
    }

    pub fn space(&self) -> &AddressSpace {
        &self.space
    }
}

impl Default for AddressAllocator {
    fn default() -> Self {
        Self::new(AddressSpace::default())
    }
}
