//! Domain Errors for the Peer Registry

use std::net::Ipv4Addr;

/// Errors raised by the registry and its address allocator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Every assignable address in the space has been handed out.
    ///
    /// Raised before any state is touched: the counter does not advance and
    /// no record is inserted.
    #[error("address space {network}/{prefix_len} exhausted after {capacity} allocations")]
    AddressSpaceExhausted {
        network: Ipv4Addr,
        prefix_len: u8,
        capacity: u32,
    },

    /// Address space configuration rejected at construction.
    #[error("invalid address space: {0}")]
    InvalidAddressSpace(String),
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
