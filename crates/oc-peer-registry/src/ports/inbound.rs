//! # Driving Ports (Inbound API)
//!
//! The operations a transport binding exposes to overlay nodes.

use crate::domain::{JoinRequest, PeerRecord, RegistryError, RegistryStats};
use crate::service::JoinOutcome;
use std::net::IpAddr;

/// Primary API for interacting with the peer registry.
///
/// Implementations must be shareable across request handlers running on
/// different threads.
///
/// # Example
///
/// ```rust,ignore
/// use oc_peer_registry::ports::PeerRegistryApi;
///
/// fn print_roster<T: PeerRegistryApi>(api: &T) {
///     for peer in api.peers() {
///         println!("{} -> {}", peer.node_id, peer.virtual_ip);
///     }
/// }
/// ```
pub trait PeerRegistryApi: Send + Sync {
    /// Register (or re-register) a node.
    ///
    /// # Arguments
    ///
    /// * `request` - Claimed node id, public key and declared UDP port
    /// * `observed_host` - Caller address as seen by the transport, port stripped
    ///
    /// # Returns
    ///
    /// The stored record plus the full roster after this join.
    ///
    /// # Errors
    ///
    /// `AddressSpaceExhausted` when a new node id arrives and no address is
    /// left. The registry is unchanged in that case.
    fn join(&self, request: JoinRequest, observed_host: IpAddr) -> Result<JoinOutcome, RegistryError>;

    /// Current roster. Never fails and never mutates.
    fn peers(&self) -> Vec<PeerRecord>;

    /// Peer count and allocation counters.
    fn stats(&self) -> RegistryStats;
}
