//! Join protocol: one registration attempt.

use crate::domain::{
    Endpoint, JoinRequest, PeerRecord, PeerRegistry, Registration, RegistryResult,
};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{error, info};

/// Outcome of a successful join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// The caller's stored record.
    pub record: PeerRecord,
    /// Whether the caller was new or re-joining.
    pub registration: Registration,
    /// Every registered node, the caller included.
    pub roster: Vec<PeerRecord>,
}

/// Derives the caller's endpoint and upserts it into the registry.
///
/// The declared port and public key are taken verbatim. There is no check
/// that the caller listens on that port or holds the matching private key.
#[derive(Debug, Clone)]
pub struct JoinProtocol {
    registry: Arc<PeerRegistry>,
}

impl JoinProtocol {
    pub fn new(registry: Arc<PeerRegistry>) -> Self {
        Self { registry }
    }

    /// Register the caller and return the full roster.
    ///
    /// Every successful join ships the whole roster back, so traffic per
    /// join grows with the peer count.
    pub fn join(&self, request: JoinRequest, observed_host: IpAddr) -> RegistryResult<JoinOutcome> {
        let JoinRequest {
            node_id,
            public_key,
            udp_port,
        } = request;
        let endpoint = Endpoint::from_observed(observed_host, udp_port);
        let pubkey_short = public_key.short();

        let (upserted, roster) = self
            .registry
            .register(node_id.clone(), public_key, endpoint)
            .inspect_err(|e| {
                error!(
                    node_id = %node_id,
                    remote = %observed_host,
                    error = %e,
                    "Join rejected"
                );
            })?;

        info!(
            node_id = %node_id,
            pubkey = %pubkey_short,
            remote = %endpoint.host(),
            udp_port,
            virtual_ip = %upserted.record.virtual_ip,
            registration = ?upserted.registration,
            total_peers = roster.len(),
            "Node registered"
        );

        Ok(JoinOutcome {
            record: upserted.record,
            registration: upserted.registration,
            roster,
        })
    }
}
