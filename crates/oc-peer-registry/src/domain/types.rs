//! Core Domain Types for the Peer Registry
//!
//! These types double as the JSON wire shape: a `PeerRecord` serializes to
//! `{ "node_id", "pubkey_b64", "endpoint", "virtual_ip" }`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Caller-supplied node identifier.
///
/// Opaque string and the registry's primary key. Uniqueness is asserted by
/// the caller and never verified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a NodeId from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Base64 public key as sent by the node.
///
/// Stored verbatim. Never decoded, length-checked or used to authenticate
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicKey(pub String);

impl PublicKey {
    /// Number of characters shown by [`PublicKey::short`].
    pub const SHORT_LEN: usize = 8;

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for log lines, e.g. `"cHVia2V5..."`.
    ///
    /// Keys shorter than [`Self::SHORT_LEN`] are shown whole.
    pub fn short(&self) -> String {
        let prefix: String = self.0.chars().take(Self::SHORT_LEN).collect();
        if prefix.len() < self.0.len() {
            format!("{}...", prefix)
        } else {
            prefix
        }
    }
}

/// Real-world address a node can be reached at.
///
/// Built from the caller's observed host and the port it declared, and
/// serialized as `"host:port"` (`"[v6]:port"` for IPv6 hosts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoint(pub SocketAddr);

impl Endpoint {
    /// Combine the transport-observed host with the declared UDP port.
    ///
    /// IPv4-mapped IPv6 hosts (`::ffff:a.b.c.d`, seen on dual-stack
    /// listeners) are folded back to plain IPv4.
    pub fn from_observed(host: IpAddr, udp_port: u16) -> Self {
        Self(SocketAddr::new(host.to_canonical(), udp_port))
    }

    pub fn host(&self) -> IpAddr {
        self.0.ip()
    }

    pub fn port(&self) -> u16 {
        self.0.port()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Private overlay address, serialized as `"a.b.c.d"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VirtualAddress(pub Ipv4Addr);

impl VirtualAddress {
    pub fn new(addr: Ipv4Addr) -> Self {
        Self(addr)
    }

    pub fn addr(&self) -> Ipv4Addr {
        self.0
    }
}

impl fmt::Display for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One registered node: the unit of storage and of every roster response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerRecord {
    pub node_id: NodeId,
    #[serde(rename = "pubkey_b64")]
    pub public_key: PublicKey,
    pub endpoint: Endpoint,
    pub virtual_ip: VirtualAddress,
}

/// Body of a `POST /join` request.
///
/// All three fields are required; `udp_port` must fit in 0..=65535.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    pub node_id: NodeId,
    #[serde(rename = "pubkey_b64")]
    pub public_key: PublicKey,
    pub udp_port: u16,
}

impl JoinRequest {
    pub fn new(node_id: impl Into<String>, public_key: impl Into<String>, udp_port: u16) -> Self {
        Self {
            node_id: NodeId::new(node_id),
            public_key: PublicKey::new(public_key),
            udp_port,
        }
    }
}
