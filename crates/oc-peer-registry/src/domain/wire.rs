//! Response bodies shared by the HTTP binding and its clients.
//!
//! These stay outside the `http` feature so a client can decode them without
//! pulling in the server stack.

use serde::{Deserialize, Serialize};

/// JSON body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable machine-readable kind, e.g. `"malformed_request"`.
    pub error: String,
    /// Human-readable detail.
    pub detail: String,
}

/// `GET /health` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthBody {
    pub status: String,
    pub service: String,
    pub version: String,
    pub peers: usize,
    pub addresses_allocated: u32,
    pub addresses_remaining: u32,
}
