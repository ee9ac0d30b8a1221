//! OC-Admin: command-line client for the overlay controller.
//!
//! ```text
//! oc-admin join --node-id edge-1 --pubkey ZWRnZS0x --udp-port 51820
//! oc-admin peers
//! oc-admin health
//! ```
//!
//! `join` performs the same registration a node agent would and prints the
//! roster it gets back. `peers` and `health` are read-only.

pub mod api;
pub mod display;

pub use api::{ClientError, RegistryClient};
