//! HTTP client for the controller's `/join`, `/peers` and `/health` endpoints.

mod client;

pub use client::{ClientError, RegistryClient};
