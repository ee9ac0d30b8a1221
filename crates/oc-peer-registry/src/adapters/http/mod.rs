//! # HTTP Binding
//!
//! Exposes the registry over HTTP/1.1 with JSON payloads.
//!
//! ## Routes
//!
//! - `POST /join` - Register or re-register, returns the full roster
//! - `GET /peers` - Current roster
//! - `GET /health` - Liveness plus registry counters
//!
//! The caller's address is taken from the accepted TCP connection, so the
//! router must be served with `into_make_service_with_connect_info`. Use
//! [`serve`] rather than wiring `axum::serve` by hand.

mod error;
mod routes;

pub use error::ApiError;
pub use routes::{router, serve};

#[cfg(test)]
mod tests;
