//! Adapters connecting the registry to the outside world.

pub mod http;
