//! Adapters - production implementations of the ports plus the HTTP layer.

pub mod http;
pub mod postgres;
pub mod stripe;
