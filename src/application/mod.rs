//! Application layer - use-case handlers wiring domain logic to ports.

pub mod catalog;
pub mod checkout;
pub mod reconcile;
