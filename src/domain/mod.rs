//! Domain types: orders, subscribers, and webhook verification.

pub mod order;
pub mod subscriber;
pub mod webhook;
