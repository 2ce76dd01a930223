//! MySite API - email subscribers and Stripe-backed payment orders.
//!
//! The interesting part of this crate is the payment-webhook ingestion flow:
//! signature verification over the raw request bytes, followed by idempotent
//! order reconciliation against PostgreSQL. Everything else is thin CRUD glue.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
