//! # darzi-backend: REST Gateway for Darzi
//!
//! Typed async client for the shop backend's REST collaborators.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apps/admin ──► BackendApi (trait) ──► HttpBackend ──► shop backend     │
//! │                      ▲                                                  │
//! │                      └── in-memory double in tests                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Response-shape normalization for bill creation deliberately does NOT live
//! here: `create_bill` hands back the raw JSON and `darzi_core::assemble`
//! owns the drifted-field handling.

pub mod api;
pub mod client;
pub mod error;

pub use api::{
    BackendApi, BillFilter, BillPayload, CustomerPayload, DeleteCustomerResponse, UpiSettings,
};
pub use client::HttpBackend;
pub use error::{BackendError, BackendResult};
