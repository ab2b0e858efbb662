//! Typed HTTP client for the commission backend.
//!
//! Each lifecycle action maps to exactly one HTTP call against the backend
//! REST API, and each call reduces to a three-way outcome: a typed success
//! payload, [`BackendError::Rejected`] when the backend turned the request
//! down with a structured reason, or [`BackendError::Unavailable`] for
//! everything the caller cannot act on (connection failure, timeout,
//! unexpected status or body shape).  The client never retries; re-issuing
//! is the caller's decision.

pub mod api;
pub mod error;
pub mod wire;

pub use api::{CommissionBackend, HttpBackend};
pub use error::BackendError;
