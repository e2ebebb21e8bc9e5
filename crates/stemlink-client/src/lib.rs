//! Async HTTP client for the StemLink mentorship REST API.
//!
//! Implements [`stemlink_core::service::MentorshipService`] over
//! [`reqwest`], so the lifecycle manager runs unchanged against the real
//! backend. Transport and server errors are mapped onto the core error
//! taxonomy; the exact wire format is owned by the backend, and the DTOs
//! here tolerate its envelope variants.

mod client;
mod wire;

pub use client::{ApiClient, ApiConfig};
