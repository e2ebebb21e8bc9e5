//! Core types and trait definitions for the StemLink mentorship client.
//!
//! This crate is deliberately free of HTTP and transport dependencies.
//! It owns the mentorship lifecycle state machine, the recommendation
//! ranking engine, and the [`service::MentorshipService`] abstraction that
//! concrete backends (the HTTP client, the in-memory reference service)
//! implement.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod candidate;
pub mod error;
pub mod lifecycle;
pub mod manager;
pub mod mentorship;
pub mod rank;
pub mod requested;
pub mod service;

pub use error::{Error, Result};
