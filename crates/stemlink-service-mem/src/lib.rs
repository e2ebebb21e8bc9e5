//! In-memory reference implementation of the mentorship-relationship
//! service.
//!
//! Enforces the same rules as the remote backend — conflict on a duplicate
//! non-terminal pair, invalid-state on bad transitions — so the lifecycle
//! manager and ranking engine can be exercised end to end without a
//! network. Also used by the CLI's offline mode.
//!
//! Records are append-only: terminal mentorships are retained forever and
//! a re-request appends a fresh record rather than mutating the old one.

mod service;

pub use service::MemoryService;
