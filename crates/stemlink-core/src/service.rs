//! The `MentorshipService` trait — the remote relationship service seam.
//!
//! Implemented by transport backends (`stemlink-client` over HTTP,
//! `stemlink-service-mem` in process). Higher layers — the lifecycle
//! manager, the CLI — depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  candidate::MentorCandidate,
  mentorship::{Mentorship, MentorshipStatus},
};

/// Abstraction over the remote mentorship-relationship service.
///
/// Commands are not retried by callers: on a [`crate::Error::Remote`] the
/// resulting state is unknown, and a retried `accept` on an already-handled
/// request is a legitimate distinct error rather than a transient fault.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait MentorshipService: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create a mentorship request from `student_id` to `mentor_id`.
  ///
  /// Fails with a duplicate-request conflict if a non-terminal mentorship
  /// already exists for the pair. After a terminal record, this creates a
  /// fresh `PENDING` record that supersedes it.
  fn create_request(
    &self,
    student_id: Uuid,
    mentor_id: Uuid,
    message: Option<String>,
  ) -> impl Future<Output = Result<Mentorship, Self::Error>> + Send + '_;

  /// Accept a pending request; the mentorship becomes active.
  /// Fails with an invalid-state error unless the record is `PENDING`.
  fn accept_request(
    &self,
    mentorship_id: Uuid,
  ) -> impl Future<Output = Result<Mentorship, Self::Error>> + Send + '_;

  /// Decline a pending request.
  /// Fails with an invalid-state error unless the record is `PENDING`.
  fn decline_request(
    &self,
    mentorship_id: Uuid,
  ) -> impl Future<Output = Result<Mentorship, Self::Error>> + Send + '_;

  /// End an active mentorship.
  /// Fails with an invalid-state error unless the record is `ACTIVE`.
  fn end_mentorship(
    &self,
    mentorship_id: Uuid,
  ) -> impl Future<Output = Result<Mentorship, Self::Error>> + Send + '_;

  /// List the calling user's mentorship records, optionally filtered by
  /// status. Terminal records are retained and returned alongside open
  /// ones.
  fn list_my_mentorships(
    &self,
    status: Option<MentorshipStatus>,
  ) -> impl Future<Output = Result<Vec<Mentorship>, Self::Error>> + Send + '_;

  /// Fetch the recommendation snapshot for the calling student. Raw input
  /// to the ranking engine; may contain duplicates and missing scores.
  fn list_recommended_candidates(
    &self,
  ) -> impl Future<Output = Result<Vec<MentorCandidate>, Self::Error>> + Send + '_;
}
