//! [`MemoryService`] — the in-memory implementation of
//! [`MentorshipService`].

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use stemlink_core::{
  Error, Result,
  candidate::MentorCandidate,
  lifecycle::MentorshipAction,
  mentorship::{Mentorship, MentorshipStatus, PairKey},
  service::MentorshipService,
};

#[derive(Default)]
struct Inner {
  /// Append-only; a record is transitioned in place but never removed.
  records:    Vec<Mentorship>,
  candidates: Vec<MentorCandidate>,
}

/// A mentorship service held entirely in process memory.
///
/// Errors come straight from the `stemlink-core` taxonomy — this backend
/// has no transport failure modes of its own.
#[derive(Default)]
pub struct MemoryService {
  inner: Mutex<Inner>,
}

impl MemoryService {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seed the recommendation snapshot returned by
  /// [`MentorshipService::list_recommended_candidates`].
  pub async fn seed_candidates(&self, candidates: Vec<MentorCandidate>) {
    self.inner.lock().await.candidates = candidates;
  }

  /// Apply `action` to the record with `mentorship_id`, enforcing the
  /// state machine. Retrying an already-applied transition fails with the
  /// specific invalid-state error, never silently succeeds.
  async fn transition(
    &self,
    mentorship_id: Uuid,
    action: MentorshipAction,
  ) -> Result<Mentorship> {
    let mut inner = self.inner.lock().await;
    let record = inner
      .records
      .iter_mut()
      .find(|m| m.mentorship_id == mentorship_id)
      .ok_or(Error::MentorshipNotFound(mentorship_id))?;

    record.status = record.status.apply(action)?;
    if record.status == MentorshipStatus::Active {
      record.started_at = Some(Utc::now());
    }
    Ok(record.clone())
  }
}

impl MentorshipService for MemoryService {
  type Error = Error;

  async fn create_request(
    &self,
    student_id: Uuid,
    mentor_id: Uuid,
    message: Option<String>,
  ) -> Result<Mentorship> {
    let pair = PairKey::new(student_id, mentor_id);
    let mut inner = self.inner.lock().await;

    // At most one non-terminal record per pair, ever.
    if inner
      .records
      .iter()
      .any(|m| m.pair() == pair && m.status.is_open())
    {
      return Err(Error::DuplicateRequest {
        student_id,
        mentor_id,
      });
    }

    let record = Mentorship {
      mentorship_id: Uuid::new_v4(),
      student_id,
      mentor_id,
      status: MentorshipStatus::Pending,
      message,
      created_at: Utc::now(),
      started_at: None,
    };
    tracing::debug!(mentorship_id = %record.mentorship_id, "request recorded");
    inner.records.push(record.clone());
    Ok(record)
  }

  async fn accept_request(&self, mentorship_id: Uuid) -> Result<Mentorship> {
    self.transition(mentorship_id, MentorshipAction::Accept).await
  }

  async fn decline_request(&self, mentorship_id: Uuid) -> Result<Mentorship> {
    self
      .transition(mentorship_id, MentorshipAction::Decline)
      .await
  }

  async fn end_mentorship(&self, mentorship_id: Uuid) -> Result<Mentorship> {
    self.transition(mentorship_id, MentorshipAction::End).await
  }

  async fn list_my_mentorships(
    &self,
    status: Option<MentorshipStatus>,
  ) -> Result<Vec<Mentorship>> {
    let inner = self.inner.lock().await;
    Ok(
      inner
        .records
        .iter()
        .filter(|m| status.is_none_or(|s| m.status == s))
        .cloned()
        .collect(),
    )
  }

  async fn list_recommended_candidates(&self) -> Result<Vec<MentorCandidate>> {
    Ok(self.inner.lock().await.candidates.clone())
  }
}
