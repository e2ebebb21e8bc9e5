//! The mentorship lifecycle manager.
//!
//! Owns the client-side view of one student's mentorships: the last
//! confirmed server snapshot, the optimistic requested-mentor set, and the
//! per-relationship in-flight guard. All remote effects go through the
//! [`MentorshipService`] seam; the manager never assumes a transition
//! succeeded unless the remote response confirms it.

use std::collections::{BTreeMap, BTreeSet};

use uuid::Uuid;

use crate::{
  Error, Result,
  candidate::{MentorCandidate, SortKey},
  lifecycle::{Capabilities, MentorshipAction, newest_status_by_mentor},
  mentorship::{Mentorship, MentorshipStatus, PairKey},
  rank::rank,
  requested::RequestedSet,
  service::MentorshipService,
};

/// Client-side coordinator for a single student's mentorship relationships.
///
/// Operations run to completion without preemption; overlapping transitions
/// for the *same* relationship are refused via the in-flight guard rather
/// than dispatched. Independent relationships do not share mutable state
/// beyond the snapshot and are free to transition back to back.
pub struct MentorshipManager<S> {
  service:    S,
  student_id: Uuid,
  /// Last confirmed server snapshot, append-only within a session.
  records:    Vec<Mentorship>,
  /// Optimistic duplicate-request lock; rolled back on remote failure.
  requested:  RequestedSet,
  /// Mentorship ids with an outstanding transition command. Cleared when
  /// the command settles, success or failure.
  in_flight:  BTreeSet<Uuid>,
}

impl<S> MentorshipManager<S>
where
  S: MentorshipService,
  S::Error: Into<Error>,
{
  pub fn new(service: S, student_id: Uuid) -> Self {
    Self {
      service,
      student_id,
      records: Vec::new(),
      requested: RequestedSet::new(),
      in_flight: BTreeSet::new(),
    }
  }

  pub fn student_id(&self) -> Uuid {
    self.student_id
  }

  /// The last confirmed snapshot. Empty until the first [`sync`](Self::sync).
  pub fn records(&self) -> &[Mentorship] {
    &self.records
  }

  pub fn requested(&self) -> &RequestedSet {
    &self.requested
  }

  // ── Synchronisation ───────────────────────────────────────────────────

  /// Re-fetch the full relationship list and rebuild local state from it.
  /// This is the rollback baseline: any optimistic marks not confirmed by
  /// the server are discarded.
  pub async fn sync(&mut self) -> Result<&[Mentorship]> {
    let records = self
      .service
      .list_my_mentorships(None)
      .await
      .map_err(Into::into)?;

    tracing::debug!(count = records.len(), "synced mentorship snapshot");
    self.requested = RequestedSet::from_records(&records);
    self.records = records;
    Ok(&self.records)
  }

  // ── Request creation ──────────────────────────────────────────────────

  /// Send a mentorship request to `mentor_id`.
  ///
  /// Guards locally before dispatch: a mentor already in the requested set
  /// or with a known non-terminal record yields [`Error::DuplicateRequest`]
  /// without a network round trip. The requested set is updated
  /// optimistically at dispatch time and rolled back if the remote call
  /// fails.
  pub async fn send_request(
    &mut self,
    mentor_id: Uuid,
    message: Option<String>,
  ) -> Result<Mentorship> {
    let pair = PairKey::new(self.student_id, mentor_id);
    if self.requested.contains(mentor_id)
      || !Capabilities::for_pair(&self.records, pair).can_request
    {
      return Err(Error::DuplicateRequest {
        student_id: self.student_id,
        mentor_id,
      });
    }

    // Optimistic lock: from here the affordance already reads as requested.
    self.requested.insert(mentor_id);

    match self
      .service
      .create_request(self.student_id, mentor_id, message)
      .await
    {
      Ok(record) => {
        tracing::info!(
          mentorship_id = %record.mentorship_id,
          mentor_id = %mentor_id,
          "mentorship request created"
        );
        self.reconcile(record.clone());
        Ok(record)
      }
      Err(e) => {
        // Roll back to the last confirmed state.
        self.requested.remove(mentor_id);
        let e = e.into();
        tracing::warn!(mentor_id = %mentor_id, error = %e, "request failed");
        Err(e)
      }
    }
  }

  // ── Transitions ───────────────────────────────────────────────────────

  /// Accept a pending request (mentor side).
  pub async fn accept(&mut self, mentorship_id: Uuid) -> Result<Mentorship> {
    self
      .transition(mentorship_id, MentorshipAction::Accept)
      .await
  }

  /// Decline a pending request (mentor side). Decline is terminal but does
  /// not block a later re-request from the student.
  pub async fn decline(&mut self, mentorship_id: Uuid) -> Result<Mentorship> {
    self
      .transition(mentorship_id, MentorshipAction::Decline)
      .await
  }

  /// End an active mentorship (either party).
  pub async fn end(&mut self, mentorship_id: Uuid) -> Result<Mentorship> {
    self.transition(mentorship_id, MentorshipAction::End).await
  }

  async fn transition(
    &mut self,
    mentorship_id: Uuid,
    action: MentorshipAction,
  ) -> Result<Mentorship> {
    if self.in_flight.contains(&mentorship_id) {
      return Err(Error::TransitionInFlight(mentorship_id));
    }

    // Fail fast on transitions the last snapshot already rules out. The
    // remote side stays authoritative for records we have not seen or that
    // moved since the last sync.
    if let Some(known) = self
      .records
      .iter()
      .find(|m| m.mentorship_id == mentorship_id)
    {
      known.status.apply(action)?;
    }

    self.in_flight.insert(mentorship_id);
    let result = match action {
      MentorshipAction::Accept => {
        self.service.accept_request(mentorship_id).await
      }
      MentorshipAction::Decline => {
        self.service.decline_request(mentorship_id).await
      }
      MentorshipAction::End => self.service.end_mentorship(mentorship_id).await,
    };
    self.in_flight.remove(&mentorship_id);

    match result {
      Ok(record) => {
        tracing::info!(
          mentorship_id = %mentorship_id,
          action = %action,
          status = %record.status,
          "transition applied"
        );
        self.reconcile(record.clone());
        Ok(record)
      }
      Err(e) => {
        let e = e.into();
        tracing::warn!(
          mentorship_id = %mentorship_id,
          action = %action,
          error = %e,
          "transition failed; status unknown, not assuming success"
        );
        Err(e)
      }
    }
  }

  /// Fold a confirmed record into the local snapshot and keep the
  /// requested set consistent with it.
  fn reconcile(&mut self, record: Mentorship) {
    if record.status.is_open() {
      self.requested.insert(record.mentor_id);
    } else {
      self.requested.remove(record.mentor_id);
    }

    match self
      .records
      .iter_mut()
      .find(|m| m.mentorship_id == record.mentorship_id)
    {
      Some(existing) => *existing = record,
      None => self.records.push(record),
    }
  }

  // ── Derived views ─────────────────────────────────────────────────────

  /// The capability view for the pair (this student, `mentor_id`), derived
  /// from the newest record in the last confirmed snapshot.
  pub fn relationship_state(&self, mentor_id: Uuid) -> Capabilities {
    Capabilities::for_pair(
      &self.records,
      PairKey::new(self.student_id, mentor_id),
    )
  }

  /// Newest known status per mentor, from the last confirmed snapshot.
  pub fn known_statuses(&self) -> BTreeMap<Uuid, MentorshipStatus> {
    newest_status_by_mentor(&self.records)
  }

  /// Fetch the recommendation snapshot and return it ranked, de-duplicated,
  /// and annotated with each candidate's request status.
  pub async fn ranked_recommendations(
    &self,
    sort_key: SortKey,
  ) -> Result<Vec<MentorCandidate>> {
    let candidates = self
      .service
      .list_recommended_candidates()
      .await
      .map_err(Into::into)?;

    tracing::debug!(count = candidates.len(), ?sort_key, "ranking candidates");
    Ok(rank(
      candidates,
      sort_key,
      &self.requested,
      &self.known_statuses(),
    ))
  }
}
