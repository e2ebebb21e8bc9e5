//! The requested-mentor set used for optimistic duplicate-request locking.
//!
//! An explicit value threaded through calls, not ambient state. The caller
//! inserts a mentor optimistically at submission time and removes it again
//! if the remote call fails; [`RequestedSet::from_records`] rebuilds the
//! confirmed baseline from the last synced server snapshot.

use std::collections::BTreeSet;

use uuid::Uuid;

use crate::mentorship::Mentorship;

/// Mentor ids the current student has requested — either in this session
/// (optimistic, awaiting confirmation) or per the last known server state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestedSet(BTreeSet<Uuid>);

impl RequestedSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// The confirmed baseline: every mentor with a non-terminal record.
  pub fn from_records(records: &[Mentorship]) -> Self {
    Self(
      records
        .iter()
        .filter(|m| m.status.is_open())
        .map(|m| m.mentor_id)
        .collect(),
    )
  }

  pub fn contains(&self, mentor_id: Uuid) -> bool {
    self.0.contains(&mentor_id)
  }

  /// Optimistically mark `mentor_id` as requested. Returns `false` if it
  /// was already present.
  pub fn insert(&mut self, mentor_id: Uuid) -> bool {
    self.0.insert(mentor_id)
  }

  /// Roll back an optimistic insertion after a failed remote call.
  pub fn remove(&mut self, mentor_id: Uuid) -> bool {
    self.0.remove(&mentor_id)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Uuid> {
    self.0.iter()
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::mentorship::MentorshipStatus;

  fn record(mentor_id: Uuid, status: MentorshipStatus) -> Mentorship {
    Mentorship {
      mentorship_id: Uuid::new_v4(),
      student_id: Uuid::new_v4(),
      mentor_id,
      status,
      message: None,
      created_at: Utc::now(),
      started_at: None,
    }
  }

  #[test]
  fn baseline_contains_only_open_records() {
    let pending = Uuid::new_v4();
    let active = Uuid::new_v4();
    let declined = Uuid::new_v4();
    let records = vec![
      record(pending, MentorshipStatus::Pending),
      record(active, MentorshipStatus::Active),
      record(declined, MentorshipStatus::Declined),
    ];

    let set = RequestedSet::from_records(&records);
    assert!(set.contains(pending));
    assert!(set.contains(active));
    assert!(!set.contains(declined));
    assert_eq!(set.len(), 2);
  }

  #[test]
  fn insert_then_rollback_restores_baseline() {
    let mut set = RequestedSet::new();
    let mentor = Uuid::new_v4();

    assert!(set.insert(mentor));
    assert!(!set.insert(mentor));
    assert!(set.contains(mentor));

    set.remove(mentor);
    assert!(set.is_empty());
  }
}
