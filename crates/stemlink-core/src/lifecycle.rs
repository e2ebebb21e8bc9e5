//! The mentorship state machine and the derived capability view.
//!
//! ```text
//! (none) ──sendRequest──► PENDING
//! PENDING ──accept──► ACTIVE
//! PENDING ──decline──► DECLINED
//! DECLINED ──sendRequest──► PENDING      (re-request)
//! ACTIVE ──end──► COMPLETED
//! ```
//!
//! Transitions are computed here as pure functions; the remote service is
//! the authority on whether they actually apply. When the two disagree the
//! remote answer wins and the local snapshot is re-synced.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  mentorship::{Mentorship, MentorshipStatus, PairKey},
};

// ─── Actions ─────────────────────────────────────────────────────────────────

/// A state-changing command on an existing mentorship. Request creation is
/// not an action on a record — it creates one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentorshipAction {
  /// Mentor accepts a pending request; the mentorship becomes active.
  Accept,
  /// Mentor declines a pending request.
  Decline,
  /// Either party ends an active mentorship.
  End,
}

impl fmt::Display for MentorshipAction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Self::Accept => "accept",
      Self::Decline => "decline",
      Self::End => "end",
    };
    f.write_str(s)
  }
}

// ─── Transitions ─────────────────────────────────────────────────────────────

impl MentorshipStatus {
  /// Apply `action` to a mentorship in this status, yielding the successor
  /// status. Every combination outside the state machine is an
  /// [`Error::InvalidTransition`] — including a retried action on a record
  /// that has already left the source state (retrying `accept` on a
  /// declined request is a legitimate distinct error, not a no-op).
  pub fn apply(self, action: MentorshipAction) -> Result<Self> {
    match (self, action) {
      (Self::Pending, MentorshipAction::Accept) => Ok(Self::Active),
      (Self::Pending, MentorshipAction::Decline) => Ok(Self::Declined),
      (Self::Active, MentorshipAction::End) => Ok(Self::Completed),
      (status, action) => Err(Error::InvalidTransition { status, action }),
    }
  }
}

// ─── Newest-record resolution ────────────────────────────────────────────────

/// The newest mentorship record for `pair`, by `created_at` (later input
/// position wins ties, so a freshly appended re-request supersedes the
/// record it replaces even within one timestamp).
pub fn newest_for_pair(records: &[Mentorship], pair: PairKey) -> Option<&Mentorship> {
  records
    .iter()
    .filter(|m| m.pair() == pair)
    .max_by(|a, b| a.created_at.cmp(&b.created_at))
}

/// The newest known status per mentor, across all of the student's records.
/// This is the "sharper status" input to the ranking engine: a server-known
/// status takes precedence over the locally tracked requested flag.
pub fn newest_status_by_mentor(
  records: &[Mentorship],
) -> BTreeMap<Uuid, MentorshipStatus> {
  let mut newest: BTreeMap<Uuid, &Mentorship> = BTreeMap::new();
  for m in records {
    match newest.get(&m.mentor_id) {
      Some(existing) if existing.created_at > m.created_at => {}
      _ => {
        newest.insert(m.mentor_id, m);
      }
    }
  }
  newest.into_iter().map(|(id, m)| (id, m.status)).collect()
}

// ─── Capability view ─────────────────────────────────────────────────────────

/// Derived view of "can I act on this relationship, and how" — used by the
/// presentation layer to enable or disable affordances. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
  /// Status of the newest record for the pair, if any record exists.
  pub status:      Option<MentorshipStatus>,
  pub can_accept:  bool,
  pub can_decline: bool,
  pub can_end:     bool,
  pub can_request: bool,
}

impl Capabilities {
  /// Capabilities for a pair whose newest record has `status` (or no record
  /// at all). Re-request is legal from the terminal statuses and from a
  /// blank slate; decline never blocks future contact.
  pub fn for_status(status: Option<MentorshipStatus>) -> Self {
    match status {
      None => Self {
        status,
        can_accept: false,
        can_decline: false,
        can_end: false,
        can_request: true,
      },
      Some(s) => Self {
        status,
        can_accept: s == MentorshipStatus::Pending,
        can_decline: s == MentorshipStatus::Pending,
        can_end: s == MentorshipStatus::Active,
        can_request: s.is_terminal(),
      },
    }
  }

  /// Capabilities derived from the newest record for `pair` in `records`.
  pub fn for_pair(records: &[Mentorship], pair: PairKey) -> Self {
    Self::for_status(newest_for_pair(records, pair).map(|m| m.status))
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::{Duration, Utc};

  use super::*;

  fn record(
    pair: PairKey,
    status: MentorshipStatus,
    age_minutes: i64,
  ) -> Mentorship {
    Mentorship {
      mentorship_id: Uuid::new_v4(),
      student_id: pair.student_id,
      mentor_id: pair.mentor_id,
      status,
      message: None,
      created_at: Utc::now() - Duration::minutes(age_minutes),
      started_at: None,
    }
  }

  #[test]
  fn legal_transitions() {
    use MentorshipAction::*;
    use MentorshipStatus::*;

    assert_eq!(Pending.apply(Accept).unwrap(), Active);
    assert_eq!(Pending.apply(Decline).unwrap(), Declined);
    assert_eq!(Active.apply(End).unwrap(), Completed);
  }

  #[test]
  fn every_other_combination_is_invalid() {
    use MentorshipAction::*;
    use MentorshipStatus::*;

    let legal = [(Pending, Accept), (Pending, Decline), (Active, End)];
    for status in [Pending, Accepted, Active, Declined, Completed] {
      for action in [Accept, Decline, End] {
        if legal.contains(&(status, action)) {
          continue;
        }
        let err = status.apply(action).unwrap_err();
        assert!(
          matches!(err, Error::InvalidTransition { .. }),
          "({status}, {action}) should be invalid"
        );
      }
    }
  }

  #[test]
  fn accept_on_declined_is_an_error_not_a_noop() {
    let err = MentorshipStatus::Declined
      .apply(MentorshipAction::Accept)
      .unwrap_err();
    assert!(matches!(
      err,
      Error::InvalidTransition {
        status: MentorshipStatus::Declined,
        action: MentorshipAction::Accept,
      }
    ));
  }

  #[test]
  fn end_on_completed_is_invalid() {
    assert!(
      MentorshipStatus::Completed
        .apply(MentorshipAction::End)
        .is_err()
    );
  }

  #[test]
  fn capabilities_blank_slate_is_requestable_only() {
    let caps = Capabilities::for_status(None);
    assert!(caps.can_request);
    assert!(!caps.can_accept && !caps.can_decline && !caps.can_end);
  }

  #[test]
  fn capabilities_per_status() {
    use MentorshipStatus::*;

    let pending = Capabilities::for_status(Some(Pending));
    assert!(pending.can_accept && pending.can_decline);
    assert!(!pending.can_end && !pending.can_request);

    let active = Capabilities::for_status(Some(Active));
    assert!(active.can_end);
    assert!(!active.can_accept && !active.can_decline && !active.can_request);

    let declined = Capabilities::for_status(Some(Declined));
    assert!(declined.can_request);
    assert!(!declined.can_accept && !declined.can_decline && !declined.can_end);

    let completed = Capabilities::for_status(Some(Completed));
    assert!(completed.can_request);

    // Accepted is non-terminal but not yet endable.
    let accepted = Capabilities::for_status(Some(Accepted));
    assert!(
      !accepted.can_accept
        && !accepted.can_decline
        && !accepted.can_end
        && !accepted.can_request
    );
  }

  #[test]
  fn newest_record_governs_the_pair() {
    let pair = PairKey::new(Uuid::new_v4(), Uuid::new_v4());
    let records = vec![
      record(pair, MentorshipStatus::Declined, 60),
      record(pair, MentorshipStatus::Pending, 5),
    ];

    let newest = newest_for_pair(&records, pair).unwrap();
    assert_eq!(newest.status, MentorshipStatus::Pending);

    // A re-request after decline renders as a fresh pending pair.
    let caps = Capabilities::for_pair(&records, pair);
    assert_eq!(caps.status, Some(MentorshipStatus::Pending));
    assert!(!caps.can_request);
  }

  #[test]
  fn newest_status_by_mentor_picks_latest_record() {
    let student = Uuid::new_v4();
    let mentor = Uuid::new_v4();
    let pair = PairKey::new(student, mentor);
    let records = vec![
      record(pair, MentorshipStatus::Declined, 120),
      record(pair, MentorshipStatus::Active, 10),
    ];

    let statuses = newest_status_by_mentor(&records);
    assert_eq!(statuses.get(&mentor), Some(&MentorshipStatus::Active));
  }
}
