//! Mentorship — the tracked connection between one student and one mentor.
//!
//! Records are append-only: a mentorship is never deleted, only transitioned.
//! After a terminal status a fresh request creates a new record for the same
//! pair; the newest record governs presentation.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Status ──────────────────────────────────────────────────────────────────

/// The lifecycle status of a mentorship, as reported by the relationship
/// service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MentorshipStatus {
  /// Requested by the student, awaiting the mentor's answer.
  Pending,
  /// Accepted by the mentor but not yet activated by the server.
  /// Treated as non-terminal, like [`Active`](Self::Active).
  Accepted,
  Active,
  Declined,
  Completed,
}

impl MentorshipStatus {
  /// Terminal statuses admit no further transition except re-request.
  pub fn is_terminal(self) -> bool {
    matches!(self, Self::Declined | Self::Completed)
  }

  /// A non-terminal record blocks creation of a new request for the pair.
  pub fn is_open(self) -> bool {
    !self.is_terminal()
  }
}

impl fmt::Display for MentorshipStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Self::Pending => "PENDING",
      Self::Accepted => "ACCEPTED",
      Self::Active => "ACTIVE",
      Self::Declined => "DECLINED",
      Self::Completed => "COMPLETED",
    };
    f.write_str(s)
  }
}

impl FromStr for MentorshipStatus {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_uppercase().as_str() {
      "PENDING" => Ok(Self::Pending),
      "ACCEPTED" => Ok(Self::Accepted),
      "ACTIVE" => Ok(Self::Active),
      "DECLINED" => Ok(Self::Declined),
      "COMPLETED" => Ok(Self::Completed),
      other => Err(format!("unknown mentorship status: {other}")),
    }
  }
}

// ─── Pair identity ───────────────────────────────────────────────────────────

/// Identity of a relationship pair. At most one non-terminal mentorship may
/// exist per pair at any time.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PairKey {
  pub student_id: Uuid,
  pub mentor_id:  Uuid,
}

impl PairKey {
  pub fn new(student_id: Uuid, mentor_id: Uuid) -> Self {
    Self {
      student_id,
      mentor_id,
    }
  }
}

// ─── Mentorship record ───────────────────────────────────────────────────────

/// A single mentorship record between one student and one mentor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentorship {
  /// The backend spells this `_id`; both spellings are accepted.
  #[serde(alias = "_id", alias = "id")]
  pub mentorship_id: Uuid,
  pub student_id:    Uuid,
  pub mentor_id:     Uuid,
  pub status:        MentorshipStatus,
  /// Free-text rationale supplied by the requesting student.
  #[serde(default)]
  pub message:       Option<String>,
  /// When the request was created — distinct from when it became active.
  pub created_at:    DateTime<Utc>,
  /// Set by the server when the mentorship transitions to `Active`.
  #[serde(default)]
  pub started_at:    Option<DateTime<Utc>>,
}

impl Mentorship {
  pub fn pair(&self) -> PairKey {
    PairKey::new(self.student_id, self.mentor_id)
  }
}
