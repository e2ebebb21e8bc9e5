//! Mentor candidates — the recommendation projection.
//!
//! Candidate and score data are owned by the external recommendation
//! service and treated as read-only input. The derived `request_status`
//! annotation is owned exclusively by the ranking engine.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::mentorship::MentorshipStatus;

// ─── Candidate ───────────────────────────────────────────────────────────────

/// A mentor candidate with raw compatibility signals.
///
/// The serde aliases tolerate the backend's older field spellings
/// (`matchingScore`, `matchingCriteria`); missing score and criteria
/// default to 0 and empty respectively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorCandidate {
  /// The underlying mentor's account id. The backend spells this `_id`.
  #[serde(alias = "_id", alias = "id")]
  pub user_id:        Uuid,
  #[serde(default)]
  pub first_name:     String,
  #[serde(default)]
  pub last_name:      String,
  /// Compatibility score in [0, 100].
  #[serde(default, alias = "matchingScore")]
  pub match_score:    f64,
  /// Human-readable reasons for the score, most significant first.
  #[serde(default, alias = "matchingCriteria")]
  pub match_criteria: Vec<String>,
  /// Derived, transient annotation — populated by the ranking engine,
  /// never part of the candidate's stored identity.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub request_status: Option<MentorshipStatus>,
}

impl MentorCandidate {
  /// "First Last" — the key for name ordering.
  pub fn display_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }

  /// A candidate with no prior contact is requestable.
  pub fn is_requestable(&self) -> bool {
    match self.request_status {
      None => true,
      Some(s) => s.is_terminal(),
    }
  }
}

// ─── Sort key ────────────────────────────────────────────────────────────────

/// Ordering requested by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
  /// Descending score; ties keep input order.
  #[default]
  MatchScore,
  /// Ascending case-insensitive "first last".
  Name,
}

impl FromStr for SortKey {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "matchScore" | "match-score" | "score" => Ok(Self::MatchScore),
      "name" => Ok(Self::Name),
      other => Err(format!("unknown sort key: {other}")),
    }
  }
}
