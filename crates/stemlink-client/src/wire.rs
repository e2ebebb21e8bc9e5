//! Wire DTOs for the mentorship API.
//!
//! The backend wraps payloads inconsistently — sometimes a bare object or
//! array, sometimes `{"mentorship": ...}` / `{"mentorships": [...]}` /
//! `{"recommendations": [...]}`. The untagged envelopes here accept every
//! observed shape.

use serde::{Deserialize, Serialize};
use stemlink_core::{candidate::MentorCandidate, mentorship::Mentorship};
use uuid::Uuid;

// ─── Request bodies ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequestBody {
  pub mentor_id: Uuid,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message:   Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorshipIdBody {
  pub mentorship_id: Uuid,
}

// ─── Response envelopes ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MentorshipEnvelope {
  Wrapped { mentorship: Mentorship },
  Bare(Mentorship),
}

impl MentorshipEnvelope {
  pub fn into_inner(self) -> Mentorship {
    match self {
      Self::Wrapped { mentorship } => mentorship,
      Self::Bare(m) => m,
    }
  }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MentorshipListEnvelope {
  Wrapped { mentorships: Vec<Mentorship> },
  Bare(Vec<Mentorship>),
}

impl MentorshipListEnvelope {
  pub fn into_inner(self) -> Vec<Mentorship> {
    match self {
      Self::Wrapped { mentorships } => mentorships,
      Self::Bare(list) => list,
    }
  }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CandidateListEnvelope {
  Recommendations {
    recommendations: Vec<MentorCandidate>,
  },
  Mentors {
    mentors: Vec<MentorCandidate>,
  },
  Bare(Vec<MentorCandidate>),
}

impl CandidateListEnvelope {
  pub fn into_inner(self) -> Vec<MentorCandidate> {
    match self {
      Self::Recommendations { recommendations } => recommendations,
      Self::Mentors { mentors } => mentors,
      Self::Bare(list) => list,
    }
  }
}

/// Error payload: the backend uses `error` on some routes and `message` on
/// others.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
  #[serde(default)]
  pub error:   Option<String>,
  #[serde(default)]
  pub message: Option<String>,
}

impl ErrorBody {
  pub fn into_message(self) -> Option<String> {
    self.error.or(self.message)
  }
}
