//! Error types for `stemlink-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::{
  lifecycle::MentorshipAction,
  mentorship::MentorshipStatus,
};

#[derive(Debug, Error)]
pub enum Error {
  /// A non-terminal mentorship already exists for this (student, mentor)
  /// pair. Deterministic and recoverable: re-fetch state and re-render.
  #[error("mentorship between student {student_id} and mentor {mentor_id} already open")]
  DuplicateRequest { student_id: Uuid, mentor_id: Uuid },

  /// The requested action is not legal from the mentorship's current status.
  #[error("cannot {action} a mentorship in status {status}")]
  InvalidTransition {
    status: MentorshipStatus,
    action: MentorshipAction,
  },

  /// A transition command for this mentorship has been dispatched and has
  /// not yet settled. The caller must wait for settlement, not re-dispatch.
  #[error("a transition for mentorship {0} is already in flight")]
  TransitionInFlight(Uuid),

  #[error("mentorship not found: {0}")]
  MentorshipNotFound(Uuid),

  /// Network or server-side failure with unknown resulting state. Never
  /// retried automatically; no transition is assumed to have succeeded.
  #[error("remote service failure: {message}")]
  Remote {
    /// HTTP status code, when the server answered at all.
    status:  Option<u16>,
    message: String,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  /// True for errors the caller can resolve locally by re-fetching current
  /// state and re-rendering affordances.
  pub fn is_recoverable(&self) -> bool {
    matches!(
      self,
      Self::DuplicateRequest { .. }
        | Self::InvalidTransition { .. }
        | Self::TransitionInFlight(_)
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
