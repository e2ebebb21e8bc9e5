//! The recommendation ranking engine.
//!
//! [`rank`] is a pure function of its inputs: identical inputs always
//! produce identical output order and annotations. No clock, no randomness,
//! no time-dependent tie-breaking.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::{
  candidate::{MentorCandidate, SortKey},
  mentorship::MentorshipStatus,
  requested::RequestedSet,
};

/// Order, de-duplicate, and annotate a snapshot of mentor candidates.
///
/// - Duplicate `user_id`s collapse to the entry with the higher score
///   (first occurrence wins a tie); the survivor keeps the first
///   occurrence's input position, so stable tie-breaking stays meaningful.
/// - `known_statuses` is the newest server-reported status per mentor and
///   takes precedence over the locally tracked `requested` flag; a mentor
///   in `requested` with no sharper status is annotated `PENDING`; anyone
///   else carries no annotation and is requestable.
/// - Score ordering is descending and stable; name ordering is ascending
///   case-insensitive on "first last".
pub fn rank(
  candidates: Vec<MentorCandidate>,
  sort_key: SortKey,
  requested: &RequestedSet,
  known_statuses: &BTreeMap<Uuid, MentorshipStatus>,
) -> Vec<MentorCandidate> {
  // Collapse duplicates, keeping the first occurrence's position.
  let mut by_id: BTreeMap<Uuid, usize> = BTreeMap::new();
  let mut out: Vec<MentorCandidate> = Vec::with_capacity(candidates.len());
  for candidate in candidates {
    match by_id.get(&candidate.user_id) {
      Some(&idx) => {
        if candidate.match_score > out[idx].match_score {
          out[idx] = candidate;
        }
      }
      None => {
        by_id.insert(candidate.user_id, out.len());
        out.push(candidate);
      }
    }
  }

  // Annotate: server-known status beats the optimistic requested flag.
  for candidate in &mut out {
    candidate.request_status = match known_statuses.get(&candidate.user_id) {
      Some(&status) => Some(status),
      None if requested.contains(candidate.user_id) => {
        Some(MentorshipStatus::Pending)
      }
      None => None,
    };
  }

  // `sort_by` is stable, so equal keys keep input order.
  match sort_key {
    SortKey::MatchScore => {
      out.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    }
    SortKey::Name => {
      out.sort_by_key(|c| c.display_name().to_lowercase());
    }
  }

  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn candidate(user_id: Uuid, name: &str, score: f64) -> MentorCandidate {
    let (first, last) = name.split_once(' ').unwrap_or((name, ""));
    MentorCandidate {
      user_id,
      first_name: first.to_string(),
      last_name: last.to_string(),
      match_score: score,
      match_criteria: vec![],
      request_status: None,
    }
  }

  fn ids(ranked: &[MentorCandidate]) -> Vec<Uuid> {
    ranked.iter().map(|c| c.user_id).collect()
  }

  #[test]
  fn score_order_is_descending_with_stable_ties() {
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let input = vec![
      candidate(a, "Ada Lovelace", 40.0),
      candidate(b, "Grace Hopper", 90.0),
      candidate(c, "Katherine Johnson", 90.0),
    ];

    let ranked = rank(
      input,
      SortKey::MatchScore,
      &RequestedSet::new(),
      &BTreeMap::new(),
    );

    // Ties keep input order: [b, c, a], not [c, b, a].
    assert_eq!(ids(&ranked), vec![b, c, a]);
  }

  #[test]
  fn name_order_is_case_insensitive_ascending() {
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let input = vec![
      candidate(a, "zoe Adams", 10.0),
      candidate(b, "Ben Carter", 99.0),
      candidate(c, "amara Okafor", 50.0),
    ];

    let ranked = rank(
      input,
      SortKey::Name,
      &RequestedSet::new(),
      &BTreeMap::new(),
    );
    assert_eq!(ids(&ranked), vec![c, b, a]);
  }

  #[test]
  fn ranking_is_deterministic() {
    let input: Vec<_> = (0..8)
      .map(|i| candidate(Uuid::new_v4(), "Mentor X", f64::from(i % 3) * 30.0))
      .collect();

    let first = rank(
      input.clone(),
      SortKey::MatchScore,
      &RequestedSet::new(),
      &BTreeMap::new(),
    );
    let second = rank(
      input,
      SortKey::MatchScore,
      &RequestedSet::new(),
      &BTreeMap::new(),
    );
    assert_eq!(ids(&first), ids(&second));
  }

  #[test]
  fn duplicates_collapse_keeping_higher_score() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let input = vec![
      candidate(a, "Ada Lovelace", 40.0),
      candidate(b, "Grace Hopper", 70.0),
      candidate(a, "Ada Lovelace", 85.0),
    ];

    let ranked = rank(
      input,
      SortKey::MatchScore,
      &RequestedSet::new(),
      &BTreeMap::new(),
    );
    assert_eq!(ranked.len(), 2);
    assert_eq!(ids(&ranked), vec![a, b]);
    assert_eq!(ranked[0].match_score, 85.0);
  }

  #[test]
  fn duplicate_tie_keeps_first_occurrence() {
    let a = Uuid::new_v4();
    let mut first = candidate(a, "Ada Lovelace", 60.0);
    first.match_criteria = vec!["shared field".into()];
    let second = candidate(a, "Ada L", 60.0);

    let ranked = rank(
      vec![first, second],
      SortKey::MatchScore,
      &RequestedSet::new(),
      &BTreeMap::new(),
    );
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].match_criteria, vec!["shared field".to_string()]);
  }

  #[test]
  fn requested_mentors_annotate_pending() {
    let a = Uuid::new_v4();
    let mut requested = RequestedSet::new();
    requested.insert(a);

    let ranked = rank(
      vec![candidate(a, "Ada Lovelace", 50.0)],
      SortKey::MatchScore,
      &requested,
      &BTreeMap::new(),
    );
    assert_eq!(ranked[0].request_status, Some(MentorshipStatus::Pending));
    assert!(!ranked[0].is_requestable());
  }

  #[test]
  fn server_status_beats_requested_flag() {
    let a = Uuid::new_v4();
    let mut requested = RequestedSet::new();
    requested.insert(a);

    let mut known = BTreeMap::new();
    known.insert(a, MentorshipStatus::Declined);

    let ranked = rank(
      vec![candidate(a, "Ada Lovelace", 50.0)],
      SortKey::MatchScore,
      &requested,
      &known,
    );
    assert_eq!(ranked[0].request_status, Some(MentorshipStatus::Declined));
    // Declined is terminal, so the candidate is requestable again.
    assert!(ranked[0].is_requestable());
  }

  #[test]
  fn untouched_candidates_have_no_annotation() {
    let a = Uuid::new_v4();
    let ranked = rank(
      vec![candidate(a, "Ada Lovelace", 50.0)],
      SortKey::MatchScore,
      &RequestedSet::new(),
      &BTreeMap::new(),
    );
    assert_eq!(ranked[0].request_status, None);
    assert!(ranked[0].is_requestable());
  }
}
