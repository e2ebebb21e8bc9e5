//! Async HTTP client wrapping the mentorship JSON API.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use stemlink_core::{
  Error, Result,
  candidate::MentorCandidate,
  mentorship::{Mentorship, MentorshipStatus},
  service::MentorshipService,
};
use uuid::Uuid;

use crate::wire::{
  CandidateListEnvelope, ErrorBody, MentorshipEnvelope, MentorshipIdBody,
  MentorshipListEnvelope, SendRequestBody,
};

/// Connection settings for the mentorship API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  /// Origin of the backend, without the `/api/v1` suffix.
  pub base_url:     String,
  /// JWT issued by the account service; sent as a bearer header.
  pub bearer_token: Option<String>,
}

/// Async HTTP client for the mentorship REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .map_err(|e| Error::Remote {
        status:  None,
        message: format!("failed to build HTTP client: {e}"),
      })?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api/v1{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    match &self.config.bearer_token {
      Some(token) => req.bearer_auth(token),
      None => req,
    }
  }

  /// Send a prepared request and decode the JSON body, mapping transport
  /// failures and non-2xx answers onto the core taxonomy via `map_error`.
  ///
  /// A timeout or connection error means the resulting remote state is
  /// unknown; it surfaces as [`Error::Remote`] with no status code and is
  /// never retried here.
  async fn execute<T: DeserializeOwned>(
    &self,
    req: reqwest::RequestBuilder,
    context: &str,
    map_error: impl Fn(StatusCode, String) -> Error,
  ) -> Result<T> {
    let resp = self.auth(req).send().await.map_err(|e| Error::Remote {
      status:  e.status().map(|s| s.as_u16()),
      message: format!("{context} failed: {e}"),
    })?;

    let status = resp.status();
    if !status.is_success() {
      let message = resp
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| format!("{context} → {status}"));
      tracing::debug!(%status, context, "api error response");
      return Err(map_error(status, message));
    }

    resp.json().await.map_err(|e| Error::Remote {
      status:  Some(status.as_u16()),
      message: format!("deserialising {context} response: {e}"),
    })
  }
}

fn remote(status: StatusCode, message: String) -> Error {
  Error::Remote {
    status: Some(status.as_u16()),
    message,
  }
}

/// Map errors for a transition command on a known mentorship id:
/// 404 is sharpened to [`Error::MentorshipNotFound`].
fn transition_error(id: Uuid) -> impl Fn(StatusCode, String) -> Error {
  move |status, message| match status {
    StatusCode::NOT_FOUND => Error::MentorshipNotFound(id),
    _ => remote(status, message),
  }
}

impl MentorshipService for ApiClient {
  type Error = Error;

  /// `POST /api/v1/mentorships/send-request`
  async fn create_request(
    &self,
    student_id: Uuid,
    mentor_id: Uuid,
    message: Option<String>,
  ) -> Result<Mentorship> {
    let body = SendRequestBody { mentor_id, message };
    let envelope: MentorshipEnvelope = self
      .execute(
        self
          .client
          .post(self.url("/mentorships/send-request"))
          .json(&body),
        "POST /mentorships/send-request",
        move |status, message| match status {
          // The server answers 409 when a non-terminal record exists.
          StatusCode::CONFLICT => Error::DuplicateRequest {
            student_id,
            mentor_id,
          },
          _ => remote(status, message),
        },
      )
      .await?;
    Ok(envelope.into_inner())
  }

  /// `POST /api/v1/mentorships/accept-mentorship-request`
  async fn accept_request(&self, mentorship_id: Uuid) -> Result<Mentorship> {
    let body = MentorshipIdBody { mentorship_id };
    let envelope: MentorshipEnvelope = self
      .execute(
        self
          .client
          .post(self.url("/mentorships/accept-mentorship-request"))
          .json(&body),
        "POST /mentorships/accept-mentorship-request",
        transition_error(mentorship_id),
      )
      .await?;
    Ok(envelope.into_inner())
  }

  /// `POST /api/v1/mentorships/decline-mentorship-request`
  async fn decline_request(&self, mentorship_id: Uuid) -> Result<Mentorship> {
    let body = MentorshipIdBody { mentorship_id };
    let envelope: MentorshipEnvelope = self
      .execute(
        self
          .client
          .post(self.url("/mentorships/decline-mentorship-request"))
          .json(&body),
        "POST /mentorships/decline-mentorship-request",
        transition_error(mentorship_id),
      )
      .await?;
    Ok(envelope.into_inner())
  }

  /// `POST /api/v1/mentorships/{id}/end`
  async fn end_mentorship(&self, mentorship_id: Uuid) -> Result<Mentorship> {
    let envelope: MentorshipEnvelope = self
      .execute(
        self
          .client
          .post(self.url(&format!("/mentorships/{mentorship_id}/end"))),
        "POST /mentorships/{id}/end",
        transition_error(mentorship_id),
      )
      .await?;
    Ok(envelope.into_inner())
  }

  /// `GET /api/v1/mentorships/my-mentorships?status=&skip=&limit=`
  async fn list_my_mentorships(
    &self,
    status: Option<MentorshipStatus>,
  ) -> Result<Vec<Mentorship>> {
    let status_param = status.map(|s| s.to_string()).unwrap_or_default();
    let envelope: MentorshipListEnvelope = self
      .execute(
        self
          .client
          .get(self.url("/mentorships/my-mentorships"))
          .query(&[
            ("status", status_param.as_str()),
            ("skip", "0"),
            ("limit", "100"),
          ]),
        "GET /mentorships/my-mentorships",
        remote,
      )
      .await?;
    Ok(envelope.into_inner())
  }

  /// `GET /api/v1/mentorships/recommendations`
  async fn list_recommended_candidates(&self) -> Result<Vec<MentorCandidate>> {
    let envelope: CandidateListEnvelope = self
      .execute(
        self.client.get(self.url("/mentorships/recommendations")),
        "GET /mentorships/recommendations",
        remote,
      )
      .await?;
    Ok(envelope.into_inner())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn client() -> ApiClient {
    ApiClient::new(ApiConfig {
      base_url:     "https://backend.example.com/".into(),
      bearer_token: None,
    })
    .unwrap()
  }

  #[test]
  fn url_joins_base_and_versioned_path() {
    assert_eq!(
      client().url("/mentorships/my-mentorships"),
      "https://backend.example.com/api/v1/mentorships/my-mentorships"
    );
  }

  #[test]
  fn conflict_maps_to_duplicate_request() {
    let (student, mentor) = (Uuid::new_v4(), Uuid::new_v4());
    let map = move |status, message| match status {
      StatusCode::CONFLICT => Error::DuplicateRequest {
        student_id: student,
        mentor_id:  mentor,
      },
      _ => remote(status, message),
    };
    assert!(matches!(
      map(StatusCode::CONFLICT, "conflict".into()),
      Error::DuplicateRequest { .. }
    ));
    assert!(matches!(
      map(StatusCode::INTERNAL_SERVER_ERROR, "boom".into()),
      Error::Remote {
        status: Some(500),
        ..
      }
    ));
  }

  #[test]
  fn not_found_maps_to_mentorship_not_found() {
    let id = Uuid::new_v4();
    let map = transition_error(id);
    assert!(matches!(
      map(StatusCode::NOT_FOUND, "missing".into()),
      Error::MentorshipNotFound(found) if found == id
    ));
  }
}
