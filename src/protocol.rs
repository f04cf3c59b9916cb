//! Public request/response structs for the HTTP API (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use std::collections::HashMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{AnswerValue, Archetype, QuizStats, ScoreTally, SubmissionRecord};
use crate::storage::StoreError;

/// Completed quiz as submitted by the client.
#[derive(Debug, Deserialize)]
pub struct SubmitIn {
  pub responses: HashMap<String, AnswerValue>,
  /// Self-reported, in minutes.
  #[serde(default)] pub completion_time: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SubmitOut {
  pub session_id: String,
  pub primary_archetype: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub secondary_archetype: Option<String>,
  pub archetype_name: String,
  pub scores: ScoreTally,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub role_demographic: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub completion_time: Option<f64>,
}

/// Persisted submission merged with static archetype descriptive data,
/// served on the shared-results path.
#[derive(Debug, Serialize)]
pub struct ResultOut {
  pub session_id: String,
  pub primary: Archetype,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub secondary: Option<Archetype>,
  pub scores: ScoreTally,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub role_demographic: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub completion_time: Option<f64>,
  pub completed_at: DateTime<Utc>,
}

impl ResultOut {
  pub fn from_record(
    rec: SubmissionRecord,
    primary: Archetype,
    secondary: Option<Archetype>,
  ) -> Self {
    Self {
      session_id: rec.session_id,
      primary,
      secondary,
      scores: rec.scores,
      role_demographic: rec.role_demographic,
      completion_time: rec.completion_time,
      completed_at: rec.completed_at,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct StatsOut {
  #[serde(flatten)]
  pub stats: QuizStats,
  pub updated_at: DateTime<Utc>,
}

/// Analytics event from the client. Persisting it is best effort.
#[derive(Debug, Deserialize)]
pub struct EventIn {
  pub event_type: String,
  #[serde(default)] pub session_id: Option<String>,
  #[serde(default)] pub data: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct EventAck {
  pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthOut {
  pub status: &'static str,
  pub questions: usize,
  pub archetypes: usize,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub total_results: Option<u64>,
  pub database: &'static str,
}

/// Client-facing error split: unknown sessions are a distinguishable 404,
/// everything else surfaces as a 500 without internal detail.
#[derive(Debug)]
pub enum ApiError {
  NotFound(String),
  Internal,
}

impl From<StoreError> for ApiError {
  fn from(e: StoreError) -> Self {
    match e {
      StoreError::NotFound(id) => ApiError::NotFound(id),
      _ => ApiError::Internal,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::NotFound(id) => (
        StatusCode::NOT_FOUND,
        format!("no results for session {id}"),
      ),
      ApiError::Internal => (
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal server error".to_string(),
      ),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
