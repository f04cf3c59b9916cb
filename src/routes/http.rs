//! HTTP endpoint handlers. Thin wrappers over the scoring engine and the
//! store; each handler is instrumented and logs basic result info.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::json;
use tracing::{error, info, instrument};

use crate::domain::{NewEvent, NewSubmission};
use crate::protocol::*;
use crate::scoring;
use crate::state::AppState;
use crate::util::{client_meta, trunc_for_log};

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let (status, database, total_results) = match state.store.total_results().await {
    Ok(n) => ("healthy", "connected", Some(n)),
    Err(e) => {
      error!(target: "quiz_backend", error = %e, "Health check failed to read store");
      ("degraded", "unavailable", None)
    }
  };
  Json(HealthOut {
    status,
    questions: state.catalog.questions.len(),
    archetypes: state.catalog.archetypes.len(),
    total_results,
    database,
  })
}

#[instrument(level = "info", skip(state, headers, body), fields(answers = body.responses.len()))]
pub async fn http_submit(
  State(state): State<Arc<AppState>>,
  ConnectInfo(peer): ConnectInfo<SocketAddr>,
  headers: HeaderMap,
  Json(body): Json<SubmitIn>,
) -> Result<Json<SubmitOut>, ApiError> {
  let (scores, role_demographic) = scoring::score(&body.responses, &state.catalog);
  let (primary, secondary) = scoring::resolve(&scores, &state.catalog);
  // The resolver only emits catalog ids, so this lookup cannot miss.
  let archetype_name = state
    .catalog
    .archetype(&primary)
    .map(|a| a.name.clone())
    .ok_or(ApiError::Internal)?;

  let meta = client_meta(&headers, &peer);
  let rec = state
    .store
    .record(NewSubmission {
      primary_archetype: primary,
      secondary_archetype: secondary,
      archetype_name,
      scores,
      responses: serde_json::to_value(&body.responses).map_err(|_| ApiError::Internal)?,
      completion_time: body.completion_time,
      role_demographic,
      user_agent: meta.user_agent.clone(),
      ip_address: meta.ip_address.clone(),
    })
    .await
    .map_err(|e| {
      error!(target: "quiz_backend", error = %e, "Failed to record submission");
      ApiError::from(e)
    })?;

  info!(
    target: "quiz_backend",
    session = %rec.session_id,
    archetype = %rec.primary_archetype,
    secondary = rec.secondary_archetype.as_deref().unwrap_or("-"),
    "Quiz submission recorded"
  );

  // Best-effort side channel; a logging failure never fails the submission.
  let event = NewEvent {
    event_type: "quiz_submitted".to_string(),
    session_id: Some(rec.session_id.clone()),
    data: Some(json!({
      "archetype": rec.primary_archetype,
      "archetype_name": rec.archetype_name,
      "completion_time": rec.completion_time,
    })),
    user_agent: meta.user_agent,
    ip_address: meta.ip_address,
  };
  if let Err(e) = state.store.log_event(event).await {
    error!(target: "quiz_backend", error = %e, "Analytics logging failed (ignored)");
  }

  Ok(Json(SubmitOut {
    session_id: rec.session_id,
    primary_archetype: rec.primary_archetype,
    secondary_archetype: rec.secondary_archetype,
    archetype_name: rec.archetype_name,
    scores: rec.scores,
    role_demographic: rec.role_demographic,
    completion_time: rec.completion_time,
  }))
}

#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn http_get_result(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
) -> Result<Json<ResultOut>, ApiError> {
  let rec = state.store.fetch(&session_id).await?;
  let primary = state
    .catalog
    .archetype(&rec.primary_archetype)
    .cloned()
    .ok_or(ApiError::Internal)?;
  let secondary = rec
    .secondary_archetype
    .as_deref()
    .and_then(|id| state.catalog.archetype(id))
    .cloned();
  info!(target: "quiz_backend", %session_id, archetype = %primary.id, "Shared results served");
  Ok(Json(ResultOut::from_record(rec, primary, secondary)))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_stats(
  State(state): State<Arc<AppState>>,
) -> Result<Json<StatsOut>, ApiError> {
  let stats = state.store.stats(&state.catalog).await.map_err(|e| {
    error!(target: "quiz_backend", error = %e, "Stats query failed");
    ApiError::from(e)
  })?;
  Ok(Json(StatsOut { stats, updated_at: Utc::now() }))
}

#[instrument(level = "info", skip(state, headers, body), fields(event_type = %body.event_type))]
pub async fn http_post_event(
  State(state): State<Arc<AppState>>,
  ConnectInfo(peer): ConnectInfo<SocketAddr>,
  headers: HeaderMap,
  Json(body): Json<EventIn>,
) -> Json<EventAck> {
  let meta = client_meta(&headers, &peer);
  let data_preview = body
    .data
    .as_ref()
    .map(|d| trunc_for_log(&d.to_string(), 200))
    .unwrap_or_default();
  let event = NewEvent {
    event_type: body.event_type,
    session_id: body.session_id,
    data: body.data,
    user_agent: meta.user_agent,
    ip_address: meta.ip_address,
  };
  match state.store.log_event(event).await {
    Ok(()) => Json(EventAck { status: "logged" }),
    Err(e) => {
      // Soft failure: the caller's primary flow must never break on this.
      error!(target: "quiz_backend", error = %e, data = %data_preview, "Analytics event insert failed");
      Json(EventAck { status: "error" })
    }
  }
}
