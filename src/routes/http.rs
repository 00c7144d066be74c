//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs include parameters and basic result info.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
  extract::{Query, State},
  http::{header, HeaderMap, HeaderValue, StatusCode},
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::bank::DEFAULT_SUBJECT;
use crate::domain::{AttemptRecord, QuestionSource};
use crate::logic::{next_difficulty, produce_question, Generated};
use crate::prompt::clamp_difficulty;
use crate::protocol::*;
use crate::state::AppState;

/// Opaque identity boundary: the session collaborator hands us a user id
/// (or none) via this header; we never interpret it.
const USER_ID_HEADER: &str = "x-user-id";

fn user_id_from(headers: &HeaderMap) -> Option<String> {
  headers
    .get(USER_ID_HEADER)
    .and_then(|v| v.to_str().ok())
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .map(str::to_string)
}

fn no_store() -> [(header::HeaderName, HeaderValue); 1] {
  [(header::CACHE_CONTROL, HeaderValue::from_static("no-store, max-age=0"))]
}

fn not_authenticated() -> Response {
  (StatusCode::UNAUTHORIZED, Json(json!({ "error": "not_authenticated" }))).into_response()
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_diag(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let key_present = state.openai.is_some();
  let note = if key_present {
    "Key is present in the server environment.".to_string()
  } else {
    "Key missing. Set OPENAI_API_KEY to enable live generation.".to_string()
  };
  Json(DiagOut { key_present, require_ai: state.config.require_ai, note })
}

#[instrument(level = "info", skip(state, body), fields(subject = %body.subject.clone().unwrap_or_else(|| DEFAULT_SUBJECT.into())))]
pub async fn http_post_generate(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GenerateIn>,
) -> Response {
  let subject = body.subject.unwrap_or_else(|| DEFAULT_SUBJECT.to_string());
  let difficulty = body.difficulty.unwrap_or(2);

  match produce_question(&state, &subject, body.topic.as_deref(), difficulty).await {
    Ok(generated) => {
      let out = match generated {
        Generated::Ai(question) => {
          GenerateOut { source: QuestionSource::Ai, reason: None, question }
        }
        Generated::Demo { question, reason } => {
          GenerateOut { source: QuestionSource::Demo, reason: Some(reason), question }
        }
      };
      info!(target: "question", %subject, source = ?out.source, "HTTP question served");
      (no_store(), Json(out)).into_response()
    }
    Err(err) => err.into_response(),
  }
}

#[instrument(level = "info", skip(state, headers, body), fields(subject = %body.subject, selected = body.selected_index))]
pub async fn http_post_attempt(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  Json(body): Json<AttemptIn>,
) -> Response {
  if body.selected_index > 3 || body.correct_index > 3 {
    return (StatusCode::BAD_REQUEST, Json(json!({ "error": "index_out_of_range" })))
      .into_response();
  }

  let correct = body.selected_index == body.correct_index;
  let next = next_difficulty(body.difficulty, correct);
  let recorded_at = SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|d| d.as_secs())
    .unwrap_or(0);

  let rec = AttemptRecord {
    id: Uuid::new_v4().to_string(),
    user_id: user_id_from(&headers),
    subject: body.subject,
    topic: body.topic,
    difficulty: clamp_difficulty(body.difficulty),
    selected_index: body.selected_index,
    correct_index: body.correct_index,
    correct,
    time_seconds: body.time_seconds.unwrap_or(0),
    recorded_at,
  };
  state.record_attempt(rec).await;
  info!(target: "question", %correct, next_difficulty = next, "HTTP attempt recorded");

  Json(AttemptOut { ok: true, correct, next_difficulty: next }).into_response()
}

#[instrument(level = "info", skip(state, headers))]
pub async fn http_get_attempts(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
) -> impl IntoResponse {
  let user = user_id_from(&headers);
  let attempts = state.attempts_for(user.as_deref()).await;
  Json(AttemptsOut { attempts })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_subjects(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(SubjectsOut { subjects: state.bank.subjects() })
}

#[instrument(level = "info", skip(state, q), fields(subject = %q.subject.clone().unwrap_or_else(|| DEFAULT_SUBJECT.into())))]
pub async fn http_get_topics(
  State(state): State<Arc<AppState>>,
  Query(q): Query<TopicsQuery>,
) -> impl IntoResponse {
  let subject = q.subject.unwrap_or_else(|| DEFAULT_SUBJECT.to_string());
  let topics = state.bank.topics_for(&subject).to_vec();
  Json(TopicsOut { subject, topics })
}

#[instrument(level = "info", skip(state, headers))]
pub async fn http_get_profile(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
) -> Response {
  let Some(user) = user_id_from(&headers) else {
    return not_authenticated();
  };
  let profile = state.profile_for(&user).await.unwrap_or_default();
  Json(ProfileOut { ok: true, profile }).into_response()
}

#[instrument(level = "info", skip(state, headers, body), fields(subjects = body.subjects.len()))]
pub async fn http_post_profile(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  Json(body): Json<ProfileIn>,
) -> Response {
  let Some(user) = user_id_from(&headers) else {
    return not_authenticated();
  };
  state.upsert_profile(&user, body.clone()).await;
  info!(target: "ascent_backend", subjects = body.subjects.len(), "Profile saved");
  Json(ProfileOut { ok: true, profile: body }).into_response()
}
