//! Failure taxonomy for the generation pipeline and its HTTP mapping.
//!
//! Every failure inside the pipeline is converted into one of these
//! variants; nothing propagates as an uncaught fault. Whether a variant
//! reaches the caller or is masked by a demo question is decided by the
//! strict-mode flag in `logic`, not here.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Json},
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
  #[error("no API credential configured")]
  NoCredentials,

  #[error("upstream completion returned HTTP {0}")]
  UpstreamHttp(u16),

  #[error("upstream text is not valid JSON: {0}")]
  Parse(String),

  /// Parsed JSON did not match the MCQ schema. Carries the offending value
  /// for diagnostics; it is logged truncated, never returned to the caller.
  #[error("upstream JSON does not match the MCQ schema")]
  Schema(serde_json::Value),

  #[error("transport failure: {0}")]
  Runtime(String),
}

impl GenerateError {
  /// Machine-readable reason string, stable across releases.
  pub fn reason(&self) -> String {
    match self {
      GenerateError::NoCredentials => "no_key".into(),
      GenerateError::UpstreamHttp(status) => format!("openai_http_{status}"),
      GenerateError::Parse(_) => "parse_error".into(),
      GenerateError::Schema(_) => "schema_fail".into(),
      GenerateError::Runtime(_) => "runtime_error".into(),
    }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      GenerateError::NoCredentials => StatusCode::SERVICE_UNAVAILABLE,
      GenerateError::UpstreamHttp(_) | GenerateError::Parse(_) | GenerateError::Schema(_) => {
        StatusCode::BAD_GATEWAY
      }
      GenerateError::Runtime(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for GenerateError {
  fn into_response(self) -> axum::response::Response {
    let body = Json(json!({ "error": self.reason() }));
    (self.status(), body).into_response()
  }
}
