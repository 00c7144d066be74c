//! Domain models: the MCQ record, provenance tags, attempt telemetry rows,
//! and per-user study profiles.

use serde::{Deserialize, Serialize};

/// Where did a served question come from?
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSource {
  /// Synthesized by the model and schema-validated before release.
  Ai,
  /// Pre-authored entry from the static question bank.
  Demo,
}

/// A multiple-choice question. Options are labeled A-D by position.
///
/// Instances that leave the generation pipeline always satisfy the schema:
/// exactly four options, `correct_index` in 0..=3, difficulty in 1..=5,
/// non-empty subject/question/explanation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mcq {
  pub subject: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub topic: Option<String>,
  pub difficulty: u8,
  pub question: String,
  pub options: Vec<String>,
  pub correct_index: u8,
  pub explanation: String,
}

/// Append-only telemetry row for one answered question.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
  pub id: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub user_id: Option<String>,
  pub subject: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub topic: Option<String>,
  pub difficulty: u8,
  pub selected_index: u8,
  pub correct_index: u8,
  pub correct: bool,
  pub time_seconds: u32,
  /// Unix seconds at ingest time.
  pub recorded_at: u64,
}

/// Study preferences stored per opaque user id.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
  #[serde(default)]
  pub year_level: Option<u8>,
  #[serde(default)]
  pub minutes_per_day: Option<u32>,
  #[serde(default)]
  pub subjects: Vec<String>,
}
