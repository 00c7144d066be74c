//! The generation pipeline and its fallback policy, plus local answer
//! scoring and the adaptive difficulty step.
//!
//! Control flow: build prompt, one completion call, strict validation.
//! Any failure lands in `resolve_failure`, where the strict-mode flag
//! decides uniformly between an explicit error and a demo question.

use tracing::{error, info, instrument, warn};

use crate::bank::QuestionBank;
use crate::domain::Mcq;
use crate::error::GenerateError;
use crate::prompt::build_prompt;
use crate::state::AppState;
use crate::util::trunc_for_log;
use crate::validate::validate_mcq;

/// Outcome of a generate request that produced a usable question.
#[derive(Clone, Debug)]
pub enum Generated {
  Ai(Mcq),
  Demo { question: Mcq, reason: String },
}

/// Entry point used by the HTTP layer.
#[instrument(level = "info", skip(state, topic), fields(%subject, difficulty))]
pub async fn produce_question(
  state: &AppState,
  subject: &str,
  topic: Option<&str>,
  difficulty: i64,
) -> Result<Generated, GenerateError> {
  match generate_via_model(state, subject, topic, difficulty).await {
    Ok(mcq) => {
      info!(target: "question", %subject, topic = ?mcq.topic, "Generated question accepted");
      Ok(Generated::Ai(mcq))
    }
    Err(err) => {
      if let GenerateError::Schema(value) = &err {
        error!(target: "question", value = %trunc_for_log(&value.to_string(), 300), "Schema check rejected upstream JSON");
      }
      resolve_failure(err, state.config.require_ai, subject, &state.bank)
    }
  }
}

async fn generate_via_model(
  state: &AppState,
  subject: &str,
  topic: Option<&str>,
  difficulty: i64,
) -> Result<Mcq, GenerateError> {
  let client = state.openai.as_ref().ok_or(GenerateError::NoCredentials)?;
  let built = build_prompt(
    &state.prompts,
    &state.bank,
    subject,
    topic,
    difficulty,
    &mut rand::thread_rng(),
  );
  let raw = client.complete_mcq(&state.prompts, &built.text).await?;
  validate_mcq(&raw)
}

/// The one real policy decision in the pipeline: strict mode surfaces
/// every failure kind, soft mode substitutes a demo question for every
/// failure kind. Never a per-error choice.
pub fn resolve_failure(
  err: GenerateError,
  require_ai: bool,
  subject: &str,
  bank: &QuestionBank,
) -> Result<Generated, GenerateError> {
  let reason = err.reason();
  if require_ai {
    error!(target: "question", %subject, %reason, "Strict mode: rejecting request after generation failure");
    return Err(err);
  }
  let question = bank.demo_for(subject, &mut rand::thread_rng());
  warn!(target: "question", %subject, %reason, "Serving demo question after generation failure");
  Ok(Generated::Demo { question, reason })
}

/// Single clamped adaptive step: one up on a correct answer, one down otherwise.
pub fn next_difficulty(current: i64, correct: bool) -> u8 {
  let step = if correct { 1 } else { -1 };
  (current + step).clamp(1, 5) as u8
}
