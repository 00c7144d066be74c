//! Minimal OpenAI client for question generation.
//!
//! We only call chat.completions and always request one MCQ as strict JSON.
//! One request per invocation, no retries, no streaming; every failure is
//! converted into a typed `GenerateError`.
//!
//! NOTE: We never log the API key and we keep payload truncations short.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::{GeneratorConfig, Prompts};
use crate::error::GenerateError;
use crate::util::trunc_for_log;

#[derive(Clone)]
pub struct OpenAi {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
  pub temperature: f32,
}

impl OpenAi {
  /// Construct the client when a credential is configured; otherwise None.
  pub fn from_config(cfg: &GeneratorConfig) -> Option<Self> {
    let api_key = cfg.api_key.clone()?;

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .ok()?;

    Some(Self {
      client,
      api_key,
      base_url: cfg.base_url.clone(),
      model: cfg.model.clone(),
      temperature: cfg.temperature,
    })
  }

  /// Single chat completion carrying the built prompt. Returns the raw
  /// message text; parsing and schema checks happen in `validate`.
  #[instrument(level = "info", skip(self, prompts, user_prompt), fields(model = %self.model, prompt_len = user_prompt.len()))]
  pub async fn complete_mcq(
    &self,
    prompts: &Prompts,
    user_prompt: &str,
  ) -> Result<String, GenerateError> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: self.model.clone(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: prompts.generate_system.clone() },
        ChatMessageReq { role: "user".into(), content: user_prompt.into() },
      ],
      temperature: self.temperature,
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "ascent-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await
      .map_err(|e| GenerateError::Runtime(e.to_string()))?;

    if !res.status().is_success() {
      let status = res.status().as_u16();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_upstream_error(&body).unwrap_or_else(|| trunc_for_log(&body, 200));
      error!(target: "question", status, error = %msg, "Upstream completion returned non-success status");
      return Err(GenerateError::UpstreamHttp(status));
    }

    let body: ChatCompletionResponse = res.json().await
      .map_err(|e| GenerateError::Runtime(e.to_string()))?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "OpenAI usage");
    }
    let text = body.choices.get(0)
      .and_then(|c| c.message.content.clone())
      .unwrap_or_else(|| "{}".into());

    Ok(text.trim().to_string())
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from an upstream error body.
fn extract_upstream_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}
