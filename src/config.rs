//! Generator configuration (env) and optional TOML application config
//! (prompt overrides + extra question bank entries).
//!
//! See `AppConfig` and `Prompts` for the expected TOML schema.

use serde::Deserialize;
use tracing::{error, info};

/// Everything the generation pipeline needs, passed in explicitly so tests
/// can construct it without touching the process environment.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
  pub api_key: Option<String>,
  pub base_url: String,
  pub model: String,
  pub temperature: f32,
  /// Strict AI-only mode: surface failures instead of serving demo questions.
  pub require_ai: bool,
}

impl GeneratorConfig {
  pub fn from_env() -> Self {
    let api_key = std::env::var("OPENAI_API_KEY")
      .ok()
      .filter(|k| !k.trim().is_empty());
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
    let require_ai = std::env::var("REQUIRE_AI")
      .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
      .unwrap_or(false);

    Self { api_key, base_url, model, temperature: 0.3, require_ai }
  }
}

/// Prompts used by the OpenAI client. Defaults target VCE-style MCQs.
/// Override them in TOML if you need to tune tone/structure.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub generate_system: String,
  pub generate_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      generate_system: "Output ONLY compact JSON. No markdown or commentary.".into(),
      generate_user_template: "Return ONLY JSON with keys:\nsubject, topic, difficulty (1-5), question, options (array of 4 strings), correctIndex (0..3), explanation.\nWrite a fresh VCE {subject} MCQ on \"{topic}\" at difficulty {difficulty}. Use Australian/VCAA terminology.\nVary numbers/wording. Seed: {seed}.".into(),
    }
  }
}

/// Extra question bank entry accepted in TOML configuration.
/// Entries that do not satisfy the MCQ schema are logged and skipped at load.
#[derive(Clone, Debug, Deserialize)]
pub struct BankEntryCfg {
  pub subject: String,
  #[serde(default)] pub topic: Option<String>,
  pub difficulty: u8,
  pub question: String,
  pub options: Vec<String>,
  pub correct_index: u8,
  pub explanation: String,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub questions: Vec<BankEntryCfg>,
}

/// Attempt to load `AppConfig` from APP_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("APP_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "ascent_backend", %path, "Loaded app config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "ascent_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "ascent_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
