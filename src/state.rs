//! Application state: configuration, prompts, the question bank, the
//! optional OpenAI client, and the in-memory attempt/profile stores.
//!
//! This module owns:
//!   - the generator configuration (env or test-provided)
//!   - the question bank (built-ins plus config-provided entries)
//!   - the optional OpenAI client
//!   - the append-only attempt log and the per-user profile map

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::bank::QuestionBank;
use crate::config::{load_app_config_from_env, AppConfig, GeneratorConfig, Prompts};
use crate::domain::{AttemptRecord, Profile};
use crate::openai::OpenAi;

#[derive(Clone)]
pub struct AppState {
    pub config: GeneratorConfig,
    pub prompts: Prompts,
    pub bank: QuestionBank,
    pub openai: Option<OpenAi>,
    pub attempts: Arc<RwLock<Vec<AttemptRecord>>>,
    pub profiles: Arc<RwLock<HashMap<String, Profile>>>,
}

impl AppState {
    /// Build state from env: generator config, optional TOML config, bank, client.
    #[instrument(level = "info", skip_all)]
    pub fn from_env() -> Self {
        Self::with_config(GeneratorConfig::from_env(), load_app_config_from_env())
    }

    /// Build state from explicit values. Tests use this to avoid ambient env reads.
    pub fn with_config(config: GeneratorConfig, app_cfg: Option<AppConfig>) -> Self {
        let prompts = app_cfg
            .as_ref()
            .map(|c| c.prompts.clone())
            .unwrap_or_default();

        let mut bank = QuestionBank::builtin();
        if let Some(cfg) = &app_cfg {
            let mut added = 0usize;
            for entry in &cfg.questions {
                if bank.push_entry(entry.clone()) {
                    added += 1;
                }
            }
            if added > 0 {
                info!(target: "question", added, "Loaded extra bank entries from config");
            }
        }

        // Inventory summary by subject.
        for subject in bank.subjects() {
            info!(
                target: "question",
                %subject,
                questions = bank.count_for(&subject),
                topics = bank.topics_for(&subject).len(),
                "Startup bank inventory"
            );
        }

        // Build optional OpenAI client (if a credential is present).
        let openai = OpenAi::from_config(&config);
        if let Some(oa) = &openai {
            info!(target: "ascent_backend", base_url = %oa.base_url, model = %oa.model, require_ai = config.require_ai, "OpenAI enabled.");
        } else {
            info!(target: "ascent_backend", require_ai = config.require_ai, "OpenAI disabled (no OPENAI_API_KEY). Demo bank only.");
        }

        Self {
            config,
            prompts,
            bank,
            openai,
            attempts: Arc::new(RwLock::new(Vec::new())),
            profiles: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Append one attempt row (append-only; never read on the hot path).
    #[instrument(level = "debug", skip(self, rec), fields(subject = %rec.subject, correct = rec.correct))]
    pub async fn record_attempt(&self, rec: AttemptRecord) {
        self.attempts.write().await.push(rec);
    }

    /// Attempt history for one opaque user id (None = anonymous attempts).
    pub async fn attempts_for(&self, user_id: Option<&str>) -> Vec<AttemptRecord> {
        let attempts = self.attempts.read().await;
        attempts
            .iter()
            .filter(|a| a.user_id.as_deref() == user_id)
            .cloned()
            .collect()
    }

    pub async fn profile_for(&self, user_id: &str) -> Option<Profile> {
        self.profiles.read().await.get(user_id).cloned()
    }

    pub async fn upsert_profile(&self, user_id: &str, profile: Profile) {
        self.profiles.write().await.insert(user_id.to_string(), profile);
    }
}
