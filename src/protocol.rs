//! Public request/response DTOs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{AttemptRecord, Mcq, Profile, QuestionSource};

#[derive(Debug, Deserialize)]
pub struct GenerateIn {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub difficulty: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct GenerateOut {
    pub source: QuestionSource,
    /// Failure reason behind a demo substitution; absent on AI questions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub question: Mcq,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptIn {
    pub subject: String,
    #[serde(default)]
    pub topic: Option<String>,
    pub difficulty: i64,
    pub selected_index: u8,
    pub correct_index: u8,
    #[serde(default)]
    pub time_seconds: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptOut {
    pub ok: bool,
    pub correct: bool,
    pub next_difficulty: u8,
}

#[derive(Debug, Serialize)]
pub struct AttemptsOut {
    pub attempts: Vec<AttemptRecord>,
}

#[derive(Debug, Deserialize)]
pub struct TopicsQuery {
    #[serde(default)]
    pub subject: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TopicsOut {
    pub subject: String,
    pub topics: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SubjectsOut {
    pub subjects: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagOut {
    pub key_present: bool,
    pub require_ai: bool,
    pub note: String,
}

pub type ProfileIn = Profile;

#[derive(Debug, Serialize)]
pub struct ProfileOut {
    pub ok: bool,
    pub profile: Profile,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
