//! Prompt construction for the generation client.
//!
//! Builds the user message from the configured template: keeps the caller's
//! topic when the subject actually offers it (random pick otherwise),
//! clamps the difficulty into 1..=5, and embeds a random seed token so
//! identical requests do not collapse to cached or identical output.

use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::bank::QuestionBank;
use crate::config::Prompts;
use crate::util::fill_template;

const SEED_LEN: usize = 11;

#[derive(Clone, Debug)]
pub struct BuiltPrompt {
  pub topic: String,
  pub seed: String,
  pub text: String,
}

/// Clamp a requested difficulty into the valid 1..=5 range.
pub fn clamp_difficulty(difficulty: i64) -> u8 {
  difficulty.clamp(1, 5) as u8
}

pub fn build_prompt<R: Rng + ?Sized>(
  prompts: &Prompts,
  bank: &QuestionBank,
  subject: &str,
  topic: Option<&str>,
  difficulty: i64,
  rng: &mut R,
) -> BuiltPrompt {
  let difficulty = clamp_difficulty(difficulty);

  let topic = match topic {
    Some(t) if bank.has_topic(subject, t) => t.to_string(),
    _ => bank
      .topics_for(subject)
      .choose(rng)
      .cloned()
      .unwrap_or_else(|| "Core".to_string()),
  };

  let seed = seed_token(rng);
  let text = fill_template(
    &prompts.generate_user_template,
    &[
      ("subject", subject),
      ("topic", &topic),
      ("difficulty", &difficulty.to_string()),
      ("seed", &seed),
    ],
  );

  BuiltPrompt { topic, seed, text }
}

/// Random lowercase alphanumeric token embedded in the prompt to vary output.
fn seed_token<R: Rng + ?Sized>(rng: &mut R) -> String {
  (&mut *rng)
    .sample_iter(&Alphanumeric)
    .take(SEED_LEN)
    .map(|b| (b as char).to_ascii_lowercase())
    .collect()
}
