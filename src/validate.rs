//! Strict, fail-closed validation of upstream MCQ text.
//!
//! Step 1 parses the raw text as JSON; step 2 checks every field of the
//! MCQ schema. Partial matches are rejected wholesale, never patched: no
//! field coercion and no defaulting beyond the optional topic.

use serde_json::Value;

use crate::domain::Mcq;
use crate::error::GenerateError;

pub fn validate_mcq(raw: &str) -> Result<Mcq, GenerateError> {
  let value: Value =
    serde_json::from_str(raw).map_err(|e| GenerateError::Parse(e.to_string()))?;
  match check_schema(&value) {
    Some(mcq) => Ok(mcq),
    None => Err(GenerateError::Schema(value)),
  }
}

fn check_schema(value: &Value) -> Option<Mcq> {
  let obj = value.as_object()?;

  let subject = nonempty_str(obj.get("subject")?)?;
  let topic = match obj.get("topic") {
    None | Some(Value::Null) => None,
    Some(t) => Some(t.as_str()?.to_string()),
  };
  let difficulty = int_in_range(obj.get("difficulty")?, 1, 5)? as u8;
  let question = nonempty_str(obj.get("question")?)?;

  let raw_options = obj.get("options")?.as_array()?;
  if raw_options.len() != 4 {
    return None;
  }
  let mut options = Vec::with_capacity(4);
  for opt in raw_options {
    options.push(opt.as_str()?.to_string());
  }

  let correct_index = int_in_range(obj.get("correctIndex")?, 0, 3)? as u8;
  let explanation = nonempty_str(obj.get("explanation")?)?;

  Some(Mcq { subject, topic, difficulty, question, options, correct_index, explanation })
}

fn nonempty_str(value: &Value) -> Option<String> {
  let s = value.as_str()?;
  if s.trim().is_empty() {
    None
  } else {
    Some(s.to_string())
  }
}

/// Integers only: floats like 2.5 are rejected, not rounded.
fn int_in_range(value: &Value, min: i64, max: i64) -> Option<i64> {
  let n = value.as_i64()?;
  if (min..=max).contains(&n) {
    Some(n)
  } else {
    None
  }
}
