use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::domain::RawCandidate;

static FIRST_ARRAY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[\s\S]*?\]").unwrap());

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ResponseParseError {
    #[error("response contains no JSON array")]
    NoArray,
    #[error("response JSON is malformed: {0}")]
    Malformed(String),
}

/// Pulls the cue array out of a model answer.
///
/// Accepts a bare array, an `{"audio_cues": [...]}` object, either wrapped in
/// markdown fences or surrounded by prose. Elements that are not objects are
/// skipped.
pub fn parse_cue_response(raw: &str) -> Result<Vec<RawCandidate>, ResponseParseError> {
    let cleaned = strip_fences(raw);

    let items = match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => cue_array(value).ok_or(ResponseParseError::NoArray)?,
        Err(_) => embedded_array(&cleaned)?,
    };

    let total = items.len();
    let candidates: Vec<RawCandidate> = items.iter().filter_map(RawCandidate::from_json).collect();
    if candidates.len() < total {
        tracing::debug!(
            skipped = total - candidates.len(),
            "Skipped cue entries that are not JSON objects"
        );
    }
    Ok(candidates)
}

fn strip_fences(raw: &str) -> String {
    raw.replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
        .trim()
        .to_string()
}

fn cue_array(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(mut object) => match object.remove("audio_cues") {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        },
        _ => None,
    }
}

fn embedded_array(text: &str) -> Result<Vec<Value>, ResponseParseError> {
    let first = FIRST_ARRAY
        .find(text)
        .ok_or(ResponseParseError::NoArray)?;

    match serde_json::from_str::<Vec<Value>>(first.as_str()) {
        Ok(items) => Ok(items),
        // Non-greedy match stops at the first `]`, which cuts arrays nested
        // inside cue objects. Retry with the widest bracket span.
        Err(first_error) => {
            let widest = text
                .rfind(']')
                .filter(|end| *end > first.start())
                .map(|end| &text[first.start()..=end])
                .ok_or_else(|| ResponseParseError::Malformed(first_error.to_string()))?;
            serde_json::from_str::<Vec<Value>>(widest)
                .map_err(|e| ResponseParseError::Malformed(e.to_string()))
        }
    }
}
