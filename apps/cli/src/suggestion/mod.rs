//! Suggestion Generator — produces a resource suggestion from the completion
//! service when the local dataset has no match.
//!
//! Two decoding contracts live here:
//! - tolerant: structured when the reply parses as a JSON array of objects,
//!   the raw text otherwise (`Suggestion`);
//! - strict: a JSON array stamped with the query context, or an empty list
//!   (`parse_json_response`), for callers that require structured output.

pub mod prompts;

use serde_json::Value;
use tracing::error;

use crate::dataset::append::Record;
use crate::dataset::risk::RiskLevel;
use crate::dataset::{LOCATION_COLUMN, RISK_COLUMN, SPECIALTY_COLUMN};
use crate::llm_client::LlmClient;
use crate::suggestion::prompts::{build_prompt, FALLBACK_MESSAGE, SUGGESTION_SYSTEM};

/// Outcome of a suggestion request. Callers branch on the tag instead of
/// re-parsing the text.
#[derive(Debug, Clone, PartialEq)]
pub enum Suggestion {
    /// The reply parsed as a JSON array of resource-like objects.
    Structured(Vec<Record>),
    /// Raw reply text, or the fixed fallback when the service call failed.
    Unstructured(String),
}

/// Requests a suggestion for the given query context.
///
/// Service failures never propagate: the user gets the fixed fallback
/// message and the underlying error is logged.
pub async fn generate_suggestion(
    llm: &LlmClient,
    location: &str,
    specialty: &str,
    risk_level: RiskLevel,
) -> Suggestion {
    let prompt = build_prompt(location, specialty, risk_level.as_str());

    match llm.complete(SUGGESTION_SYSTEM, &prompt).await {
        Ok(text) => decode_response(&text),
        Err(e) => {
            error!("Error generating suggestion: {e}");
            Suggestion::Unstructured(FALLBACK_MESSAGE.to_string())
        }
    }
}

/// Tolerant decoding: structured when possible, the raw text otherwise.
pub fn decode_response(raw: &str) -> Suggestion {
    match serde_json::from_str::<Vec<Record>>(strip_json_fences(raw)) {
        Ok(records) => Suggestion::Structured(records),
        Err(_) => Suggestion::Unstructured(raw.to_string()),
    }
}

/// Strict decoding: parses `raw` as a JSON array of objects and stamps every
/// object with the supplied location, specialty, and risk level, overwriting
/// any same-named fields. Returns an empty list on parse failure.
///
/// Use this instead of `decode_response` when structured output is required.
#[allow(dead_code)]
pub fn parse_json_response(
    raw: &str,
    location: &str,
    specialty: &str,
    risk_level: RiskLevel,
) -> Vec<Record> {
    let mut records: Vec<Record> = match serde_json::from_str(strip_json_fences(raw)) {
        Ok(records) => records,
        Err(e) => {
            error!("Failed to parse JSON response: {e}");
            return Vec::new();
        }
    };

    stamp_records(&mut records, location, specialty, risk_level);
    records
}

/// Stamps every record with the query context, overwriting same-named fields.
pub fn stamp_records(
    records: &mut [Record],
    location: &str,
    specialty: &str,
    risk_level: RiskLevel,
) {
    for record in records {
        record.insert(
            LOCATION_COLUMN.to_string(),
            Value::String(location.to_string()),
        );
        record.insert(
            SPECIALTY_COLUMN.to_string(),
            Value::String(specialty.to_string()),
        );
        record.insert(
            RISK_COLUMN.to_string(),
            Value::String(risk_level.as_str().to_string()),
        );
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
