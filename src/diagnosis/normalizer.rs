// Model output normalization (text → DiagnosisResult)
// Author: kelexine (https://github.com/kelexine)

use crate::error::{ApiError, Result};
use crate::models::DiagnosisResult;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Lazily initialized regex for Markdown code fences
static CODE_FENCE_REGEX: OnceLock<Regex> = OnceLock::new();

/// Get or initialize the code fence regex
fn get_code_fence_regex() -> &'static Regex {
    CODE_FENCE_REGEX.get_or_init(|| {
        Regex::new(r"(?is)\A```(?:json)?[ \t]*\r?\n?(.*?)\s*(?:```)?\s*\z")
            .expect("Invalid regex pattern")
    })
}

/// Remove a surrounding ```` ```json ```` or bare ```` ``` ```` fence and trim.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    get_code_fence_regex()
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|inner| inner.as_str().trim())
        .unwrap_or(trimmed)
}

/// Turn the raw model text into a validated `DiagnosisResult`.
///
/// Text that is not JSON is an upstream-format error; JSON of the wrong shape
/// is a schema-validation error. Both map to 502.
pub fn normalize(raw: &str) -> Result<DiagnosisResult> {
    let json_str = strip_code_fence(raw);

    let value: Value = serde_json::from_str(json_str).map_err(|e| {
        warn!(
            "Gemini did not return valid JSON ({}). Response: {}",
            e,
            raw.chars().take(500).collect::<String>()
        );
        ApiError::UpstreamFormat(e.to_string())
    })?;

    let result: DiagnosisResult = serde_json::from_value(value).map_err(|e| {
        warn!("Gemini JSON does not match the diagnosis schema: {}", e);
        ApiError::SchemaValidation(e.to_string())
    })?;

    debug!(
        "Normalized diagnosis: healthy={}, name={}",
        result.planta_saudavel, result.nome_doenca_praga
    );
    Ok(result)
}
