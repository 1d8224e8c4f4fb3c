//! Structured logging and secret-scrubbing utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing a helper that keeps
//! Gemini API keys out of logs and error payloads.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::{ApiError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line human-readable output.
/// - `pretty` (default): Multi-line, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    // Configure filter from environment or config file
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ApiError::Config(format!("Invalid log level '{}': {}", config.level, e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format.as_str() {
        "json" => registry.with(tracing_subscriber::fmt::layer().json()).try_init(),
        "compact" => registry.with(tracing_subscriber::fmt::layer().compact()).try_init(),
        _ => registry.with(tracing_subscriber::fmt::layer().pretty()).try_init(),
    };

    result.map_err(|e| ApiError::Internal(format!("Failed to initialize logging: {}", e)))
}

/// Sanitizes secrets from log messages and error text.
///
/// Replaces Google API keys (`AIza…`) and the value of any `key=` query
/// parameter with a `\[REDACTED\]` placeholder.
pub fn sanitize(input: &str) -> String {
    let mut result = input.to_string();

    // Pattern 1: Google API keys
    result = redact_after(&result, "AIza", "[REDACTED_API_KEY]", 0);

    // Pattern 2: key=... query parameters
    result = redact_after(&result, "key=", "[REDACTED]", "key=".len());

    result
}

/// Replace every token starting at `marker` (skipping `keep` bytes of it)
/// up to the next delimiter.
fn redact_after(input: &str, marker: &str, replacement: &str, keep: usize) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(marker) {
        let start = pos + keep;
        let end = rest[start..]
            .find(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | '&' | ')' | ','))
            .map(|i| start + i)
            .unwrap_or(rest.len());

        output.push_str(&rest[..start]);
        if rest[start..end].starts_with('[') {
            // Already redacted
            output.push_str(&rest[start..end]);
        } else {
            output.push_str(replacement);
        }
        rest = &rest[end..];
    }

    output.push_str(rest);
    output
}
