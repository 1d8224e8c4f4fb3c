// Error types for the plantdoc API
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Could not process the image: {0}")]
    ImageProcessing(String),

    #[error("Upload exceeds the {0} byte limit")]
    PayloadTooLarge(usize),

    #[error("The AI did not return a valid JSON response. Please try again.")]
    UpstreamFormat(String),

    #[error("The AI response does not match the expected diagnosis format: {0}")]
    SchemaValidation(String),

    #[error("Gemini API error: {0}")]
    GeminiApi(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub detail: String,
}

impl ApiError {
    /// Short name of the error variant, safe to show to API consumers.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => "InvalidRequest",
            ApiError::ImageProcessing(_) => "ImageProcessing",
            ApiError::PayloadTooLarge(_) => "PayloadTooLarge",
            ApiError::UpstreamFormat(_) => "UpstreamFormat",
            ApiError::SchemaValidation(_) => "SchemaValidation",
            ApiError::GeminiApi(_) => "GeminiApi",
            ApiError::Config(_) | ApiError::ConfigParsing(_) => "Config",
            ApiError::Internal(_) => "Internal",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) | ApiError::ImageProcessing(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UpstreamFormat(_) | ApiError::SchemaValidation(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the `detail` field of the response body.
    ///
    /// Unclassified failures only expose their kind so internals don't leak.
    pub fn detail(&self) -> String {
        match self {
            ApiError::InvalidRequest(_)
            | ApiError::ImageProcessing(_)
            | ApiError::PayloadTooLarge(_)
            | ApiError::UpstreamFormat(_)
            | ApiError::SchemaValidation(_) => self.to_string(),
            _ => format!(
                "An unexpected internal error occurred while processing the image: {}.",
                self.kind()
            ),
        }
    }
}

// Convert ApiError to HTTP responses for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() && status != StatusCode::BAD_GATEWAY {
            tracing::error!(kind = self.kind(), "Unexpected error: {}", self);
        } else {
            tracing::warn!(kind = self.kind(), status = status.as_u16(), "Request failed: {}", self);
        }

        let body = ErrorPayload {
            detail: self.detail(),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
