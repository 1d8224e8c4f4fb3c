// Gemini API client
// Author: kelexine (https://github.com/kelexine)

use crate::config::GeminiConfig;
use crate::error::{ApiError, Result};
use crate::models::gemini::{GenerateContentRequest, GenerateContentResponse};
use crate::utils::logging::sanitize;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error};
use zeroize::Zeroizing;

/// Client for the Google Gemini `generateContent` API.
///
/// Built once at startup and shared read-only between requests. The
/// underlying `reqwest::Client` pools connections.
pub struct GeminiClient {
    http_client: Client,
    api_key: Zeroizing<String>,
    api_base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// Fails when no API key is configured or the HTTP client cannot be built.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ApiError::Config("Gemini API key is empty".to_string()));
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .use_rustls_tls()
            .build()
            .map_err(|e| ApiError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created Gemini HTTP client for model {}", config.model);

        Ok(Self {
            http_client,
            api_key: Zeroizing::new(config.api_key.trim().to_string()),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Model every request is sent to.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base_url, self.model)
    }

    /// Call Gemini `generateContent` API.
    ///
    /// No retries: any failure is returned to the caller immediately.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let started = Instant::now();
        let result = self.send(request).await;

        let outcome = match &result {
            Ok(response) if response.block_reason().is_some() => "blocked",
            Ok(_) => "success",
            Err(_) => "error",
        };
        crate::metrics::record_gemini_call(&self.model, outcome, started.elapsed().as_secs_f64());

        result
    }

    async fn send(&self, request: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let url = self.endpoint();
        debug!("Calling generateContent API for model: {}", self.model);

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", self.api_key.as_str())
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::GeminiApi(format!("HTTP error: {}", sanitize(&e.to_string()))))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "Gemini API error: HTTP {} - Response body: {}",
                status,
                sanitize(&error_text)
            );
            let message = Self::extract_error_message(&error_text).unwrap_or(error_text);
            return Err(ApiError::GeminiApi(format!(
                "HTTP {}: {}",
                status,
                sanitize(&message)
            )));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ApiError::GeminiApi(format!("Failed to read response body: {}", e)))?;

        debug!(
            "Raw Gemini response (first 500 chars): {}",
            response_text.chars().take(500).collect::<String>()
        );

        serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse Gemini response: {}", e);
            ApiError::GeminiApi(format!("Response parsing error: {}", e))
        })
    }

    /// Extract error message from API response JSON
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            status: Option<String>,
        }

        let error = serde_json::from_str::<ErrorResponse>(response_text).ok()?.error?;
        error.message.or(error.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: &str) -> GeminiConfig {
        GeminiConfig {
            api_key: api_key.to_string(),
            api_base_url: "http://localhost:1234/v1beta/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_api_key_is_rejected() {
        assert!(matches!(GeminiClient::new(&config("  ")), Err(ApiError::Config(_))));
    }

    #[test]
    fn test_endpoint_includes_model() {
        let client = GeminiClient::new(&config("test-key")).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:1234/v1beta/models/gemini-1.5-flash-latest:generateContent"
        );
    }

    #[test]
    fn test_extract_error_message() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(
            GeminiClient::extract_error_message(body).as_deref(),
            Some("Quota exceeded")
        );
        assert!(GeminiClient::extract_error_message("<html>").is_none());
    }
}
