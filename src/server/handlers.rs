// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::diagnosis::{diagnose, normalize};
use crate::error::{ApiError, Result};
use crate::models::DiagnosisResult;
use crate::vision::{adapt_upload, validate_content_type, ImageFormat};
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub max_upload_bytes: usize,
    pub timestamp: String,
}

/// Uploaded file that passed the content-type gate.
struct UploadedImage {
    format: ImageFormat,
    data: Vec<u8>,
}

pub async fn root_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message:
            "Bem-vindo à API de Detecção de Doenças de Plantas! Use o endpoint POST /predict/ para analisar uma imagem."
                .to_string(),
    })
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model: state.gemini_client.model().to_string(),
        max_upload_bytes: state.config.server.max_upload_bytes,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::gather_metrics(),
    )
}

/// Handler for `POST /predict/`
pub async fn predict_handler(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<DiagnosisResult>> {
    let result = match multipart {
        Ok(multipart) => predict(&state, multipart).await,
        Err(rejection) => Err(ApiError::InvalidRequest(format!(
            "Expected a multipart/form-data upload: {}",
            rejection.body_text()
        ))),
    };
    crate::metrics::record_prediction(outcome_label(&result));
    result.map(Json)
}

async fn predict(state: &AppState, multipart: Multipart) -> Result<DiagnosisResult> {
    let upload = read_upload(multipart, state.config.server.max_upload_bytes).await?;

    info!(
        "Received prediction request: type={}, bytes={}",
        upload.format.mime_type(),
        upload.data.len()
    );

    let image = adapt_upload(upload.data, upload.format).await?;
    debug!("Re-encoded image to {} bytes", image.data.len());

    let raw = diagnose(&state.gemini_client, &image).await;
    normalize(&raw)
}

/// Pull the image out of the multipart body.
///
/// Parts are read in order and the first one named `file` or carrying a
/// filename is taken; later parts are ignored. The content type is checked
/// before the bytes are read.
async fn read_upload(mut multipart: Multipart, limit: usize) -> Result<UploadedImage> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit, "Failed to read multipart field"))?
    {
        let is_file = field.name() == Some("file") || field.file_name().is_some();
        if !is_file {
            continue;
        }

        let format = validate_content_type(field.content_type())?;
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, limit, "Failed to read uploaded file"))?;

        if data.is_empty() {
            return Err(ApiError::ImageProcessing("uploaded file is empty".to_string()));
        }

        return Ok(UploadedImage {
            format,
            data: data.to_vec(),
        });
    }

    Err(ApiError::InvalidRequest(
        "Missing file upload. Send the image as multipart field 'file'.".to_string(),
    ))
}

/// The body limit surfaces while streaming fields, so it is told apart by status.
fn multipart_error(error: MultipartError, limit: usize, context: &str) -> ApiError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(limit)
    } else {
        ApiError::InvalidRequest(format!("{}: {}", context, error.body_text()))
    }
}

fn outcome_label(result: &Result<DiagnosisResult>) -> &'static str {
    match result {
        Ok(diagnosis) if diagnosis.planta_saudavel => "healthy",
        Ok(_) => "not_healthy",
        Err(ApiError::InvalidRequest(_)) => "invalid_request",
        Err(ApiError::ImageProcessing(_)) => "image_error",
        Err(ApiError::PayloadTooLarge(_)) => "payload_too_large",
        Err(e) if e.status_code() == StatusCode::BAD_GATEWAY => "bad_gateway",
        Err(_) => "internal_error",
    }
}
