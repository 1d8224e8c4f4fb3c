// Diagnosis requests against the vision model
// Author: kelexine (https://github.com/kelexine)

use super::prompt::PLANT_DIAGNOSIS_PROMPT;
use crate::error::ApiError;
use crate::gemini::GeminiClient;
use crate::models::gemini::{Content, GenerateContentRequest, GenerationConfig, InlineData, Part};
use crate::models::DiagnosisResult;
use crate::utils::logging::sanitize;
use crate::vision::ImagePart;
use base64::Engine;
use tracing::{debug, error, warn};

/// Build the single-turn request: prompt first, then the image.
pub fn build_request(image: &ImagePart) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![
                Part::Text {
                    text: PLANT_DIAGNOSIS_PROMPT.to_string(),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type.clone(),
                        data: base64::engine::general_purpose::STANDARD.encode(&image.data),
                    },
                },
            ],
        }],
        generation_config: Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
        }),
    }
}

/// Ask the model for a diagnosis of `image`.
///
/// Never fails: a policy block or a failed call is turned into a negative
/// `DiagnosisResult` serialized as JSON. Otherwise the model's text is returned
/// untouched and still needs normalizing.
pub async fn diagnose(client: &GeminiClient, image: &ImagePart) -> String {
    let request = build_request(image);

    let response = match client.generate_content(&request).await {
        Ok(response) => response,
        Err(e) => return ai_error(&e),
    };

    if let Some(reason) = response.block_reason() {
        warn!("Gemini blocked the request. Reason: {}", reason);
        return DiagnosisResult::blocked(reason).to_json();
    }

    match response.text() {
        Some(text) => {
            debug!("Model returned {} chars", text.len());
            text
        }
        None => ai_error(&ApiError::GeminiApi(
            "response contained no candidate text".to_string(),
        )),
    }
}

fn ai_error(e: &ApiError) -> String {
    error!("Gemini call failed: {}", e);
    DiagnosisResult::ai_error(&sanitize(&e.to_string())).to_json()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_prompt_then_image() {
        let image = ImagePart {
            mime_type: "image/webp".to_string(),
            data: vec![1, 2, 3],
        };
        let request = build_request(&image);

        let parts = &request.contents[0].parts;
        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].role, "user");
        assert_eq!(parts[0].as_text(), Some(PLANT_DIAGNOSIS_PROMPT));
        match &parts[1] {
            Part::InlineData { inline_data } => {
                assert_eq!(inline_data.mime_type, "image/webp");
                assert_eq!(inline_data.data, "AQID");
            }
            other => panic!("expected inline data, got {:?}", other),
        }
        assert_eq!(
            request.generation_config.unwrap().response_mime_type.as_deref(),
            Some("application/json")
        );
    }
}
