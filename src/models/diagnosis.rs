// Diagnosis result returned to API consumers
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};
use serde_json::json;

/// Name reported when the model refused the image for policy reasons.
pub const BLOCKED_NAME: &str = "Blocked by AI";

/// Name reported when the model could not be reached or failed.
pub const AI_ERROR_NAME: &str = "AI Error";

/// Plant diagnosis, field names match the public API contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub planta_saudavel: bool,
    pub nome_doenca_praga: String,
    pub descricao: String,
    pub sugestoes_tratamento: Vec<String>,
}

impl DiagnosisResult {
    /// Negative result for a prompt the model blocked.
    pub fn blocked(reason: &str) -> Self {
        Self {
            planta_saudavel: false,
            nome_doenca_praga: BLOCKED_NAME.to_string(),
            descricao: format!("Content blocked by the AI model. Reason: {}", reason),
            sugestoes_tratamento: vec!["Try a different image.".to_string()],
        }
    }

    /// Negative result for a failed model call.
    ///
    /// Double quotes in `message` become single quotes.
    pub fn ai_error(message: &str) -> Self {
        Self {
            planta_saudavel: false,
            nome_doenca_praga: AI_ERROR_NAME.to_string(),
            descricao: format!(
                "A critical error occurred while communicating with the AI or processing its response: {}",
                message.replace('"', "'")
            ),
            sugestoes_tratamento: vec!["Please try again later or contact support.".to_string()],
        }
    }

    /// Serialize to a JSON object string.
    pub fn to_json(&self) -> String {
        json!({
            "planta_saudavel": self.planta_saudavel,
            "nome_doenca_praga": self.nome_doenca_praga,
            "descricao": self.descricao,
            "sugestoes_tratamento": self.sugestoes_tratamento,
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json_parses_back() {
        let result = DiagnosisResult::blocked("OTHER");
        let parsed: DiagnosisResult = serde_json::from_str(&result.to_json()).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_treatments_must_be_a_list() {
        let value = json!({
            "planta_saudavel": false,
            "nome_doenca_praga": "Ferrugem",
            "descricao": "Manchas alaranjadas.",
            "sugestoes_tratamento": "Aplicar fungicida."
        });
        assert!(serde_json::from_value::<DiagnosisResult>(value).is_err());
    }

    #[test]
    fn test_extra_fields_are_dropped() {
        let value = json!({
            "planta_saudavel": true,
            "nome_doenca_praga": "Nenhuma",
            "descricao": "Saudável.",
            "sugestoes_tratamento": [],
            "confianca": 0.9
        });
        let result: DiagnosisResult = serde_json::from_value(value).unwrap();
        let out = serde_json::to_value(&result).unwrap();
        assert!(out.get("confianca").is_none());
    }

    #[test]
    fn test_ai_error_replaces_double_quotes() {
        let result = DiagnosisResult::ai_error(r#"error sending request for url "http://x""#);
        assert!(!result.descricao.contains('"'));
        assert!(result.descricao.contains("'http://x'"));
        assert!(!result.planta_saudavel);
    }

    #[test]
    fn test_blocked_mentions_reason() {
        let result = DiagnosisResult::blocked("SAFETY");
        assert_eq!(result.nome_doenca_praga, BLOCKED_NAME);
        assert!(result.descricao.ends_with("SAFETY"));
        assert_eq!(result.sugestoes_tratamento.len(), 1);
    }
}
