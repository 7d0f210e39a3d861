//! Gemini API request and response types.

use serde::{Deserialize, Serialize};

/// One piece of content in a request or response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Role: "user" or "model". Absent for system instructions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Content parts (text only in this client).
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Create user content with a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Create role-less content (used for system instructions).
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// A text part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// Generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// `generateContent` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
}

/// `generateContent` response body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

/// A response candidate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content (may be absent when generation was cut off).
    pub content: Option<Content>,
    /// Why generation stopped: "STOP", "MAX_TOKENS", "SAFETY", ...
    pub finish_reason: Option<String>,
}

impl Candidate {
    /// Concatenate the candidate's text parts.
    pub fn text(&self) -> Option<String> {
        let content = self.content.as_ref()?;
        if content.parts.is_empty() {
            return None;
        }
        Some(
            content
                .parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join(""),
        )
    }
}

/// Prompt-level feedback; `block_reason` is set when the prompt itself
/// was rejected.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// Token accounting.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetails,
}

/// Error details.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetails {
    #[serde(default)]
    pub code: u16,
    pub message: String,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = GenerateContentRequest {
            contents: vec![Content::user("hola")],
            generation_config: Some(GenerationConfig {
                temperature: Some(0.7),
                top_k: Some(40),
                top_p: Some(0.95),
                max_output_tokens: Some(1024),
            }),
            system_instruction: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hola");
        assert_eq!(json["generationConfig"]["topK"], 40);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 1024);
        assert!(json.get("systemInstruction").is_none());
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hola, "}, {"text": "mundo"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 4, "candidatesTokenCount": 3, "totalTokenCount": 7}
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.candidates.len(), 1);
        assert_eq!(
            response.candidates[0].text().as_deref(),
            Some("Hola, mundo")
        );
        assert_eq!(response.usage_metadata.unwrap().total_token_count, 7);
    }

    #[test]
    fn test_response_safety_block() {
        let json = r#"{
            "candidates": [],
            "promptFeedback": {"blockReason": "SAFETY"}
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert!(response.candidates.is_empty());
        assert_eq!(
            response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .as_deref(),
            Some("SAFETY")
        );
    }

    #[test]
    fn test_error_parsing() {
        let json = r#"{
            "error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}
        }"#;

        let error: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(error.error.code, 400);
        assert!(error.error.message.contains("API key not valid"));
    }
}
