//! GeminiModel implementation over the generateContent endpoint.

use assistant_core::{async_trait, ChatModel, ModelError};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::api_types::{
    ApiErrorResponse, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use crate::config::GeminiConfig;

/// A [`ChatModel`] backed by the Google Gemini API.
///
/// Stateless: every call is a single-turn `generateContent` request
/// carrying the configured system instruction and generation parameters.
pub struct GeminiModel {
    client: Client,
    config: GeminiConfig,
}

impl GeminiModel {
    /// Create a new model client with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, ModelError> {
        if config.api_key.is_empty() {
            return Err(ModelError::Configuration("empty API key".to_string()));
        }

        let client = Client::builder().build().map_err(|e| {
            ModelError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        info!("GeminiModel initialized with model: {}", config.model);

        Ok(Self { client, config })
    }

    /// Create a model client from environment variables.
    ///
    /// See [`GeminiConfig::from_env`] for the variables involved.
    pub fn from_env() -> Result<Self, ModelError> {
        let config = GeminiConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            generation_config: Some(GenerationConfig {
                temperature: self.config.temperature,
                top_k: self.config.top_k,
                top_p: self.config.top_p,
                max_output_tokens: self.config.max_output_tokens,
            }),
            system_instruction: self
                .config
                .system_instruction
                .as_deref()
                .map(Content::text),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<GenerateContentResponse, ModelError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_url, self.config.model
        );

        let request = self.build_request(prompt);
        debug!("Sending request to Gemini API: {} chars prompt", prompt.len());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(classify_api_error(status.as_u16(), &error_text));
        }

        let completion: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        Ok(completion)
    }
}

#[async_trait]
impl ChatModel for GeminiModel {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        let completion = self.generate(prompt).await?;

        // A blocked prompt comes back 200 with no candidates.
        if let Some(reason) = completion
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            warn!("Prompt blocked by Gemini: {}", reason);
            return Err(ModelError::SafetyBlocked);
        }

        let candidate = completion
            .candidates
            .first()
            .ok_or_else(|| ModelError::InvalidResponse("no candidates in response".to_string()))?;

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            warn!("Reply blocked by Gemini safety filter");
            return Err(ModelError::SafetyBlocked);
        }

        let text = candidate
            .text()
            .ok_or_else(|| ModelError::InvalidResponse("candidate without text".to_string()))?;

        if let Some(usage) = completion.usage_metadata {
            debug!(
                "Token usage - prompt: {}, reply: {}, total: {}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        Ok(text)
    }

    fn name(&self) -> &str {
        "GeminiModel"
    }
}

/// Sort a non-2xx Gemini response into a [`ModelError`] category.
fn classify_api_error(status: u16, body: &str) -> ModelError {
    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.to_string(),
    };

    if message.contains("API key not valid") || status == 401 || status == 403 {
        return ModelError::InvalidApiKey;
    }

    if status == 429 || message.to_lowercase().contains("quota") {
        return ModelError::QuotaExceeded;
    }

    ModelError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> GeminiModel {
        GeminiModel::new(GeminiConfig::builder().api_key("test-key").build()).unwrap()
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let result = GeminiModel::new(GeminiConfig::default());
        assert!(matches!(result, Err(ModelError::Configuration(_))));
    }

    #[test]
    fn test_model_name() {
        assert_eq!(model().name(), "GeminiModel");
    }

    #[test]
    fn test_build_request_carries_generation_config() {
        let model = GeminiModel::new(
            GeminiConfig::builder()
                .api_key("test-key")
                .temperature(0.2)
                .max_output_tokens(64)
                .build(),
        )
        .unwrap();

        let request = model.build_request("hola");
        let config = request.generation_config.unwrap();
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.max_output_tokens, Some(64));
        assert!(request.system_instruction.is_none());
    }

    #[test]
    fn test_build_request_with_system_instruction() {
        let model = GeminiModel::new(
            GeminiConfig::builder()
                .api_key("test-key")
                .system_instruction("Eres un asistente de tareas")
                .build(),
        )
        .unwrap();

        let request = model.build_request("hola");
        let instruction = request.system_instruction.unwrap();
        assert_eq!(instruction.parts[0].text, "Eres un asistente de tareas");
        assert!(instruction.role.is_none());
    }

    #[test]
    fn test_classify_invalid_key() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}}"#;
        assert!(matches!(
            classify_api_error(400, body),
            ModelError::InvalidApiKey
        ));
        assert!(matches!(classify_api_error(401, "{}"), ModelError::InvalidApiKey));
        assert!(matches!(classify_api_error(403, "{}"), ModelError::InvalidApiKey));
    }

    #[test]
    fn test_classify_quota() {
        let body = r#"{"error": {"code": 429, "message": "Resource has been exhausted (e.g. check quota).", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert!(matches!(
            classify_api_error(429, body),
            ModelError::QuotaExceeded
        ));
    }

    #[test]
    fn test_classify_other() {
        let body = r#"{"error": {"code": 500, "message": "Internal error", "status": "INTERNAL"}}"#;
        match classify_api_error(500, body) {
            ModelError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal error");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_unparseable_body() {
        match classify_api_error(503, "Service Unavailable") {
            ModelError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }
}
