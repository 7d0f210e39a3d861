//! Configuration for the Gemini client.

use std::env;

use assistant_core::ModelError;

/// Configuration for [`crate::GeminiModel`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API base URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Optional system instruction sent with every request.
    pub system_instruction: Option<String>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Top-k sampling cutoff.
    pub top_k: Option<u32>,

    /// Top-p sampling cutoff.
    pub top_p: Option<f32>,

    /// Maximum tokens for the reply.
    pub max_output_tokens: Option<u32>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: String::new(),
            model: "gemini-1.5-flash".to_string(),
            system_instruction: None,
            temperature: Some(0.7),
            top_k: Some(40),
            top_p: Some(0.95),
            max_output_tokens: Some(1024),
        }
    }
}

impl GeminiConfig {
    /// Create configuration from environment variables.
    ///
    /// Required:
    /// - `GEMINI_API_KEY` - API key for authentication
    ///
    /// Optional:
    /// - `GEMINI_API_URL` - API URL (default: https://generativelanguage.googleapis.com)
    /// - `GEMINI_MODEL` - Model name (default: gemini-1.5-flash)
    /// - `GEMINI_SYSTEM_INSTRUCTION` - System instruction text
    /// - `GEMINI_TEMPERATURE` - Temperature (default: 0.7)
    /// - `GEMINI_TOP_K` - Top-k (default: 40)
    /// - `GEMINI_TOP_P` - Top-p (default: 0.95)
    /// - `GEMINI_MAX_OUTPUT_TOKENS` - Max reply tokens (default: 1024)
    pub fn from_env() -> Result<Self, ModelError> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| ModelError::Configuration("GEMINI_API_KEY not set".to_string()))?;

        let api_url = env::var("GEMINI_API_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".to_string());

        let system_instruction = env::var("GEMINI_SYSTEM_INSTRUCTION").ok();

        let temperature = env::var("GEMINI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(0.7));

        let top_k = env::var("GEMINI_TOP_K")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(40));

        let top_p = env::var("GEMINI_TOP_P")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(0.95));

        let max_output_tokens = env::var("GEMINI_MAX_OUTPUT_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(1024));

        Ok(Self {
            api_url,
            api_key,
            model,
            system_instruction,
            temperature,
            top_k,
            top_p,
            max_output_tokens,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }
}

/// Builder for [`GeminiConfig`].
#[derive(Debug, Default)]
pub struct GeminiConfigBuilder {
    config: GeminiConfig,
}

impl GeminiConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system instruction.
    pub fn system_instruction(mut self, text: impl Into<String>) -> Self {
        self.config.system_instruction = Some(text.into());
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the top-k cutoff.
    pub fn top_k(mut self, k: u32) -> Self {
        self.config.top_k = Some(k);
        self
    }

    /// Set the top-p cutoff.
    pub fn top_p(mut self, p: f32) -> Self {
        self.config.top_p = Some(p);
        self
    }

    /// Set the maximum reply tokens.
    pub fn max_output_tokens(mut self, tokens: u32) -> Self {
        self.config.max_output_tokens = Some(tokens);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> GeminiConfig {
        self.config
    }
}
