//! Google Gemini text-completion client.
//!
//! Implements [`assistant_core::ChatModel`] over the Gemini
//! `generateContent` REST endpoint. Provider failures are sorted into
//! the [`assistant_core::ModelError`] categories the assistant renders
//! as distinct user-facing messages (credential, quota, safety,
//! network, other).

mod api_types;
mod config;
mod model;

pub use api_types::{
    ApiErrorDetails, ApiErrorResponse, Candidate, Content, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, Part, PromptFeedback, UsageMetadata,
};
pub use config::{GeminiConfig, GeminiConfigBuilder};
pub use model::GeminiModel;

// Re-export the trait so callers don't need assistant-core in scope.
pub use assistant_core::{ChatModel, ModelError};
