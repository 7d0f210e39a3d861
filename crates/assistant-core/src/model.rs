//! Text-completion collaborator trait.

use async_trait::async_trait;

use crate::error::ModelError;

/// Contract for the large-language-model collaborator.
///
/// One prompt in, one text reply out. Implementations own their own
/// generation parameters (temperature, token caps); the assistant layer
/// only sees text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send a prompt and return the model's reply.
    async fn complete(&self, prompt: &str) -> Result<String, ModelError>;

    /// The implementation's name (used for logging).
    fn name(&self) -> &str;
}
