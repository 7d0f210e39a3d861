//! Error types for collaborator operations.

use thiserror::Error;

/// Errors from the task backend and the vault store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not reach the backend at all.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// No task with the given identifier.
    #[error("task not found: {id}")]
    NotFound { id: String },

    /// Reading or writing the local encrypted store failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Encrypting or decrypting a stored blob failed.
    #[error("crypto error: {0}")]
    Crypto(String),

    /// A vault operation was attempted while the vault is locked.
    #[error("vault is locked")]
    Locked,

    /// Serializing or deserializing a payload failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from the text-completion collaborator, pre-sorted into the
/// categories the assistant turns into distinct user-facing messages.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The provider rejected the credential.
    #[error("invalid API key")]
    InvalidApiKey,

    /// The provider's usage quota is exhausted.
    #[error("quota exceeded")]
    QuotaExceeded,

    /// The provider blocked the prompt or the reply on safety grounds.
    #[error("content blocked by safety policy")]
    SafetyBlocked,

    /// Could not reach the provider.
    #[error("network error: {0}")]
    Network(String),

    /// Any other provider-side failure.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The client is misconfigured (missing key, bad URL).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The provider answered with something we could not interpret.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
