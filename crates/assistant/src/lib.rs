//! Conversational command layer for the task manager.
//!
//! This crate maps free-text chat utterances to task operations against
//! the REST backend and the PIN-gated vault, falling back to a language
//! model for anything that is not a recognized command.
//!
//! # Architecture
//!
//! ```text
//! User utterance (from the UI)
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        ASSISTANT                            │
//! │                                                             │
//! │  1. Sanitize (strip injection chars, cap length)            │
//! │         ↓                                                   │
//! │  2. Classify (ordered keyword rules, Spanish vocabulary)    │
//! │         ↓                                                   │
//! │  3. Dispatch to one handler:                                │
//! │     • list / create / update → task store or vault          │
//! │     • delete → confirmation question, then delete on        │
//! │       "sí ... confirmo"                                     │
//! │     • move / "concedido" → copy to vault, delete original   │
//! │     • anything else → language-model fallback chat          │
//! │         ↓                                                   │
//! │  4. Reply { text, severity } back to the UI                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use assistant::{Assistant, ConversationContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tasks = task_client::TaskServerClient::from_env()?;
//!     let vault = vault_store::Vault::new(vault_store::EncryptedFileStore::from_env()?);
//!     let model = gemini_brain::GeminiModel::from_env()?;
//!
//!     let assistant = Assistant::new(tasks, vault, model);
//!     let mut ctx = ConversationContext::new();
//!
//!     let reply = assistant.handle("muéstrame mis tareas", &mut ctx).await;
//!     println!("{}", reply.text);
//!     Ok(())
//! }
//! ```

mod assistant;
mod classifier;
mod context;
mod error;
mod intent;
mod prompts;
mod reply;
mod sanitize;

// Public exports
pub use assistant::{Assistant, VAULT_LOCKED_MSG};
pub use classifier::{is_delete_confirmation, Classifier};
pub use context::{ConversationContext, LastAction, TaskHandle};
pub use error::AssistantError;
pub use intent::Intent;
pub use prompts::{chat_prompt, suggestion_prompt, CHAT_PREAMBLE};
pub use reply::{Reply, Severity};
pub use sanitize::{sanitize, MAX_PROMPT_CHARS};

// Re-export commonly used types from dependencies
pub use assistant_core::{
    ChatModel, ModelError, NewTask, StoreError, Task, TaskPatch, TaskStore, TaskVault, VaultTask,
};
