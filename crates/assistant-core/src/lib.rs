//! Core types and collaborator traits for the task assistant.
//!
//! This crate provides the shared interface between the conversational
//! command layer and its collaborators. It defines:
//!
//! - [`Task`] / [`NewTask`] / [`TaskPatch`] - task payloads for the REST backend
//! - [`VaultTask`] - the locally persisted private task shape
//! - [`TaskStore`] - the REST task backend contract
//! - [`TaskVault`] - the PIN-gated local store contract
//! - [`ChatModel`] - the text-completion collaborator contract
//! - [`StoreError`] / [`ModelError`] - error types per collaborator
//!
//! # Example
//!
//! ```rust
//! use assistant_core::{ChatModel, ModelError};
//! use async_trait::async_trait;
//!
//! struct CannedModel;
//!
//! #[async_trait]
//! impl ChatModel for CannedModel {
//!     async fn complete(&self, _prompt: &str) -> Result<String, ModelError> {
//!         Ok("Hola!".to_string())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "CannedModel"
//!     }
//! }
//! ```

mod error;
mod model;
mod store;
mod task;
mod validation;

pub use error::{ModelError, StoreError};
pub use model::ChatModel;
pub use store::{TaskStore, TaskVault};
pub use task::{NewTask, Task, TaskPatch, VaultTask};
pub use validation::{validate_description, validate_title, ValidationError};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
