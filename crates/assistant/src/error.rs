//! Error type for the dispatch boundary.

use assistant_core::{ModelError, StoreError};
use thiserror::Error;

/// Collaborator failures surfacing at the outer dispatch boundary.
///
/// Never escapes [`crate::Assistant::handle`]: every variant is turned
/// into a formatted, categorized [`crate::Reply`] there.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// A task-store or vault operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The language-model collaborator failed.
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}
