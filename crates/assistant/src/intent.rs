//! Classified intents.

use assistant_core::TaskPatch;

/// The classified purpose of a user utterance.
///
/// Produced by [`crate::Classifier`] with a fixed priority order:
/// list, create, update, delete, move-to-vault, granted, chat; the
/// first matching pattern wins.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Show the task list, optionally including the vault.
    ListTasks { include_vault: bool },

    /// Create a task. A missing title is a valid classification; the
    /// handler answers with an instructive prompt instead of mutating.
    CreateTask {
        title: Option<String>,
        description: String,
        is_vault: bool,
    },

    /// Update a task. `task_id` is the explicit numeric reference, if
    /// any; the handler falls back to the conversation context.
    UpdateTask {
        task_id: Option<i64>,
        patch: TaskPatch,
        is_vault: bool,
    },

    /// Request a deletion. Never executed directly: always answered
    /// with a confirmation question.
    DeleteTask {
        task_id: Option<i64>,
        is_vault: bool,
    },

    /// Move a backend task into the vault.
    MoveToVault { task_id: Option<i64> },

    /// The "concedido" shortcut: move the last-mentioned task into the
    /// vault without further confirmation.
    Granted,

    /// Anything else; forwarded to the language model.
    GeneralChat,
}

impl Intent {
    /// Get a human-readable description of this intent (for logging).
    pub fn description(&self) -> String {
        match self {
            Self::ListTasks { include_vault } => {
                format!("List tasks (vault: {})", include_vault)
            }
            Self::CreateTask { title, is_vault, .. } => format!(
                "Create task (title: {:?}, vault: {})",
                title.as_deref().unwrap_or("<none>"),
                is_vault
            ),
            Self::UpdateTask { task_id, is_vault, .. } => {
                format!("Update task (id: {:?}, vault: {})", task_id, is_vault)
            }
            Self::DeleteTask { task_id, is_vault } => {
                format!("Delete task (id: {:?}, vault: {})", task_id, is_vault)
            }
            Self::MoveToVault { task_id } => format!("Move to vault (id: {:?})", task_id),
            Self::Granted => "Granted shortcut".to_string(),
            Self::GeneralChat => "General chat".to_string(),
        }
    }
}
