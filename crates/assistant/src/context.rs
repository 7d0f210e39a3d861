//! Conversation context for resolving elliptical follow-ups.

/// Reference to a task in either store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskHandle {
    /// A backend task, by its numeric server id.
    Server(i64),
    /// A vault task, by its string id.
    Vault(String),
}

impl TaskHandle {
    /// Whether this handle points into the vault.
    pub fn is_vault(&self) -> bool {
        matches!(self, TaskHandle::Vault(_))
    }

    /// Short user-facing label ("#5" or "privada").
    pub fn label(&self) -> String {
        match self {
            TaskHandle::Server(id) => format!("#{}", id),
            TaskHandle::Vault(_) => "privada".to_string(),
        }
    }
}

/// Tag of the last classified action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastAction {
    Listed,
    Created,
    Updated,
    /// A delete was requested and awaits the user's confirmation.
    DeleteRequested,
    Deleted,
    MovedToVault,
}

/// Short-lived state threaded through successive `handle` calls.
///
/// Owned by the caller (the UI layer), not a process-wide singleton;
/// one context per conversation. Task-touching intents overwrite it,
/// general chat leaves it alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationContext {
    /// The task the conversation last referred to.
    pub last_task: Option<TaskHandle>,
    /// What the assistant last did with it.
    pub last_action: Option<LastAction>,
}

impl ConversationContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the task an intent acted on.
    pub fn remember(&mut self, task: TaskHandle, action: LastAction) {
        self.last_task = Some(task);
        self.last_action = Some(action);
    }

    /// Record an action with no surviving task reference.
    pub fn remember_action(&mut self, action: LastAction) {
        self.last_task = None;
        self.last_action = Some(action);
    }

    /// Whether a delete is pending confirmation.
    pub fn delete_pending(&self) -> bool {
        self.last_action == Some(LastAction::DeleteRequested) && self.last_task.is_some()
    }
}
