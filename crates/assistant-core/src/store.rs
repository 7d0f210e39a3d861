//! Collaborator traits for the two task stores.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::task::{NewTask, Task, TaskPatch, VaultTask};

/// Contract for the REST task backend.
///
/// Abstracted so handlers can be exercised against stub stores in tests.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Fetch all tasks.
    async fn list(&self) -> Result<Vec<Task>, StoreError>;

    /// Fetch a single task by id.
    async fn get(&self, id: i64) -> Result<Task, StoreError>;

    /// Create a task; the backend assigns the identifier.
    async fn create(&self, task: NewTask) -> Result<Task, StoreError>;

    /// Apply a partial update to a task.
    async fn update(&self, id: i64, patch: TaskPatch) -> Result<Task, StoreError>;

    /// Delete a task by id.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

/// Contract for the PIN-gated local vault.
///
/// All task operations fail with [`StoreError::Locked`] while the vault
/// is locked; callers are expected to check [`TaskVault::is_unlocked`]
/// first and produce a friendlier message.
#[async_trait]
pub trait TaskVault: Send + Sync {
    /// Whether the current session has unlocked the vault.
    fn is_unlocked(&self) -> bool;

    /// Fetch all vault tasks.
    async fn list(&self) -> Result<Vec<VaultTask>, StoreError>;

    /// Create a vault task; the vault assigns id and timestamp.
    async fn create(&self, task: NewTask) -> Result<VaultTask, StoreError>;

    /// Apply a partial update to a vault task.
    async fn update(&self, id: &str, patch: TaskPatch) -> Result<VaultTask, StoreError>;

    /// Delete a vault task by id.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
