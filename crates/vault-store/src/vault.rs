//! PIN-gated vault over a secure store.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

use assistant_core::{NewTask, StoreError, TaskPatch, TaskVault, VaultTask};

use crate::store::SecureStore;

/// Storage key for the PIN credential.
pub const PIN_KEY: &str = "vault_pin";

/// Storage key for the serialized task list.
pub const TASKS_KEY: &str = "vault_tasks";

/// Required PIN length.
const PIN_LEN: usize = 6;

/// Outcome of a PIN entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockOutcome {
    /// No PIN existed; this entry set the credential and unlocked the session.
    Initialized,
    /// The PIN matched the stored credential.
    Unlocked,
    /// The PIN did not match.
    WrongPin,
    /// Not a 6-digit numeric string; nothing was checked or stored.
    InvalidPin,
}

/// The PIN-gated private task store.
///
/// Unlock state is process-local and never persisted: a fresh `Vault`
/// always starts locked, whatever the store contains. The task list is
/// one JSON blob under [`TASKS_KEY`], rewritten in full on every
/// mutation.
pub struct Vault<S: SecureStore> {
    store: S,
    unlocked: AtomicBool,
}

impl<S: SecureStore> Vault<S> {
    /// Wrap a secure store. The vault starts locked.
    pub fn new(store: S) -> Self {
        Self {
            store,
            unlocked: AtomicBool::new(false),
        }
    }

    /// Whether a PIN credential exists in storage.
    pub async fn has_pin(&self) -> Result<bool, StoreError> {
        Ok(self.store.get(PIN_KEY).await?.is_some())
    }

    /// Attempt to unlock the session with a PIN entry.
    ///
    /// On an uninitialized vault, the first well-formed entry both stores
    /// the credential and unlocks the session. Later entries must match
    /// the stored PIN exactly.
    pub async fn unlock(&self, pin: &str) -> Result<UnlockOutcome, StoreError> {
        if pin.len() != PIN_LEN || !pin.chars().all(|c| c.is_ascii_digit()) {
            return Ok(UnlockOutcome::InvalidPin);
        }

        match self.store.get(PIN_KEY).await? {
            None => {
                self.store.set(PIN_KEY, pin).await?;
                self.unlocked.store(true, Ordering::SeqCst);
                info!("Vault initialized and unlocked (first PIN entry)");
                Ok(UnlockOutcome::Initialized)
            }
            Some(stored) if stored == pin => {
                self.unlocked.store(true, Ordering::SeqCst);
                debug!("Vault unlocked");
                Ok(UnlockOutcome::Unlocked)
            }
            Some(_) => {
                warn!("Vault unlock rejected: wrong PIN");
                Ok(UnlockOutcome::WrongPin)
            }
        }
    }

    /// Lock the session. The credential and the task list are untouched.
    pub fn lock(&self) {
        self.unlocked.store(false, Ordering::SeqCst);
        debug!("Vault locked");
    }

    /// Delete the credential and the task list, and lock the session.
    pub async fn reset(&self) -> Result<(), StoreError> {
        self.store.delete(TASKS_KEY).await?;
        self.store.delete(PIN_KEY).await?;
        self.unlocked.store(false, Ordering::SeqCst);
        info!("Vault reset");
        Ok(())
    }

    fn require_unlocked(&self) -> Result<(), StoreError> {
        if self.unlocked.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Locked)
        }
    }

    async fn load_tasks(&self) -> Result<Vec<VaultTask>, StoreError> {
        match self.store.get(TASKS_KEY).await? {
            Some(blob) => Ok(serde_json::from_str(&blob)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save_tasks(&self, tasks: &[VaultTask]) -> Result<(), StoreError> {
        let blob = serde_json::to_string(tasks)?;
        self.store.set(TASKS_KEY, &blob).await
    }
}

#[async_trait]
impl<S: SecureStore> TaskVault for Vault<S> {
    fn is_unlocked(&self) -> bool {
        self.unlocked.load(Ordering::SeqCst)
    }

    async fn list(&self) -> Result<Vec<VaultTask>, StoreError> {
        self.require_unlocked()?;
        self.load_tasks().await
    }

    async fn create(&self, task: NewTask) -> Result<VaultTask, StoreError> {
        self.require_unlocked()?;

        let now = Utc::now();
        let vault_task = VaultTask {
            id: now.timestamp_millis().to_string(),
            title: task.title,
            description: task.description,
            completed: task.completed,
            created_at: now.to_rfc3339(),
        };

        let mut tasks = self.load_tasks().await?;
        tasks.push(vault_task.clone());
        self.save_tasks(&tasks).await?;

        info!("Created vault task {}", vault_task.id);
        Ok(vault_task)
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> Result<VaultTask, StoreError> {
        self.require_unlocked()?;

        let mut tasks = self.load_tasks().await?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        let updated = task.clone();

        self.save_tasks(&tasks).await?;

        info!("Updated vault task {}", id);
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.require_unlocked()?;

        let mut tasks = self.load_tasks().await?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);

        if tasks.len() == before {
            return Err(StoreError::NotFound { id: id.to_string() });
        }

        self.save_tasks(&tasks).await?;

        info!("Deleted vault task {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn vault() -> Vault<MemoryStore> {
        Vault::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn test_starts_locked() {
        let vault = vault();
        assert!(!vault.is_unlocked());
        assert!(matches!(vault.list().await, Err(StoreError::Locked)));
    }

    #[tokio::test]
    async fn test_first_pin_initializes_and_unlocks() {
        let vault = vault();
        assert!(!vault.has_pin().await.unwrap());

        let outcome = vault.unlock("123456").await.unwrap();
        assert_eq!(outcome, UnlockOutcome::Initialized);
        assert!(vault.is_unlocked());
        assert!(vault.has_pin().await.unwrap());
    }

    #[tokio::test]
    async fn test_relock_and_reenter_same_pin() {
        let vault = vault();
        vault.unlock("123456").await.unwrap();
        vault.lock();
        assert!(!vault.is_unlocked());

        let outcome = vault.unlock("123456").await.unwrap();
        assert_eq!(outcome, UnlockOutcome::Unlocked);
        assert!(vault.is_unlocked());
    }

    #[tokio::test]
    async fn test_wrong_pin_stays_locked() {
        let vault = vault();
        vault.unlock("123456").await.unwrap();
        vault.lock();

        let outcome = vault.unlock("654321").await.unwrap();
        assert_eq!(outcome, UnlockOutcome::WrongPin);
        assert!(!vault.is_unlocked());
    }

    #[tokio::test]
    async fn test_invalid_pin_format() {
        let vault = vault();

        assert_eq!(
            vault.unlock("12345").await.unwrap(),
            UnlockOutcome::InvalidPin
        );
        assert_eq!(
            vault.unlock("abcdef").await.unwrap(),
            UnlockOutcome::InvalidPin
        );
        assert_eq!(
            vault.unlock("1234567").await.unwrap(),
            UnlockOutcome::InvalidPin
        );

        // nothing stored, vault still uninitialized
        assert!(!vault.has_pin().await.unwrap());
        assert!(!vault.is_unlocked());
    }

    #[tokio::test]
    async fn test_task_roundtrip() {
        let vault = vault();
        vault.unlock("123456").await.unwrap();

        let created = vault
            .create(NewTask::new("Documentos", "pasaporte y visa"))
            .await
            .unwrap();
        assert!(!created.completed);

        let listed = vault.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Documentos");

        let updated = vault
            .update(&created.id, TaskPatch::completed(true))
            .await
            .unwrap();
        assert!(updated.completed);

        vault.delete(&created.id).await.unwrap();
        assert!(vault.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let vault = vault();
        vault.unlock("123456").await.unwrap();

        let result = vault.update("999", TaskPatch::completed(true)).await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let vault = vault();
        vault.unlock("123456").await.unwrap();

        let result = vault.delete("999").await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_whole_blob_rewritten_on_mutation() {
        let store = MemoryStore::new();
        let vault = Vault::new(store);
        vault.unlock("123456").await.unwrap();

        let first = vault.create(NewTask::new("Una", "")).await.unwrap();
        let blob_after_first = vault.store.get(TASKS_KEY).await.unwrap().unwrap();
        assert!(blob_after_first.contains(&first.id));

        vault.delete(&first.id).await.unwrap();
        let blob_after_delete = vault.store.get(TASKS_KEY).await.unwrap().unwrap();
        assert_eq!(blob_after_delete, "[]");
    }

    #[tokio::test]
    async fn test_reset_clears_credential_and_tasks() {
        let vault = vault();
        vault.unlock("123456").await.unwrap();
        vault.create(NewTask::new("Privada", "")).await.unwrap();

        vault.reset().await.unwrap();
        assert!(!vault.is_unlocked());
        assert!(!vault.has_pin().await.unwrap());

        // a new PIN re-initializes an empty vault
        assert_eq!(
            vault.unlock("000000").await.unwrap(),
            UnlockOutcome::Initialized
        );
        assert!(vault.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_locked_mutations_rejected() {
        let vault = vault();
        vault.unlock("123456").await.unwrap();
        let task = vault.create(NewTask::new("Privada", "")).await.unwrap();
        vault.lock();

        assert!(matches!(
            vault.create(NewTask::new("Otra", "")).await,
            Err(StoreError::Locked)
        ));
        assert!(matches!(
            vault.update(&task.id, TaskPatch::completed(true)).await,
            Err(StoreError::Locked)
        ));
        assert!(matches!(vault.delete(&task.id).await, Err(StoreError::Locked)));
    }
}
