//! Secure key-value stores backing the vault.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use base64::Engine;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use assistant_core::StoreError;

use crate::crypto::{CryptoError, SecretBoxCodec};

/// Default directory for the file-backed store.
const DEFAULT_DATA_DIR: &str = ".vault";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV_VAR: &str = "VAULT_DATA_DIR";

/// Encrypted key-value storage: get/set/delete by string key.
///
/// Values are opaque strings; callers own serialization. Mirrors the
/// platform secure-storage primitive the vault was written against.
#[async_trait]
pub trait SecureStore: Send + Sync {
    /// Read a value, `None` if the key has never been written.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// File-backed [`SecureStore`] sealing every value with a secretbox codec.
///
/// Each key maps to one file (`<dir>/<key>.enc`) holding the base64 of
/// `nonce || ciphertext`.
pub struct EncryptedFileStore {
    dir: PathBuf,
    codec: SecretBoxCodec,
}

impl EncryptedFileStore {
    /// Create a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>, codec: SecretBoxCodec) -> Self {
        Self {
            dir: dir.into(),
            codec,
        }
    }

    /// Create a store from environment variables.
    ///
    /// - `VAULT_SECRET_KEY` - sealing key, hex or base64 (required)
    /// - `VAULT_DATA_DIR` - storage directory (default `.vault`)
    pub fn from_env() -> Result<Self, CryptoError> {
        let codec = SecretBoxCodec::from_env()?;
        let dir = std::env::var(DATA_DIR_ENV_VAR).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        Ok(Self::new(dir, codec))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.enc", key))
    }
}

#[async_trait]
impl SecureStore for EncryptedFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);

        let encoded = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Storage(format!("read {}: {}", path.display(), e))),
        };

        let sealed = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| StoreError::Crypto(format!("corrupt blob for {}: {}", key, e)))?;

        let plaintext = self
            .codec
            .decrypt(&sealed)
            .map_err(|e| StoreError::Crypto(e.to_string()))?;

        let value = String::from_utf8(plaintext)
            .map_err(|e| StoreError::Crypto(format!("non-utf8 plaintext for {}: {}", key, e)))?;

        debug!("Read vault key {} ({} chars)", key, value.len());
        Ok(Some(value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::Storage(format!("create {}: {}", self.dir.display(), e)))?;

        let sealed = self
            .codec
            .encrypt(value.as_bytes())
            .map_err(|e| StoreError::Crypto(e.to_string()))?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(sealed);

        let path = self.path_for(key);
        tokio::fs::write(&path, encoded)
            .await
            .map_err(|e| StoreError::Storage(format!("write {}: {}", path.display(), e)))?;

        debug!("Wrote vault key {} ({} chars)", key, value.len());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                warn!("Failed to delete vault key {}: {}", key, e);
                Err(StoreError::Storage(format!(
                    "delete {}: {}",
                    path.display(),
                    e
                )))
            }
        }
    }
}

impl std::fmt::Debug for EncryptedFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedFileStore")
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}

/// In-memory [`SecureStore`] for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SecureStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const TEST_KEY: &str = "hex:0101010101010101010101010101010101010101010101010101010101010101";

    fn file_store(dir: &Path) -> EncryptedFileStore {
        EncryptedFileStore::new(dir, SecretBoxCodec::from_key_str(TEST_KEY).unwrap())
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();

        assert_eq!(store.get("vault_pin").await.unwrap(), None);
        store.set("vault_pin", "123456").await.unwrap();
        assert_eq!(
            store.get("vault_pin").await.unwrap(),
            Some("123456".to_string())
        );

        store.delete("vault_pin").await.unwrap();
        assert_eq!(store.get("vault_pin").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = file_store(dir.path());

        assert_eq!(store.get("vault_tasks").await.unwrap(), None);
        store.set("vault_tasks", "[]").await.unwrap();
        assert_eq!(
            store.get("vault_tasks").await.unwrap(),
            Some("[]".to_string())
        );
    }

    #[tokio::test]
    async fn test_file_store_ciphertext_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = file_store(dir.path());

        store.set("vault_pin", "123456").await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join("vault_pin.enc")).unwrap();
        assert!(!raw.contains("123456"));
    }

    #[tokio::test]
    async fn test_file_store_wrong_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = file_store(dir.path());
        store.set("vault_pin", "123456").await.unwrap();

        let other = EncryptedFileStore::new(
            dir.path(),
            SecretBoxCodec::from_key_str(
                "hex:0202020202020202020202020202020202020202020202020202020202020202",
            )
            .unwrap(),
        );

        assert!(matches!(
            other.get("vault_pin").await,
            Err(StoreError::Crypto(_))
        ));
    }

    #[tokio::test]
    async fn test_file_store_delete_absent_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = file_store(dir.path());
        store.delete("never_written").await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = file_store(dir.path());

        store.set("vault_tasks", "[1]").await.unwrap();
        store.set("vault_tasks", "[1,2]").await.unwrap();
        assert_eq!(
            store.get("vault_tasks").await.unwrap(),
            Some("[1,2]".to_string())
        );
    }
}
