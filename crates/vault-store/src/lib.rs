//! Encrypted local persistence for the task vault.
//!
//! Two opaque string blobs live under fixed keys in a [`SecureStore`]:
//! the vault PIN and the JSON-serialized private task list. The file-backed
//! store seals every value with XSalsa20-Poly1305 (fresh random nonce per
//! write); an in-memory store backs tests.
//!
//! [`Vault`] layers the session semantics on top: PIN verification,
//! first-entry initialization, and the in-memory unlocked flag that is
//! never persisted - a fresh process always starts locked.
//!
//! # Example
//!
//! ```no_run
//! use assistant_core::TaskVault;
//! use vault_store::{EncryptedFileStore, UnlockOutcome, Vault};
//!
//! # async fn example() -> Result<(), assistant_core::StoreError> {
//! let store = EncryptedFileStore::from_env()
//!     .map_err(|e| assistant_core::StoreError::Crypto(e.to_string()))?;
//! let vault = Vault::new(store);
//!
//! match vault.unlock("123456").await? {
//!     UnlockOutcome::Initialized | UnlockOutcome::Unlocked => {
//!         let tasks = vault.list().await?;
//!         println!("{} tareas privadas", tasks.len());
//!     }
//!     other => println!("no entry: {:?}", other),
//! }
//! # Ok(())
//! # }
//! ```

mod crypto;
mod store;
mod vault;

pub use crypto::{CryptoError, SecretBoxCodec};
pub use store::{EncryptedFileStore, MemoryStore, SecureStore};
pub use vault::{UnlockOutcome, Vault, PIN_KEY, TASKS_KEY};
