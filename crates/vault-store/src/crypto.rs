//! Secretbox sealing for vault blobs.

use std::env;

use base64::Engine;
use rand_core::{OsRng, RngCore};
use thiserror::Error;
use xsalsa20poly1305::aead::{Aead, KeyInit};
use xsalsa20poly1305::{Key, Nonce, XSalsa20Poly1305};

const SECRETBOX_KEY_LEN: usize = 32;
const SECRETBOX_NONCE_LEN: usize = 24;

/// Environment variable holding the vault key (hex or base64).
pub const KEY_ENV_VAR: &str = "VAULT_SECRET_KEY";

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("missing vault key")]
    MissingKey,
    #[error("invalid vault key length: {0}")]
    InvalidKeyLength(usize),
    #[error("invalid ciphertext length: {0}")]
    InvalidCiphertextLength(usize),
    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("hex error: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("crypto failure")]
    Aead,
}

/// XSalsa20-Poly1305 codec for vault values.
///
/// Every encryption draws a fresh random nonce; the nonce is prepended
/// to the ciphertext so the stored blob is self-contained.
#[derive(Debug, Clone)]
pub struct SecretBoxCodec {
    key: [u8; SECRETBOX_KEY_LEN],
}

impl SecretBoxCodec {
    /// Load the key from [`KEY_ENV_VAR`].
    pub fn from_env() -> Result<Self, CryptoError> {
        let value = env::var(KEY_ENV_VAR).map_err(|_| CryptoError::MissingKey)?;
        Self::from_key_str(&value)
    }

    /// Parse a key given as `hex:<64 hex chars>`, bare hex, or base64.
    pub fn from_key_str(value: &str) -> Result<Self, CryptoError> {
        let key = decode_key(value)?;
        Ok(Self { key })
    }

    /// Seal a plaintext value. Output layout: `nonce || ciphertext`.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let cipher = XSalsa20Poly1305::new(Key::from_slice(&self.key));
        let mut nonce_bytes = [0u8; SECRETBOX_NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);
        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| CryptoError::Aead)?;

        let mut out = Vec::with_capacity(nonce_bytes.len() + ciphertext.len());
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    /// Open a sealed value produced by [`SecretBoxCodec::encrypt`].
    pub fn decrypt(&self, sealed: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if sealed.len() < SECRETBOX_NONCE_LEN {
            return Err(CryptoError::InvalidCiphertextLength(sealed.len()));
        }
        let (nonce_bytes, ciphertext) = sealed.split_at(SECRETBOX_NONCE_LEN);
        let cipher = XSalsa20Poly1305::new(Key::from_slice(&self.key));
        let nonce = Nonce::from_slice(nonce_bytes);
        cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| CryptoError::Aead)
    }
}

fn decode_key(value: &str) -> Result<[u8; SECRETBOX_KEY_LEN], CryptoError> {
    let trimmed = value.trim();
    let bytes = if let Some(hex_value) = trimmed.strip_prefix("hex:") {
        hex::decode(hex_value)?
    } else if is_probably_hex(trimmed) {
        hex::decode(trimmed)?
    } else {
        base64::engine::general_purpose::STANDARD.decode(trimmed)?
    };

    if bytes.len() != SECRETBOX_KEY_LEN {
        return Err(CryptoError::InvalidKeyLength(bytes.len()));
    }

    let mut key = [0u8; SECRETBOX_KEY_LEN];
    key.copy_from_slice(&bytes);
    Ok(key)
}

fn is_probably_hex(value: &str) -> bool {
    value.len() == SECRETBOX_KEY_LEN * 2 && value.chars().all(|c| c.is_ascii_hexdigit())
}
