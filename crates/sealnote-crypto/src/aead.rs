//! AEAD algorithm registry
//!
//! A closed enum instead of a runtime map: every supported algorithm is a
//! variant carrying its cipher, resolved at compile time. The string wire
//! tag travels alongside the ciphertext in the stored record, so adding a
//! variant keeps old payloads decryptable.
//!
//! Payload wire format (all algorithms):
//! ```text
//! base64url(12-byte random IV) ":" base64url(ciphertext || 16-byte tag)
//! ```

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::Aes256Gcm;
use chacha20poly1305::ChaCha20Poly1305;
use rand::RngCore;

use sealnote_core::{SealnoteError, SealnoteResult};

use crate::encoding::{b64url_decode, b64url_encode};
use crate::keys::MasterKey;
use crate::{IV_SIZE, TAG_SIZE};

/// The supported AEAD algorithms, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncryptionAlgorithm {
    /// AES-256-GCM, the default for every usecase assembly.
    #[default]
    Aes256Gcm,
    /// ChaCha20-Poly1305 (IETF variant, 96-bit nonce).
    ChaCha20Poly1305,
}

impl EncryptionAlgorithm {
    const REGISTRY: [EncryptionAlgorithm; 2] = [
        EncryptionAlgorithm::Aes256Gcm,
        EncryptionAlgorithm::ChaCha20Poly1305,
    ];

    /// The string wire tag stored alongside encrypted payloads.
    pub fn name(&self) -> &'static str {
        match self {
            EncryptionAlgorithm::Aes256Gcm => "aes-256-gcm",
            EncryptionAlgorithm::ChaCha20Poly1305 => "chacha20-poly1305",
        }
    }

    /// Resolve a wire tag. Fails before any cryptographic work so an
    /// unsupported name never reaches the cipher layer.
    pub fn from_name(name: &str) -> SealnoteResult<Self> {
        Self::REGISTRY
            .iter()
            .copied()
            .find(|a| a.name() == name)
            .ok_or_else(|| SealnoteError::UnknownAlgorithm(name.to_string()))
    }

    /// Supported wire tags, in registration order.
    pub fn supported() -> Vec<&'static str> {
        Self::REGISTRY.iter().map(|a| a.name()).collect()
    }

    /// Encrypt a serialized note buffer into the `<iv>:<ciphertext+tag>`
    /// payload string, using a fresh random 96-bit IV.
    pub fn encrypt_buffer(&self, plaintext: &[u8], key: &MasterKey) -> SealnoteResult<String> {
        let mut iv = [0u8; IV_SIZE];
        rand::thread_rng().fill_bytes(&mut iv);

        let ciphertext = match self {
            EncryptionAlgorithm::Aes256Gcm => {
                let cipher = Aes256Gcm::new(key.as_bytes().into());
                cipher.encrypt(aes_gcm::Nonce::from_slice(&iv), plaintext)
            }
            EncryptionAlgorithm::ChaCha20Poly1305 => {
                let cipher = ChaCha20Poly1305::new(key.as_bytes().into());
                cipher.encrypt(chacha20poly1305::Nonce::from_slice(&iv), plaintext)
            }
        }
        .map_err(|_| SealnoteError::EncryptionFailed)?;

        Ok(format!("{}:{}", b64url_encode(&iv), b64url_encode(&ciphertext)))
    }

    /// Decrypt a payload string back into the serialized note buffer.
    ///
    /// Malformed structure, truncation, and tag mismatch all collapse into
    /// `DecryptionFailed`; a caller learns nothing about which check broke.
    pub fn decrypt_string(&self, payload: &str, key: &MasterKey) -> SealnoteResult<Vec<u8>> {
        let (iv_part, ct_part) = payload
            .split_once(':')
            .ok_or(SealnoteError::DecryptionFailed)?;
        if ct_part.contains(':') {
            return Err(SealnoteError::DecryptionFailed);
        }

        let iv = b64url_decode(iv_part).map_err(|_| SealnoteError::DecryptionFailed)?;
        let ciphertext = b64url_decode(ct_part).map_err(|_| SealnoteError::DecryptionFailed)?;
        if iv.len() != IV_SIZE || ciphertext.len() < TAG_SIZE {
            return Err(SealnoteError::DecryptionFailed);
        }

        match self {
            EncryptionAlgorithm::Aes256Gcm => {
                let cipher = Aes256Gcm::new(key.as_bytes().into());
                cipher.decrypt(aes_gcm::Nonce::from_slice(&iv), ciphertext.as_ref())
            }
            EncryptionAlgorithm::ChaCha20Poly1305 => {
                let cipher = ChaCha20Poly1305::new(key.as_bytes().into());
                cipher.decrypt(chacha20poly1305::Nonce::from_slice(&iv), ciphertext.as_ref())
            }
        }
        .map_err(|_| SealnoteError::DecryptionFailed)
    }
}

impl std::fmt::Display for EncryptionAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
