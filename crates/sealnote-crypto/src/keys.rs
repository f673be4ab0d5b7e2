//! Key material: the random base key and the derived master key.
//!
//! Both are zeroized on drop and redact their `Debug` output so secrets
//! never leak through logging.

use rand::RngCore;
use zeroize::Zeroize;

use sealnote_core::{SealnoteError, SealnoteResult};

use crate::encoding::{b64url_decode, b64url_encode};
use crate::KEY_SIZE;

/// The 256-bit random secret generated per note. It leaves the client only
/// inside the share URL's fragment, which HTTP clients never transmit.
#[derive(Clone)]
pub struct BaseKey {
    bytes: [u8; KEY_SIZE],
}

impl BaseKey {
    /// Generate a fresh random base key.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self { bytes }
    }

    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }

    /// Render as unpadded URL-safe base64, the form embedded in note URLs.
    pub fn to_base64(&self) -> String {
        b64url_encode(&self.bytes)
    }

    /// Parse the URL-fragment form back into a key.
    ///
    /// Malformed or wrong-length input is reported as `DecryptionFailed`:
    /// a caller holding a corrupted key string must not be able to tell it
    /// apart from holding the wrong key.
    pub fn from_base64(encoded: &str) -> SealnoteResult<Self> {
        let mut decoded = b64url_decode(encoded).map_err(|_| SealnoteError::DecryptionFailed)?;
        if decoded.len() != KEY_SIZE {
            decoded.zeroize();
            return Err(SealnoteError::DecryptionFailed);
        }
        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(&decoded);
        decoded.zeroize();
        Ok(Self { bytes })
    }
}

impl Drop for BaseKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for BaseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// The 256-bit symmetric key actually handed to the AEAD cipher, derived
/// from a [`BaseKey`] and an optional password (see [`crate::kdf`]).
#[derive(Clone)]
pub struct MasterKey {
    bytes: [u8; KEY_SIZE],
}

impl MasterKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for MasterKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_differ() {
        let a = BaseKey::generate();
        let b = BaseKey::generate();
        assert_ne!(a.as_bytes(), b.as_bytes(), "random keys must differ");
    }

    #[test]
    fn base64_roundtrip() {
        let key = BaseKey::generate();
        let encoded = key.to_base64();
        // 32 bytes → 43 unpadded base64 chars
        assert_eq!(encoded.len(), 43);
        let parsed = BaseKey::from_base64(&encoded).unwrap();
        assert_eq!(key.as_bytes(), parsed.as_bytes());
    }

    #[test]
    fn truncated_key_string_fails_as_decryption_failure() {
        let key = BaseKey::generate();
        let mut encoded = key.to_base64();
        encoded.pop();
        let err = BaseKey::from_base64(&encoded).unwrap_err();
        assert!(matches!(err, SealnoteError::DecryptionFailed));
    }

    #[test]
    fn debug_output_is_redacted() {
        let key = BaseKey::generate();
        let debug = format!("{key:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(&key.to_base64()));
    }
}
