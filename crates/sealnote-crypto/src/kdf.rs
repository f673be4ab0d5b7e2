//! Key derivation: base key (+ optional password) → master key
//!
//! PBKDF2-HMAC-SHA256 with a fixed high iteration count. The salt is
//! SHA-256 of the base key itself, so it is reproducible from the URL
//! fragment alone and never needs to be stored. A missing password is
//! treated as the empty string: deriving "without password" and "with an
//! empty password" are the same operation by construction.

use pbkdf2::pbkdf2_hmac;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::keys::{BaseKey, MasterKey};
use crate::KEY_SIZE;

/// PBKDF2 iteration count. Changing this breaks decryption of every
/// previously encrypted note, so it is part of the wire contract.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Derive the 256-bit master key from a base key and an optional password.
///
/// Pure and deterministic: the same `(base_key, password)` pair always
/// yields the same master key.
pub fn derive_master_key(base_key: &BaseKey, password: Option<&SecretString>) -> MasterKey {
    let salt = Sha256::digest(base_key.as_bytes());

    let password_bytes: &[u8] = match password {
        Some(p) => p.expose_secret().as_bytes(),
        None => b"",
    };

    let mut ikm = Vec::with_capacity(KEY_SIZE + password_bytes.len());
    ikm.extend_from_slice(base_key.as_bytes());
    ikm.extend_from_slice(password_bytes);

    let mut key = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha256>(&ikm, &salt, PBKDF2_ITERATIONS, &mut key);
    ikm.zeroize();

    MasterKey::from_bytes(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_base_key(fill: u8) -> BaseKey {
        BaseKey::from_bytes([fill; KEY_SIZE])
    }

    #[test]
    fn derivation_is_deterministic() {
        let base = test_base_key(7);
        let password = SecretString::from("my-cat-is-cute");

        let k1 = derive_master_key(&base, Some(&password));
        let k2 = derive_master_key(&base, Some(&password));

        assert_eq!(k1.as_bytes(), k2.as_bytes(), "KDF must be deterministic");
    }

    #[test]
    fn missing_password_equals_empty_password() {
        let base = test_base_key(7);
        let empty = SecretString::from("");

        let k1 = derive_master_key(&base, None);
        let k2 = derive_master_key(&base, Some(&empty));

        assert_eq!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn different_passwords_produce_different_keys() {
        let base = test_base_key(7);

        let k1 = derive_master_key(&base, Some(&SecretString::from("password-a")));
        let k2 = derive_master_key(&base, Some(&SecretString::from("password-b")));

        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }

    #[test]
    fn single_bit_base_key_difference_changes_the_key() {
        let mut bytes = [7u8; KEY_SIZE];
        let k1 = derive_master_key(&BaseKey::from_bytes(bytes), None);
        bytes[31] ^= 0x01;
        let k2 = derive_master_key(&BaseKey::from_bytes(bytes), None);

        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }
}
