//! sealnote-crypto: Client-side note encryption for sealnote
//!
//! Encrypted payload wire format (ASCII):
//! ```text
//! <iv base64url> ":" <ciphertext || 16-byte tag, base64url>
//! ```
//!
//! Key hierarchy:
//! ```text
//! Base Key (256-bit random, travels only in the URL fragment)
//!   └── Master Key (PBKDF2-HMAC-SHA256, 100k iterations,
//!       salt = SHA-256(base key), ikm = base key || password)
//!         └── Note AEAD: AES-256-GCM (default) or ChaCha20-Poly1305,
//!             96-bit random IV per payload
//! ```
//!
//! The base key never reaches the server; the master key exists only in
//! memory for the duration of one encrypt/decrypt call.

pub mod aead;
pub mod encoding;
pub mod kdf;
pub mod keys;

pub use aead::EncryptionAlgorithm;
pub use encoding::{b64url_decode, b64url_encode};
pub use kdf::{derive_master_key, PBKDF2_ITERATIONS};
pub use keys::{BaseKey, MasterKey};

/// Size of base and master keys in bytes (256-bit)
pub const KEY_SIZE: usize = 32;

/// Size of an AEAD initialization vector (96-bit)
pub const IV_SIZE: usize = 12;

/// Size of the appended authentication tag
pub const TAG_SIZE: usize = 16;
