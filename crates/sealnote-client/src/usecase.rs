//! Encrypt-note and decrypt-note usecases.

use secrecy::SecretString;
use tracing::debug;

use sealnote_core::{Note, NoteAsset, SealnoteError, SealnoteResult};
use sealnote_crypto::{derive_master_key, BaseKey, EncryptionAlgorithm};
use sealnote_format::SerializationFormat;

/// The result of encrypting a note: everything the server stores, plus the
/// base key — the only copy of the secret, destined for the URL fragment.
#[derive(Debug, Clone)]
pub struct EncryptedNote {
    /// `<iv>:<ciphertext+tag>` payload string
    pub payload: String,
    /// Base key as unpadded URL-safe base64
    pub base_key: String,
    /// Wire tag of the algorithm that produced the payload
    pub encryption_algorithm: String,
    /// Wire tag of the format the plaintext buffer was packed with
    pub serialization_format: String,
}

/// Client-side encryptor, composed once at startup from the algorithm and
/// format it should produce. The defaults are AES-256-GCM + packed CBOR.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoteCrypter {
    algorithm: EncryptionAlgorithm,
    format: SerializationFormat,
}

impl NoteCrypter {
    pub fn new(algorithm: EncryptionAlgorithm, format: SerializationFormat) -> Self {
        Self { algorithm, format }
    }

    /// Encrypt a note end to end: generate a fresh base key, derive the
    /// master key, pack, encrypt.
    pub fn encrypt_note(
        &self,
        content: impl Into<String>,
        assets: Vec<NoteAsset>,
        password: Option<&SecretString>,
    ) -> SealnoteResult<EncryptedNote> {
        let note = Note {
            content: content.into(),
            assets,
        };

        let base_key = BaseKey::generate();
        let master_key = derive_master_key(&base_key, password);

        let buffer = self.format.serialize_note(&note)?;
        let payload = self.algorithm.encrypt_buffer(&buffer, &master_key)?;

        debug!(
            algorithm = %self.algorithm,
            format = %self.format,
            assets = note.assets.len(),
            "note encrypted"
        );

        Ok(EncryptedNote {
            payload,
            base_key: base_key.to_base64(),
            encryption_algorithm: self.algorithm.name().to_string(),
            serialization_format: self.format.name().to_string(),
        })
    }
}

/// Decrypt a payload back into a note, driven by the wire tags stored
/// alongside it.
///
/// Registry misses (`UnknownAlgorithm`, `UnknownSerializationFormat`) fail
/// before any cryptographic work. Everything that goes wrong afterwards —
/// malformed key string, tag mismatch, truncated payload, unparseable
/// plaintext buffer — presents uniformly as `DecryptionFailed`.
pub fn decrypt_note(
    payload: &str,
    base_key: &str,
    password: Option<&SecretString>,
    algorithm_name: &str,
    format_name: &str,
) -> SealnoteResult<Note> {
    let algorithm = EncryptionAlgorithm::from_name(algorithm_name)?;
    let format = SerializationFormat::from_name(format_name)?;

    let base_key = BaseKey::from_base64(base_key)?;
    let master_key = derive_master_key(&base_key, password);

    let buffer = algorithm.decrypt_string(payload, &master_key)?;
    format
        .parse_note(&buffer)
        .map_err(|_| SealnoteError::DecryptionFailed)
}
