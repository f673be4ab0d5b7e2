use thiserror::Error;

pub type SealnoteResult<T> = Result<T, SealnoteError>;

/// Closed error taxonomy for the note cryptography and lifecycle engine.
///
/// `DecryptionFailed` deliberately carries no detail about which sub-step
/// failed (IV parsing, tag verification, serialization): distinguishing them
/// would hand an attacker a decryption oracle.
#[derive(Debug, Error)]
pub enum SealnoteError {
    #[error("unknown encryption algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("unknown serialization format: {0}")]
    UnknownSerializationFormat(String),

    #[error("encryption failed")]
    EncryptionFailed,

    #[error("decryption failed")]
    DecryptionFailed,

    #[error("invalid note URL: {0}")]
    InvalidNoteUrl(String),

    #[error("note not found")]
    NoteNotFound,

    #[error("payload too large: {size} bytes (limit {limit})")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("an expiration delay is required on this instance")]
    ExpirationDelayRequired,

    #[error("expiration delay out of range: {0} seconds")]
    ExpirationDelayOutOfRange(u64),

    #[error("cannot create a private note on a public instance")]
    CannotCreatePrivateNoteOnPublicInstance,

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SealnoteError {
    /// Whether this error must present to a caller as "note not found".
    ///
    /// Expired notes are intentionally indistinguishable from notes that
    /// never existed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SealnoteError::NoteNotFound)
    }
}
