use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The logical plaintext unit: text content plus binary attachments.
///
/// A `Note` only ever exists client-side. The server sees it exclusively in
/// encrypted form (see [`StoredNote`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub content: String,
    #[serde(default)]
    pub assets: Vec<NoteAsset>,
}

impl Note {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            assets: Vec::new(),
        }
    }
}

/// A binary attachment with open-ended metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteAsset {
    pub metadata: AssetMetadata,
    pub content: Vec<u8>,
}

/// Attachment metadata. `kind` is required; everything else is optional,
/// and unknown key/value pairs round-trip through `extra` untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMetadata {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AssetMetadata {
    pub fn file(name: impl Into<String>, file_type: impl Into<String>, size: u64) -> Self {
        Self {
            kind: "file".into(),
            file_type: Some(file_type.into()),
            name: Some(name.into()),
            size: Some(size),
            extra: serde_json::Map::new(),
        }
    }
}

/// Externally-opaque note identifier: a UUIDv7 rendered as a string, so ids
/// sort by creation time without being guessable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for NoteId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NoteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The record the server persists, keyed by [`NoteId`].
///
/// `payload` is the opaque `<iv>:<ciphertext+tag>` string; the algorithm and
/// format tags travel alongside it so a client can decrypt without any other
/// channel. `expiration_date` is `None` only on deployments that explicitly
/// allow unlimited lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredNote {
    pub payload: String,
    pub encryption_algorithm: String,
    pub serialization_format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    pub delete_after_reading: bool,
    #[serde(default = "default_is_public")]
    pub is_public: bool,
}

fn default_is_public() -> bool {
    true
}

impl StoredNote {
    /// Whether this record is expired at `now`. A record whose expiration
    /// equals `now` is already expired (boundary is inclusive).
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expiration_date {
            Some(expiration) => now >= expiration,
            None => false,
        }
    }
}
