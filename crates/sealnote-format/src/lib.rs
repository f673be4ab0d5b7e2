//! sealnote-format: note ⇄ single binary buffer codecs
//!
//! A note (text plus attachments) is packed into one byte buffer before
//! encryption, so the cipher layer only ever sees an opaque blob. Like the
//! algorithm registry, the codec registry is a closed enum whose string
//! wire tag travels alongside the encrypted payload; adding a format
//! touches nothing outside this crate.

mod packed;

use sealnote_core::{Note, SealnoteError, SealnoteResult};

/// The supported serialization formats, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SerializationFormat {
    /// Array-oriented CBOR: `[content, [[metadata, content], ...]]`.
    #[default]
    CborPacked,
}

impl SerializationFormat {
    const REGISTRY: [SerializationFormat; 1] = [SerializationFormat::CborPacked];

    /// The string wire tag stored alongside encrypted payloads.
    pub fn name(&self) -> &'static str {
        match self {
            SerializationFormat::CborPacked => "cbor-packed",
        }
    }

    /// Resolve a wire tag, failing fast on an unregistered name.
    pub fn from_name(name: &str) -> SealnoteResult<Self> {
        Self::REGISTRY
            .iter()
            .copied()
            .find(|f| f.name() == name)
            .ok_or_else(|| SealnoteError::UnknownSerializationFormat(name.to_string()))
    }

    /// Supported wire tags, in registration order.
    pub fn supported() -> Vec<&'static str> {
        Self::REGISTRY.iter().map(|f| f.name()).collect()
    }

    /// Pack a note into a single byte buffer.
    pub fn serialize_note(&self, note: &Note) -> SealnoteResult<Vec<u8>> {
        match self {
            SerializationFormat::CborPacked => packed::serialize(note),
        }
    }

    /// Unpack a byte buffer back into a note.
    pub fn parse_note(&self, buffer: &[u8]) -> SealnoteResult<Note> {
        match self {
            SerializationFormat::CborPacked => packed::parse(buffer),
        }
    }
}

impl std::fmt::Display for SerializationFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sealnote_core::{AssetMetadata, NoteAsset};

    #[test]
    fn registry_order_and_default() {
        assert_eq!(SerializationFormat::supported(), vec!["cbor-packed"]);
        assert_eq!(
            SerializationFormat::default(),
            SerializationFormat::CborPacked
        );
    }

    #[test]
    fn unknown_format_fails_fast() {
        let err = SerializationFormat::from_name("xml").unwrap_err();
        assert!(matches!(err, SealnoteError::UnknownSerializationFormat(name) if name == "xml"));
    }

    #[test]
    fn text_only_roundtrip() {
        let format = SerializationFormat::CborPacked;
        let note = Note::text("Hello, World!");

        let buffer = format.serialize_note(&note).unwrap();
        assert_eq!(format.parse_note(&buffer).unwrap(), note);
    }

    #[test]
    fn assets_roundtrip_byte_for_byte() {
        let format = SerializationFormat::CborPacked;
        let note = Note {
            content: "see attachments".into(),
            assets: vec![
                NoteAsset {
                    metadata: AssetMetadata::file("cat.png", "image/png", 4),
                    content: vec![0x89, 0x50, 0x4E, 0x47],
                },
                NoteAsset {
                    metadata: AssetMetadata::file("empty.bin", "application/octet-stream", 0),
                    content: vec![],
                },
            ],
        };

        let buffer = format.serialize_note(&note).unwrap();
        let parsed = format.parse_note(&buffer).unwrap();
        assert_eq!(parsed, note);
        assert_eq!(parsed.assets[0].content, vec![0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn open_ended_metadata_survives() {
        let format = SerializationFormat::CborPacked;
        let mut metadata = AssetMetadata::file("notes.txt", "text/plain", 2);
        metadata.extra.insert(
            "checksum".into(),
            serde_json::Value::String("abc123".into()),
        );
        metadata
            .extra
            .insert("pinned".into(), serde_json::Value::Bool(true));

        let note = Note {
            content: String::new(),
            assets: vec![NoteAsset {
                metadata,
                content: b"hi".to_vec(),
            }],
        };

        let parsed = format
            .parse_note(&format.serialize_note(&note).unwrap())
            .unwrap();
        assert_eq!(parsed.assets[0].metadata.extra["checksum"], "abc123");
        assert_eq!(parsed.assets[0].metadata.extra["pinned"], true);
    }

    #[test]
    fn garbage_buffer_is_rejected() {
        let format = SerializationFormat::CborPacked;
        assert!(format.parse_note(&[0xFF, 0x00, 0x13, 0x37]).is_err());
        assert!(format.parse_note(&[]).is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_asset() -> impl Strategy<Value = NoteAsset> {
            (".{0,32}", proptest::collection::vec(any::<u8>(), 0..=1024)).prop_map(
                |(name, content)| NoteAsset {
                    metadata: AssetMetadata::file(name, "application/octet-stream", content.len() as u64),
                    content,
                },
            )
        }

        proptest! {
            /// Any note survives a serialize/parse cycle unchanged.
            #[test]
            fn roundtrip_arbitrary_notes(
                content in ".{0,256}",
                assets in proptest::collection::vec(arb_asset(), 0..4),
            ) {
                let format = SerializationFormat::CborPacked;
                let note = Note { content, assets };
                let parsed = format
                    .parse_note(&format.serialize_note(&note).unwrap())
                    .unwrap();
                prop_assert_eq!(parsed, note);
            }
        }
    }
}
