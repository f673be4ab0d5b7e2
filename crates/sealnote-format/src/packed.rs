//! The default array-oriented CBOR codec.
//!
//! Buffer layout:
//! ```text
//! [ content: text,
//!   [ [metadata: map, content: bytes], ... ] ]
//! ```
//!
//! Arrays instead of maps at the top level keep the per-note overhead to a
//! few bytes; asset metadata stays a map because its keys are open-ended.

use ciborium::Value;

use sealnote_core::{Note, NoteAsset, SealnoteError, SealnoteResult};

fn codec_err(context: &str) -> SealnoteError {
    SealnoteError::Serialization(format!("cbor-packed: {context}"))
}

pub(crate) fn serialize(note: &Note) -> SealnoteResult<Vec<u8>> {
    let assets = note
        .assets
        .iter()
        .map(|asset| {
            let metadata = Value::serialized(&asset.metadata)
                .map_err(|e| codec_err(&format!("metadata encode: {e}")))?;
            Ok(Value::Array(vec![
                metadata,
                Value::Bytes(asset.content.clone()),
            ]))
        })
        .collect::<SealnoteResult<Vec<Value>>>()?;

    let root = Value::Array(vec![
        Value::Text(note.content.clone()),
        Value::Array(assets),
    ]);

    let mut buffer = Vec::new();
    ciborium::into_writer(&root, &mut buffer)
        .map_err(|e| codec_err(&format!("encode: {e}")))?;
    Ok(buffer)
}

pub(crate) fn parse(buffer: &[u8]) -> SealnoteResult<Note> {
    let root: Value =
        ciborium::from_reader(buffer).map_err(|e| codec_err(&format!("decode: {e}")))?;

    let Value::Array(mut items) = root else {
        return Err(codec_err("expected top-level array"));
    };
    if items.len() != 2 {
        return Err(codec_err("expected [content, assets]"));
    }

    let assets_value = items.pop().unwrap_or(Value::Null);
    let content_value = items.pop().unwrap_or(Value::Null);

    let Value::Text(content) = content_value else {
        return Err(codec_err("content must be text"));
    };
    let Value::Array(asset_values) = assets_value else {
        return Err(codec_err("assets must be an array"));
    };

    let assets = asset_values
        .into_iter()
        .map(parse_asset)
        .collect::<SealnoteResult<Vec<NoteAsset>>>()?;

    Ok(Note { content, assets })
}

fn parse_asset(value: Value) -> SealnoteResult<NoteAsset> {
    let Value::Array(mut pair) = value else {
        return Err(codec_err("asset must be [metadata, content]"));
    };
    if pair.len() != 2 {
        return Err(codec_err("asset must be [metadata, content]"));
    }

    let content_value = pair.pop().unwrap_or(Value::Null);
    let metadata_value = pair.pop().unwrap_or(Value::Null);

    let Value::Bytes(content) = content_value else {
        return Err(codec_err("asset content must be bytes"));
    };
    let metadata = metadata_value
        .deserialized()
        .map_err(|e| codec_err(&format!("metadata decode: {e}")))?;

    Ok(NoteAsset { metadata, content })
}
