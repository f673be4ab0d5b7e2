//! URL-safe base64 conversion, shared by every other module.
//!
//! Unpadded URL-safe alphabet: the output lands in URL fragments and path
//! segments, so `+`, `/` and `=` are all off the table.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use sealnote_core::{SealnoteError, SealnoteResult};

/// Encode bytes as unpadded URL-safe base64.
pub fn b64url_encode(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Decode unpadded URL-safe base64 back into bytes.
pub fn b64url_decode(encoded: &str) -> SealnoteResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|e| SealnoteError::Serialization(format!("base64url decode: {e}")))
}
