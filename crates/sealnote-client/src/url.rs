//! Secret-distribution URL scheme
//!
//! ```text
//! <clientBaseUrl>/<noteId>#[pw:]<base64url base key>
//! ```
//!
//! The base key rides exclusively in the fragment, which HTTP clients never
//! transmit to the origin server. That is the core privacy property of the
//! whole system; nothing in this module may move the key anywhere else.

use sealnote_core::{NoteId, SealnoteError, SealnoteResult};

/// The literal fragment marker for password-protected notes.
const PASSWORD_MARKER: &str = "pw";

/// The three pieces a share URL carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNoteUrl {
    pub note_id: NoteId,
    pub base_key: String,
    pub password_protected: bool,
}

/// Build the shareable URL for a note. A trailing slash on the base URL is
/// tolerated.
pub fn create_note_url(
    note_id: &NoteId,
    base_key: &str,
    client_base_url: &str,
    password_protected: bool,
) -> String {
    let base = client_base_url.trim_end_matches('/');
    if password_protected {
        format!("{base}/{note_id}#{PASSWORD_MARKER}:{base_key}")
    } else {
        format!("{base}/{note_id}#{base_key}")
    }
}

/// Parse a share URL back into its pieces.
///
/// The note id is the last non-empty path segment before the fragment. The
/// fragment is split on `:`; one segment is a bare key, `pw:<key>` marks a
/// password-protected note, and every other shape is rejected.
pub fn parse_note_url(url: &str) -> SealnoteResult<ParsedNoteUrl> {
    let (location, fragment) = url
        .split_once('#')
        .ok_or_else(|| invalid("missing fragment"))?;

    // Query strings never carry anything we need
    let location = location.split('?').next().unwrap_or(location);

    // Skip "<scheme>://<authority>" so a bare host never parses as an id
    let path = match location.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map(|(_, path)| path).unwrap_or(""),
        None => location,
    };
    let note_id = path
        .split('/')
        .rev()
        .find(|segment| !segment.is_empty())
        .ok_or_else(|| invalid("missing note id"))?;

    let segments: Vec<&str> = fragment.split(':').collect();
    let (password_protected, base_key) = match segments.as_slice() {
        [key] if !key.is_empty() => (false, *key),
        [PASSWORD_MARKER, key] if !key.is_empty() => (true, *key),
        _ => return Err(invalid("malformed fragment")),
    };

    Ok(ParsedNoteUrl {
        note_id: NoteId::from(note_id),
        base_key: base_key.to_string(),
        password_protected,
    })
}

fn invalid(reason: &str) -> SealnoteError {
    SealnoteError::InvalidNoteUrl(reason.to_string())
}
