//! sealnote-client: the two client-side operations and the share URL
//!
//! Pipeline: note → pack (sealnote-format) → encrypt (sealnote-crypto) →
//! opaque payload for the server, plus a base key that travels only in the
//! share URL's fragment. Decryption is the exact inverse, driven by the
//! wire tags stored alongside the payload.

pub mod url;
pub mod usecase;

pub use url::{create_note_url, parse_note_url, ParsedNoteUrl};
pub use usecase::{decrypt_note, EncryptedNote, NoteCrypter};
