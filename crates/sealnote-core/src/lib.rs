//! sealnote-core: shared types, error taxonomy, and configuration
//!
//! Everything the client and server halves of sealnote agree on lives here:
//! the logical note model, the stored-record shape, the closed error
//! taxonomy, and the deployment configuration.

pub mod config;
pub mod error;
pub mod types;

pub use config::{SealnoteConfig, ServerConfig};
pub use error::{SealnoteError, SealnoteResult};
pub use types::{AssetMetadata, Note, NoteAsset, NoteId, StoredNote};
