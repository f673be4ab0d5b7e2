//! sealnote-server: the note lifecycle engine
//!
//! The server never sees plaintext. What it manages is the lifecycle of
//! opaque encrypted records: creation with an expiration date, read-time
//! expiration enforcement, burn-after-read deletion, and a periodic sweep
//! that reclaims storage on backends without native TTL eviction.
//!
//! Per-note state machine:
//! ```text
//! Create ──► Active ──(read past expiration, or sweep)──► Deleted
//!               │
//!               └──(first read with delete_after_reading)──► Deleted
//! ```
//!
//! Read-time checking is the authoritative expiration enforcement; the
//! sweep is reclamation only.

pub mod clock;
pub mod service;
pub mod store;
pub mod sweeper;

pub use clock::{Clock, SystemClock};
pub use service::{CreateNote, NoteService, SweepReport};
pub use store::{FileNoteStore, MemoryNoteStore, NoteStore};
pub use sweeper::Sweeper;
