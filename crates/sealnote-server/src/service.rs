//! The lifecycle service: create, read, exists, sweep.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info, warn};

use sealnote_core::{NoteId, SealnoteError, SealnoteResult, ServerConfig, StoredNote};

use crate::clock::Clock;
use crate::store::NoteStore;

/// Everything a client submits when creating a note. The payload is opaque
/// ciphertext; the server never learns more about it than its size.
#[derive(Debug, Clone)]
pub struct CreateNote {
    pub payload: String,
    pub encryption_algorithm: String,
    pub serialization_format: String,
    /// Seconds until expiration. `None` requests unlimited lifetime, which
    /// only deployments with `allow_unlimited_lifetime` accept.
    pub ttl_seconds: Option<u64>,
    pub delete_after_reading: bool,
    pub is_public: bool,
}

/// Outcome counters for one sweep pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub examined: usize,
    pub deleted: usize,
    pub failed: usize,
}

/// Storage-backed note lifecycle engine.
///
/// Configuration is threaded in explicitly; the service never consults
/// ambient state. All operations are safe to call concurrently — the one
/// known race (burn-after-read vs. a concurrent read) is tolerated rather
/// than locked away, because not every backend can lock.
pub struct NoteService {
    store: Arc<dyn NoteStore>,
    clock: Arc<dyn Clock>,
    config: ServerConfig,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>, clock: Arc<dyn Clock>, config: ServerConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Store a new note and hand back its id.
    pub fn create(&self, request: CreateNote) -> SealnoteResult<NoteId> {
        if request.payload.len() > self.config.max_payload_bytes {
            return Err(SealnoteError::PayloadTooLarge {
                size: request.payload.len(),
                limit: self.config.max_payload_bytes,
            });
        }
        if request.ttl_seconds.is_none() && !self.config.allow_unlimited_lifetime {
            return Err(SealnoteError::ExpirationDelayRequired);
        }
        if !request.is_public && !self.config.requires_authentication {
            return Err(SealnoteError::CannotCreatePrivateNoteOnPublicInstance);
        }

        let expiration_date = request
            .ttl_seconds
            .map(|secs| self.expiration_from(secs))
            .transpose()?;

        let id = NoteId::generate();
        let note = StoredNote {
            payload: request.payload,
            encryption_algorithm: request.encryption_algorithm,
            serialization_format: request.serialization_format,
            expiration_date,
            delete_after_reading: request.delete_after_reading,
            is_public: request.is_public,
        };

        let ttl_hint = request.ttl_seconds.map(Duration::from_secs);
        self.store.set(&id, &note, ttl_hint)?;

        info!(
            %id,
            burn = note.delete_after_reading,
            expires = expiration_date.map(|d| d.to_rfc3339()).as_deref().unwrap_or("never"),
            "note created"
        );
        Ok(id)
    }

    /// Turn a TTL into an absolute expiration instant. A delay the datetime
    /// type cannot represent is rejected, never wrapped into the past.
    fn expiration_from(&self, ttl_seconds: u64) -> SealnoteResult<DateTime<Utc>> {
        i64::try_from(ttl_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| self.clock.now().checked_add_signed(delta))
            .ok_or(SealnoteError::ExpirationDelayOutOfRange(ttl_seconds))
    }

    /// Fetch a note through the primary read path.
    ///
    /// Absent and expired notes are indistinguishable (`NoteNotFound`).
    /// Expired records found here are deleted opportunistically. A
    /// burn-after-read note is deleted immediately after the successful
    /// read — best-effort: a concurrent reader racing the deletion may
    /// briefly see the content too.
    pub fn read(&self, id: &NoteId) -> SealnoteResult<StoredNote> {
        let note = self.store.get(id)?.ok_or(SealnoteError::NoteNotFound)?;

        if note.is_expired_at(self.clock.now()) {
            if let Err(e) = self.store.remove(id) {
                warn!(%id, error = %e, "failed to delete expired note on read");
            }
            return Err(SealnoteError::NoteNotFound);
        }

        if note.delete_after_reading {
            if let Err(e) = self.store.remove(id) {
                warn!(%id, error = %e, "failed to burn note after reading");
            } else {
                debug!(%id, "note burned after reading");
            }
        }

        Ok(note)
    }

    /// Idempotent existence check: same expiry logic as [`read`], but never
    /// deletes anything — burn-after-read notes are not consumed.
    ///
    /// [`read`]: NoteService::read
    pub fn exists(&self, id: &NoteId) -> SealnoteResult<bool> {
        match self.store.get(id)? {
            Some(note) => Ok(!note.is_expired_at(self.clock.now())),
            None => Ok(false),
        }
    }

    /// Delete every expired note. Per-note failures are logged with the
    /// offending id and swallowed; one bad record never aborts the pass.
    pub fn sweep(&self) -> SweepReport {
        let mut report = SweepReport::default();

        let ids = match self.store.list_ids() {
            Ok(ids) => ids,
            Err(e) => {
                warn!(error = %e, "sweep could not list notes");
                report.failed += 1;
                return report;
            }
        };

        let now = self.clock.now();
        for id in ids {
            report.examined += 1;
            let note = match self.store.get(&id) {
                Ok(Some(note)) => note,
                Ok(None) => {
                    // Deleted between list and fetch; nothing to reclaim
                    debug!(%id, "note gone before the sweep reached it");
                    continue;
                }
                Err(e) => {
                    warn!(%id, error = %e, "sweep failed to fetch note");
                    report.failed += 1;
                    continue;
                }
            };

            if !note.is_expired_at(now) {
                continue;
            }
            match self.store.remove(&id) {
                Ok(()) => {
                    debug!(%id, "swept expired note");
                    report.deleted += 1;
                }
                Err(e) => {
                    warn!(%id, error = %e, "sweep failed to delete note");
                    report.failed += 1;
                }
            }
        }

        info!(
            examined = report.examined,
            deleted = report.deleted,
            failed = report.failed,
            "sweep complete"
        );
        report
    }
}
