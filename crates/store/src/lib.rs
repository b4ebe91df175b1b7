//! Autosave/recovery for review working state.
//!
//! One JSON file per trace id under a state directory, last-write-wins, no
//! expiry.  Reads are synchronous; a corrupt record is logged and treated as
//! absent so recovery behaves exactly as if nothing had been saved.  Writes
//! go through a temp file and an atomic rename so a crash never leaves a
//! torn record.  [`DebouncedSaver`] adds the coalescing write policy on top.

mod debounce;
mod record;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::warn;

pub use debounce::{DEFAULT_DEBOUNCE, DebouncedSaver};
pub use record::{ReviewRecord, ReviewStatus};

/// Trace id used when the caller supplies none.
pub const DRAFT_TRACE_ID: &str = "draft";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read review record: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt review record: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Keyed mirror of review working state.  Passive: it only receives writes
/// and seeds initial state — it never mutates anything on its own.
#[derive(Debug, Clone)]
pub struct ReviewStore {
    dir: PathBuf,
}

impl ReviewStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Logical storage key for a trace id, `review:<id>`, falling back to
    /// the shared draft slot for an empty id.
    pub fn storage_key(trace_id: &str) -> String {
        let id = if trace_id.trim().is_empty() {
            DRAFT_TRACE_ID
        } else {
            trace_id
        };
        format!("review:{id}")
    }

    fn file_path(&self, trace_id: &str) -> PathBuf {
        let key = Self::storage_key(trace_id);
        // Keep the key readable but filesystem-safe.
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }

    /// Recover the record for a trace id, or `None` when nothing usable is
    /// stored.  Corruption is logged, never surfaced.
    pub fn read(&self, trace_id: &str) -> Option<ReviewRecord> {
        match self.try_read(trace_id) {
            Ok(record) => record,
            Err(err) => {
                warn!(
                    key = %Self::storage_key(trace_id),
                    error = %err,
                    "ignoring unreadable review record"
                );
                None
            }
        }
    }

    /// Like [`read`](Self::read) but surfacing why a stored record was
    /// unusable.  A missing file is `Ok(None)`, not an error.
    pub fn try_read(&self, trace_id: &str) -> Result<Option<ReviewRecord>, StoreError> {
        let path = self.file_path(trace_id);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Persist a record.  Atomic: written to a `.tmp` sibling, then renamed
    /// over the target.
    pub fn write(&self, trace_id: &str, record: &ReviewRecord) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create state dir {}", self.dir.display()))?;

        let path = self.file_path(trace_id);
        let tmp_path = path.with_extension("json.tmp");
        let rendered = serde_json::to_string(record).context("serialize ReviewRecord")?;

        if let Err(err) = write_and_rename(&tmp_path, &path, &rendered) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err);
        }
        Ok(())
    }
}

fn write_and_rename(tmp_path: &Path, path: &Path, rendered: &str) -> Result<()> {
    fs::write(tmp_path, rendered)
        .with_context(|| format!("write review record {}", tmp_path.display()))?;
    fs::rename(tmp_path, path)
        .with_context(|| format!("replace review record {}", path.display()))?;
    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────────────────
