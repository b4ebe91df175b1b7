//! The review controller: exclusive owner of one trace id's working state.

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use rxdesk_config::AppConfig;
use rxdesk_plan::{Block, SEED_TEMPLATE, parse, serialize};
use rxdesk_store::{DRAFT_TRACE_ID, DebouncedSaver, ReviewRecord, ReviewStatus, ReviewStore};

use crate::session::SessionContext;

/// Confirmation surfaced after an approve transition.
pub const MSG_APPROVED: &str = "승인 완료 (임시 저장됨)";
/// Confirmation surfaced after a reject transition.
pub const MSG_REJECTED: &str = "반려 요청이 저장되었습니다";
/// Confirmation surfaced after applying card edits.
pub const MSG_APPLIED: &str = "변경 사항이 결과 페이지에 반영되었습니다.";

/// Orchestrates load → edit → apply → persist → approve/reject for one
/// review session.  All mutation goes through this type; every mutating call
/// schedules a debounced persist of the full working state.
pub struct ReviewController {
    trace_id: String,
    edited_md: String,
    weeks: u32,
    start_iso: Option<String>,
    status: ReviewStatus,
    session: SessionContext,
    saver: DebouncedSaver,
    last_message: Option<String>,
}

impl ReviewController {
    /// Build a controller for the session's trace id, recovering autosaved
    /// state when present.  A missing or corrupt record falls back to the
    /// session's plan text, then to the built-in template.
    pub fn load(session: SessionContext, store: ReviewStore, config: &AppConfig) -> Self {
        let snapshot = session.snapshot();
        let trace_id = if snapshot.trace_id.trim().is_empty() {
            DRAFT_TRACE_ID.to_string()
        } else {
            snapshot.trace_id.clone()
        };

        let recovered = store.read(&trace_id);
        let (edited_md, weeks, start_iso, status) = match recovered {
            Some(record) => {
                info!(trace_id = %trace_id, "recovered autosaved review state");
                (record.md, record.weeks, record.start_iso, record.status)
            }
            None => {
                let md = if snapshot.plan_md.trim().is_empty() {
                    SEED_TEMPLATE.to_string()
                } else {
                    snapshot.plan_md.clone()
                };
                (md, config.calendar.default_weeks, None, ReviewStatus::Draft)
            }
        };

        let saver = DebouncedSaver::new(store, trace_id.clone(), config.debounce());
        Self {
            trace_id,
            edited_md,
            weeks,
            start_iso,
            status,
            session,
            saver,
            last_message: None,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn edited_md(&self) -> &str {
        &self.edited_md
    }

    pub fn status(&self) -> ReviewStatus {
        self.status
    }

    pub fn weeks(&self) -> u32 {
        self.weeks
    }

    pub fn start_iso(&self) -> Option<&str> {
        self.start_iso.as_deref()
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// The current document as editable working rows.
    pub fn blocks(&self) -> Vec<Block> {
        parse(&self.edited_md)
    }

    /// Snapshot of the state that would be persisted right now.
    pub fn record(&self) -> ReviewRecord {
        ReviewRecord {
            md: self.edited_md.clone(),
            weeks: self.weeks,
            start_iso: self.start_iso.clone(),
            status: self.status,
            ts: Utc::now().timestamp_millis(),
        }
    }

    // ── Edit flow ────────────────────────────────────────────────────────

    /// Apply edited working rows: serialize them back into the document,
    /// publish the new text into the shared session, and persist.
    pub fn apply(&mut self, rows: &[Block]) -> &str {
        self.edited_md = serialize(rows);
        self.session.set_result(&self.trace_id, &self.edited_md);
        self.persist();
        self.last_message = Some(MSG_APPLIED.to_string());
        self.last_message.as_deref().unwrap_or_default()
    }

    /// Replace the working document wholesale (e.g. pasted text).  The new
    /// text is not published until the next [`apply`](Self::apply).
    pub fn set_document(&mut self, md: &str) {
        self.edited_md = md.to_string();
        self.persist();
    }

    // ── Calendar controls ────────────────────────────────────────────────

    pub fn set_weeks(&mut self, weeks: u32) {
        self.weeks = weeks;
        self.persist();
    }

    pub fn set_start_iso(&mut self, start_iso: Option<String>) {
        self.start_iso = start_iso;
        self.persist();
    }

    // ── Status transitions ───────────────────────────────────────────────

    /// Approve the plan.  Not terminal; may be repeated or reversed.
    pub fn approve(&mut self) -> &str {
        self.transition(ReviewStatus::Approved, MSG_APPROVED)
    }

    /// Send the plan back for changes.  Not terminal either.
    pub fn reject(&mut self) -> &str {
        self.transition(ReviewStatus::NeedsChanges, MSG_REJECTED)
    }

    fn transition(&mut self, status: ReviewStatus, message: &str) -> &str {
        self.status = status;
        info!(trace_id = %self.trace_id, status = status.as_str(), "review status changed");
        self.persist();
        self.last_message = Some(message.to_string());
        self.last_message.as_deref().unwrap_or_default()
    }

    // ── Persistence ──────────────────────────────────────────────────────

    fn persist(&mut self) {
        let record = self.record();
        self.saver.schedule(record);
    }

    /// Write any pending state immediately.  Intended for teardown; the
    /// debounced path is the normal one.
    pub fn flush(&mut self) -> Result<()> {
        self.saver.flush()
    }
}
