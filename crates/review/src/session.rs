//! Shared session state and its publish-on-change handle.
//!
//! The session object is what the review page and sibling consumers (result
//! page, calendar) all look at.  Instead of implicit shared mutation, the
//! controller publishes changes through a watch channel; consumers either
//! take a snapshot or subscribe for updates.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use rxdesk_plan::EvidenceBlock;

use crate::summary::{Measurements, UserProfile};

/// Everything an incoming review session may carry.  All parts are optional
/// except the plan text slot; a missing trace id means the shared draft slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub trace_id: String,
    pub plan_md: String,
    pub user: Option<UserProfile>,
    pub measurements: Option<Measurements>,
    pub evidence: Option<Vec<EvidenceBlock>>,
}

/// Cloneable handle to the shared session.  Every clone points at the same
/// underlying state; [`set_result`](SessionContext::set_result) is observed
/// by all subscribers.
#[derive(Debug, Clone)]
pub struct SessionContext {
    tx: Arc<watch::Sender<Session>>,
}

impl SessionContext {
    pub fn new(session: Session) -> Self {
        let (tx, _rx) = watch::channel(session);
        Self { tx: Arc::new(tx) }
    }

    /// Current session state, by value.
    pub fn snapshot(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Subscribe to session updates.  The receiver sees the state at
    /// subscription time plus every later publish.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    /// Publish an applied plan back into the session, as the result provider
    /// would.  Sibling consumers of the same session observe the new text.
    pub fn set_result(&self, trace_id: &str, plan_md: &str) {
        self.tx.send_modify(|session| {
            session.trace_id = trace_id.to_string();
            session.plan_md = plan_md.to_string();
        });
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(Session::default())
    }
}
