//! Review orchestration: load → edit → apply → persist → approve/reject.
//!
//! [`ReviewController`] owns the live working state for one trace id and is
//! the only writer of it; the autosave store is a passive mirror and the
//! [`SessionContext`] is how sibling consumers observe applied plan text.

mod controller;
mod page;
mod session;
pub mod summary;

pub use controller::ReviewController;
pub use page::{CALENDAR_FALLBACK, CalendarView, MarkdownPreview, ReviewPage};
pub use session::{Session, SessionContext};
pub use summary::{Measurements, UserProfile};
