//! Plan document model and the lossy round-trip text transform.
//!
//! An exercise prescription arrives as a markdown-like document: one `###`
//! section per exercise category, each carrying a fixed set of Korean FITT
//! labels (`종목`, `빈도(F)`, `강도(I)`, `시간(T)`, `유형(T)`, `진행규칙·주의`,
//! `CSV`).  This crate turns that text into a fixed-size list of editable
//! [`Block`] records and back:
//!
//! - [`parse`] — text → exactly three blocks (padded or truncated),
//! - [`serialize`] — blocks → text, in fixed category priority order,
//! - [`evidence`] — advisory note groups merged by title.
//!
//! The transform is deliberately lossy for free text containing label-like
//! substrings; for documents that conform to the label grammar, parsing the
//! serialization of a parsed document is field-for-field stable.

mod block;
pub mod evidence;
mod parse;
mod serialize;

pub use block::{BLOCK_COUNT, Block, SEED_TEMPLATE, seed_blocks};
pub use evidence::EvidenceBlock;
pub use parse::{parse, parse_opt};
pub use serialize::serialize;
