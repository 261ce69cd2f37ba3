//! Covered-unit range parsing
//!
//! Turns the free text of a "covered blocks" field into a bounded,
//! deduplicated [`UnitSet`].
//!
//! ```text
//! "1-13, 15; 20-22" ──► tokens ──► clamp to [1, total] ──► UnitSet {1..=13, 15, 20..=22}
//! ```
//!
//! Parsing is forgiving: bad tokens are skipped, never reported as errors.
//! [`parse_detailed`] exposes what was skipped for callers that want to hint
//! at a typo.

mod parser;
mod unit;

pub use parser::{parse_detailed, parse_units, ParseOutcome, SkipReason, SkippedToken};
pub use unit::{UnitId, UnitSet};
