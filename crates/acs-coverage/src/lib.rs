//! acs-coverage: block-range coverage for community health territories
//!
//! A condominium has `N` blocks; community health agents (ACS) cover some
//! of them, written down as free text such as `"1-13, 15, 20-22"`. This
//! crate turns that text into a set of covered units and derives the
//! coverage percentage and status shown on the territory dashboard.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  range text ──► range::parse_units ──► UnitSet                   │
//! │                                          │                       │
//! │  total units ───────────────────► calculator::compute            │
//! │                                          │                       │
//! │                      CoverageResult {count, percentage, status}  │
//! │                                          │                       │
//! │        condominium payload ◄─────────────┴──► form preview       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Parsing and computation are pure and total: malformed input contributes
//! nothing instead of raising an error.

#![warn(missing_docs)]

pub mod assignment;
pub mod calculator;
pub mod condominium;
pub mod form;
pub mod metrics;
pub mod range;
mod result;

pub use assignment::{combined_coverage, combined_units, AcsAssignment, AssignmentRoster};
pub use calculator::{
    compute, compute_with, percentage, CoverageResult, CoverageSpec, CoverageStatus,
    StatusPolicy, COMPLETE_THRESHOLD, PARTIAL_THRESHOLD,
};
pub use condominium::{
    ApiResponse, ApiStatus, Condominium, CondominiumForm, CondominiumPayload, Priority,
};
pub use form::{FormWizard, StepMove, STEP_COUNT};
pub use metrics::{filter_by_team, sort_by_coverage, ListingFilter, TeamMetrics};
pub use range::{parse_detailed, parse_units, ParseOutcome, SkipReason, SkippedToken, UnitId, UnitSet};
pub use result::{AcsResult, CoverageError};

/// Commonly used items
pub mod prelude {
    pub use crate::{
        compute, compute_with, parse_detailed, parse_units, AcsResult, CoverageError,
        CoverageResult, CoverageSpec, CoverageStatus, StatusPolicy, UnitId, UnitSet,
    };
}
