//! Coverage percentage and status
//!
//! Derives counts, a rounded percentage and a tri-state status from a set of
//! covered units and the condominium's total.
//!
//! ```
//! use acs_coverage::{compute, parse_units, CoverageStatus};
//!
//! let result = compute(23, &parse_units("1-13,15,20-22", 23));
//! assert_eq!(result.covered_count, 17);
//! assert_eq!(result.percentage, 74);
//! assert_eq!(result.status, CoverageStatus::Complete);
//! ```

use crate::range::{parse_units, UnitSet};
use crate::result::{AcsResult, CoverageError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Percentage at or above which coverage is complete
pub const COMPLETE_THRESHOLD: u8 = 67;

/// Percentage at or above which coverage is partial
pub const PARTIAL_THRESHOLD: u8 = 34;

/// Tri-state coverage status.
///
/// Serialized with the backend's field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CoverageStatus {
    /// Enough units covered
    #[serde(rename = "completo")]
    Complete,
    /// Some units covered
    #[serde(rename = "parcial")]
    Partial,
    /// Few or no units covered
    #[default]
    #[serde(rename = "descoberto")]
    Uncovered,
}

impl CoverageStatus {
    /// Backend wire value
    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Complete => "completo",
            Self::Partial => "parcial",
            Self::Uncovered => "descoberto",
        }
    }
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Complete => "complete",
            Self::Partial => "partial",
            Self::Uncovered => "uncovered",
        };
        f.write_str(text)
    }
}

impl FromStr for CoverageStatus {
    type Err = CoverageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "complete" | "completo" => Ok(Self::Complete),
            "partial" | "parcial" => Ok(Self::Partial),
            "uncovered" | "descoberto" => Ok(Self::Uncovered),
            other => Err(CoverageError::validation(
                "status_cobertura",
                format!("unknown status '{other}'"),
            )),
        }
    }
}

/// How a status is derived from the counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusPolicy {
    /// Percentage thresholds (inclusive lower bounds)
    Tiered {
        /// Lowest percentage counted as complete
        complete_at: u8,
        /// Lowest percentage counted as partial
        partial_at: u8,
    },
    /// Nothing covered is uncovered, everything covered is complete,
    /// anything between is partial
    Exact,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self::Tiered {
            complete_at: COMPLETE_THRESHOLD,
            partial_at: PARTIAL_THRESHOLD,
        }
    }
}

impl StatusPolicy {
    /// Reject thresholds that cannot order the three states
    pub fn validate(self) -> AcsResult<Self> {
        if let Self::Tiered {
            complete_at,
            partial_at,
        } = self
        {
            if partial_at == 0 || partial_at > complete_at || complete_at > 100 {
                return Err(CoverageError::invalid_policy(format!(
                    "expected 0 < partial_at ({partial_at}) <= complete_at ({complete_at}) <= 100"
                )));
            }
        }
        Ok(self)
    }

    /// Status for the given counts
    #[must_use]
    pub const fn classify(self, percentage: u8, covered: u64, total: u64) -> CoverageStatus {
        match self {
            Self::Tiered {
                complete_at,
                partial_at,
            } => {
                if percentage >= complete_at {
                    CoverageStatus::Complete
                } else if percentage >= partial_at {
                    CoverageStatus::Partial
                } else {
                    CoverageStatus::Uncovered
                }
            }
            Self::Exact => {
                if covered == 0 {
                    CoverageStatus::Uncovered
                } else if covered >= total {
                    CoverageStatus::Complete
                } else {
                    CoverageStatus::Partial
                }
            }
        }
    }
}

/// Input of a coverage computation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageSpec {
    /// Total addressable units
    pub total_units: i64,
    /// Free-text covered units, e.g. `1-13, 15`
    pub range_text: String,
}

impl CoverageSpec {
    /// Create a spec
    #[must_use]
    pub fn new(total_units: i64, range_text: impl Into<String>) -> Self {
        Self {
            total_units,
            range_text: range_text.into(),
        }
    }

    /// Parse and compute with the default policy
    #[must_use]
    pub fn evaluate(&self) -> CoverageResult {
        self.evaluate_with(StatusPolicy::default())
    }

    /// Parse and compute with an explicit policy
    #[must_use]
    pub fn evaluate_with(&self, policy: StatusPolicy) -> CoverageResult {
        let units = parse_units(&self.range_text, self.total_units);
        compute_with(policy, self.total_units, &units)
    }
}

/// Output of a coverage computation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageResult {
    /// Units considered covered
    pub covered_units: UnitSet,
    /// Total units the percentage is measured over
    pub total_units: u64,
    /// Number of covered units, never above the total
    pub covered_count: u64,
    /// Units left without an agent
    pub uncovered_count: u64,
    /// Rounded percentage, 0..=100
    pub percentage: u8,
    /// Derived status
    pub status: CoverageStatus,
}

impl CoverageResult {
    /// Percentage of units left uncovered
    #[must_use]
    pub const fn uncovered_percentage(&self) -> u8 {
        100 - self.percentage
    }

    /// True when nothing is covered
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.covered_count == 0
    }
}

/// Round-half-up of `covered * 100 / total` in integer arithmetic
#[must_use]
pub fn percentage(covered: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let covered = u128::from(covered.min(total));
    let total = u128::from(total);
    ((covered * 200 + total) / (total * 2)) as u8
}

/// Compute coverage with the default tiered policy
#[must_use]
pub fn compute(total_units: i64, covered: &UnitSet) -> CoverageResult {
    compute_with(StatusPolicy::default(), total_units, covered)
}

/// Compute coverage with an explicit policy.
///
/// Units outside `[1, total]` are dropped from the stored set, so
/// `covered_count == covered_units.len() <= total` for hand-built sets too.
#[must_use]
pub fn compute_with(policy: StatusPolicy, total_units: i64, covered: &UnitSet) -> CoverageResult {
    let total = u64::try_from(total_units).unwrap_or(0);
    let bound = u32::try_from(total).unwrap_or(u32::MAX);
    let covered_units = covered.intersect_range(1..=bound);
    let covered_count = covered_units.len();
    let uncovered_count = total - covered_count;
    let percentage = percentage(covered_count, total);

    CoverageResult {
        covered_units,
        total_units: total,
        covered_count,
        uncovered_count,
        percentage,
        status: policy.classify(percentage, covered_count, total),
    }
}
