//! Community health agent (ACS) assignments
//!
//! A condominium can be split between several agents, each covering its own
//! block ranges. Coverage is measured over the union of their ranges.

use crate::calculator::{compute_with, CoverageResult, StatusPolicy};
use crate::range::{parse_units, UnitSet};
use crate::result::{AcsResult, CoverageError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One agent covering a set of block ranges
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcsAssignment {
    /// Agent name
    pub nome: String,
    /// Range text of the covered blocks
    #[serde(default)]
    pub blocos: String,
    /// Start date (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_inicio: Option<String>,
}

impl AcsAssignment {
    /// Create an assignment
    #[must_use]
    pub fn new(nome: impl Into<String>, blocos: impl Into<String>) -> Self {
        Self {
            nome: nome.into(),
            blocos: blocos.into(),
            data_inicio: None,
        }
    }

    /// Set the start date
    #[must_use]
    pub fn with_start_date(mut self, date: impl Into<String>) -> Self {
        self.data_inicio = Some(date.into());
        self
    }

    /// Units this agent covers
    #[must_use]
    pub fn units(&self, total_units: i64) -> UnitSet {
        parse_units(&self.blocos, total_units)
    }
}

/// Union of every agent's units
#[must_use]
pub fn combined_units(total_units: i64, assignments: &[AcsAssignment]) -> UnitSet {
    assignments
        .iter()
        .fold(UnitSet::new(), |acc, a| acc.union(&a.units(total_units)))
}

/// Coverage of the union of every agent's units
#[must_use]
pub fn combined_coverage(
    total_units: i64,
    assignments: &[AcsAssignment],
    policy: StatusPolicy,
) -> CoverageResult {
    compute_with(policy, total_units, &combined_units(total_units, assignments))
}

/// Ordered list of agents for one condominium.
///
/// The first entry is the primary agent, mirrored into the legacy
/// `acs_responsavel` / `blocos_ativos` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentRoster {
    assignments: Vec<AcsAssignment>,
}

impl AssignmentRoster {
    /// Create an empty roster
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an agent
    pub fn add(&mut self, assignment: AcsAssignment) {
        debug!(nome = %assignment.nome, blocos = %assignment.blocos, "adding ACS assignment");
        self.assignments.push(assignment);
    }

    /// Remove every assignment for the named agent, returning the first one
    pub fn remove(&mut self, nome: &str) -> AcsResult<AcsAssignment> {
        let position = self
            .assignments
            .iter()
            .position(|a| a.nome == nome)
            .ok_or_else(|| CoverageError::not_found("ACS", nome))?;
        let removed = self.assignments.remove(position);
        self.assignments.retain(|a| a.nome != nome);
        debug!(nome, remaining = self.assignments.len(), "removed ACS assignment");
        Ok(removed)
    }

    /// Primary agent
    #[must_use]
    pub fn primary(&self) -> Option<&AcsAssignment> {
        self.assignments.first()
    }

    /// Number of assignments
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Check if the roster is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// All assignments in insertion order
    #[must_use]
    pub fn assignments(&self) -> &[AcsAssignment] {
        &self.assignments
    }

    /// Take the assignments out of the roster
    #[must_use]
    pub fn into_assignments(self) -> Vec<AcsAssignment> {
        self.assignments
    }

    /// Coverage of the whole roster
    #[must_use]
    pub fn coverage(&self, total_units: i64, policy: StatusPolicy) -> CoverageResult {
        combined_coverage(total_units, &self.assignments, policy)
    }
}

impl FromIterator<AcsAssignment> for AssignmentRoster {
    fn from_iter<I: IntoIterator<Item = AcsAssignment>>(iter: I) -> Self {
        Self {
            assignments: iter.into_iter().collect(),
        }
    }
}
