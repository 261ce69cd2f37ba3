//! Team dashboard metrics and listing filters

use crate::calculator::CoverageStatus;
use crate::condominium::{Condominium, Priority};
use serde::{Deserialize, Serialize};

/// Aggregated health metrics for one team's condominiums
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamMetrics {
    /// Residents
    pub total_moradores: i64,
    /// Residents with hypertension
    pub total_hipertensos: i64,
    /// Residents with diabetes
    pub total_diabeticos: i64,
    /// Pregnant residents
    pub total_gestantes: i64,
    /// Mean coverage percentage, one decimal place
    pub cobertura_geral: f64,
}

impl TeamMetrics {
    /// Sum counts and average coverage over the records
    #[must_use]
    pub fn from_records(records: &[Condominium]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let mean = records.iter().map(|c| f64::from(c.cobertura)).sum::<f64>()
            / records.len() as f64;

        Self {
            total_moradores: records.iter().map(|c| c.moradores).sum(),
            total_hipertensos: records.iter().map(|c| c.hipertensos).sum(),
            total_diabeticos: records.iter().map(|c| c.diabeticos).sum(),
            total_gestantes: records.iter().map(|c| c.gestantes).sum(),
            cobertura_geral: (mean * 10.0).round() / 10.0,
        }
    }
}

/// Records owned by one team
#[must_use]
pub fn filter_by_team<'a>(records: &'a [Condominium], equipe: &str) -> Vec<&'a Condominium> {
    records.iter().filter(|c| c.equipe == equipe).collect()
}

/// Listing filter; `None` means "todos"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingFilter {
    /// Required coverage status
    pub status: Option<CoverageStatus>,
    /// Required priority
    pub prioridade: Option<Priority>,
    /// Required primary agent
    pub acs: Option<String>,
    /// Minimum coverage percentage
    pub min_cobertura: u8,
}

impl ListingFilter {
    /// Create a filter that matches everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a status
    #[must_use]
    pub const fn with_status(mut self, status: CoverageStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Require a priority
    #[must_use]
    pub const fn with_priority(mut self, prioridade: Priority) -> Self {
        self.prioridade = Some(prioridade);
        self
    }

    /// Require a primary agent
    #[must_use]
    pub fn with_acs(mut self, acs: impl Into<String>) -> Self {
        self.acs = Some(acs.into());
        self
    }

    /// Require a minimum coverage
    #[must_use]
    pub const fn with_min_coverage(mut self, min: u8) -> Self {
        self.min_cobertura = min;
        self
    }

    /// Check one record
    #[must_use]
    pub fn matches(&self, record: &Condominium) -> bool {
        if self.status.is_some_and(|s| s != record.status_cobertura) {
            return false;
        }
        if self.prioridade.is_some_and(|p| p != record.prioridade) {
            return false;
        }
        if let Some(ref acs) = self.acs {
            if record.acs_responsavel.as_deref() != Some(acs.as_str()) {
                return false;
            }
        }
        record.cobertura >= self.min_cobertura
    }

    /// Keep the matching records
    #[must_use]
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a Condominium>
    where
        I: IntoIterator<Item = &'a Condominium>,
    {
        records.into_iter().filter(|c| self.matches(c)).collect()
    }
}

/// Stable sort by coverage percentage
pub fn sort_by_coverage(records: &mut [&Condominium], descending: bool) {
    if descending {
        records.sort_by(|a, b| b.cobertura.cmp(&a.cobertura));
    } else {
        records.sort_by_key(|c| c.cobertura);
    }
}
