//! Metrics command handler

use crate::config::{CliConfig, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::output::{render_listing, render_metrics, Reporter};
use crate::{MetricsArgs, SortArg};
use acs_coverage::{sort_by_coverage, Condominium, ListingFilter, StatusPolicy, TeamMetrics};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Data file as exported by the backend: `{"condominios": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    /// Stored records
    pub condominios: Vec<Condominium>,
}

#[derive(Serialize)]
struct MetricsReport<'a> {
    metrics: TeamMetrics,
    condominios: Vec<&'a Condominium>,
}

/// Execute the metrics command
pub fn execute_metrics(
    config: &CliConfig,
    reporter: &Reporter,
    args: &MetricsArgs,
) -> CliResult<()> {
    let dataset = load_dataset(&args.input)?;
    let records = select_records(dataset, args.equipe.as_deref(), args.recompute, config.policy);
    let metrics = TeamMetrics::from_records(&records);

    let mut filter = ListingFilter::new().with_min_coverage(args.min_coverage);
    if let Some(status) = args.status {
        filter = filter.with_status(status.into());
    }
    if let Some(priority) = args.priority {
        filter = filter.with_priority(priority.into());
    }
    if let Some(ref acs) = args.acs {
        filter = filter.with_acs(acs.clone());
    }

    let mut listing = filter.apply(&records);
    if let Some(sort) = args.sort {
        sort_by_coverage(&mut listing, sort == SortArg::Desc);
    }
    debug!(
        records = records.len(),
        listed = listing.len(),
        "applied listing filter"
    );

    match config.format {
        OutputFormat::Json => {
            let report = MetricsReport {
                metrics,
                condominios: listing,
            };
            reporter.result(&serde_json::to_string_pretty(&report)?)?;
        }
        OutputFormat::Text => {
            let mut text = render_metrics(&metrics, records.len());
            text.push_str(&format!("Listing ({} shown):\n", listing.len()));
            text.push_str(&render_listing(&listing));
            reporter.result(&text)?;
        }
    }
    Ok(())
}

/// Read a dataset from a JSON file
pub fn load_dataset(path: &Path) -> CliResult<Dataset> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        CliError::invalid_argument(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let dataset: Dataset = serde_json::from_str(&text)?;
    info!(
        path = %path.display(),
        records = dataset.condominios.len(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Restrict to one team and optionally recompute the stored coverage
#[must_use]
pub fn select_records(
    dataset: Dataset,
    equipe: Option<&str>,
    recompute: bool,
    policy: StatusPolicy,
) -> Vec<Condominium> {
    let mut records = dataset.condominios;
    if let Some(equipe) = equipe {
        records.retain(|c| c.equipe == equipe);
    }
    if recompute {
        for record in &mut records {
            record.refresh_coverage(policy);
        }
    }
    records
}
