//! Parse command handler

use crate::config::{CliConfig, OutputFormat};
use crate::error::CliResult;
use crate::output::{render_coverage, render_skipped, Reporter};
use crate::ParseArgs;
use acs_coverage::{compute_with, parse_detailed, CoverageResult, ParseOutcome};
use serde::Serialize;
use tracing::debug;

#[derive(Serialize)]
struct ParseReport<'a> {
    #[serde(flatten)]
    coverage: &'a CoverageResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    skipped: Option<&'a ParseOutcome>,
}

/// Execute the parse command
pub fn execute_parse(config: &CliConfig, reporter: &Reporter, args: &ParseArgs) -> CliResult<()> {
    let outcome = parse_detailed(&args.ranges, args.total);
    let result = compute_with(config.policy, args.total, &outcome.units);
    debug!(
        ranges = %args.ranges,
        total = args.total,
        covered = result.covered_count,
        "parsed ranges"
    );

    let label = reporter.status_label(result.status);
    reporter.result(&render_parse(config.format, &result, &outcome, args.explain, &label)?)?;

    if outcome.looks_wrong() && args.total > 0 {
        reporter.warning("No blocks recognised. Use a format like 1-5, 8, 10-12");
    }
    Ok(())
}

/// Render the parse result in the requested format
pub fn render_parse(
    format: OutputFormat,
    result: &CoverageResult,
    outcome: &ParseOutcome,
    explain: bool,
    status_label: &str,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => {
            let report = ParseReport {
                coverage: result,
                skipped: explain.then_some(outcome),
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
        OutputFormat::Text => {
            let mut text = render_coverage(result, status_label);
            if explain {
                text.push_str(&render_skipped(outcome));
            }
            Ok(text)
        }
    }
}
