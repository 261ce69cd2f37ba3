//! Roster command handler

use crate::config::{CliConfig, OutputFormat};
use crate::error::CliResult;
use crate::output::{blocks, render_coverage, Reporter};
use crate::RosterArgs;
use acs_coverage::{Condominium, CoverageResult, StatusPolicy};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Serialize)]
struct AgentShare<'a> {
    nome: &'a str,
    blocos: &'a str,
    blocos_cobertos: u64,
}

#[derive(Serialize)]
struct RosterReport<'a> {
    acs_responsavel: Option<&'a str>,
    acs: Vec<AgentShare<'a>>,
    combined: &'a CoverageResult,
}

/// Execute the roster command
pub fn execute_roster(config: &CliConfig, reporter: &Reporter, args: &RosterArgs) -> CliResult<()> {
    let (record, combined) = build_record(args, config.policy)?;
    let label = reporter.status_label(combined.status);
    reporter.result(&render_roster(config.format, &record, &combined, &label)?)?;
    Ok(())
}

/// Add every `--assign` agent to a fresh record, then apply the `--remove`s
pub fn build_record(
    args: &RosterArgs,
    policy: StatusPolicy,
) -> CliResult<(Condominium, CoverageResult)> {
    let mut record = Condominium {
        torres: args.total,
        ..Condominium::default()
    };
    let mut combined = CoverageResult::default();
    for assignment in &args.assignments {
        combined = record.add_acs(assignment.clone(), policy);
    }
    for nome in &args.remove {
        combined = record.remove_acs(nome, policy)?;
    }
    Ok((record, combined))
}

/// Per-agent counts followed by the combined coverage
pub fn render_roster(
    format: OutputFormat,
    record: &Condominium,
    combined: &CoverageResult,
    status_label: &str,
) -> CliResult<String> {
    let shares: Vec<AgentShare<'_>> = record
        .acs_multiplos
        .iter()
        .map(|a| AgentShare {
            nome: &a.nome,
            blocos: &a.blocos,
            blocos_cobertos: a.units(record.torres).len(),
        })
        .collect();

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&RosterReport {
            acs_responsavel: record.acs_responsavel.as_deref(),
            acs: shares,
            combined,
        })?),
        OutputFormat::Text => {
            let mut out = String::new();
            let _ = writeln!(out, "Agents ({}):", shares.len());
            for share in &shares {
                let _ = writeln!(
                    out,
                    "  {:<24} {:<20} {}",
                    share.nome,
                    share.blocos,
                    blocks(share.blocos_cobertos)
                );
            }
            out.push_str(&render_coverage(combined, status_label));
            Ok(out)
        }
    }
}
