//! Payload command handler

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use crate::PayloadArgs;
use acs_coverage::{CondominiumForm, StatusPolicy};
use std::path::Path;
use tracing::info;

/// Execute the payload command
pub fn execute_payload(
    config: &CliConfig,
    reporter: &Reporter,
    args: &PayloadArgs,
) -> CliResult<()> {
    let form = load_form(&args.input)?;
    let body = build_payload(form, config.policy)?;

    match args.output {
        Some(ref path) => {
            std::fs::write(path, format!("{body}\n"))?;
            info!(path = %path.display(), "wrote payload");
            reporter.success(&format!("Payload written to {}", path.display()));
        }
        None => reporter.result(&body)?,
    }
    Ok(())
}

/// Read a form snapshot from a JSON file
pub fn load_form(path: &Path) -> CliResult<CondominiumForm> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        CliError::invalid_argument(format!("Failed to read {}: {}", path.display(), e))
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Validate the form and serialize the request body
pub fn build_payload(form: CondominiumForm, policy: StatusPolicy) -> CliResult<String> {
    let payload = form.into_payload(policy)?;
    Ok(payload.to_json()?)
}
