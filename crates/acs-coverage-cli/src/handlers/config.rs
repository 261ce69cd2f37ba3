//! Config command handler

use crate::config::{CliConfig, FileConfig};
use crate::error::CliResult;
use crate::output::Reporter;
use crate::ConfigArgs;

/// Execute the config command
pub fn execute_config(config: &CliConfig, reporter: &Reporter, args: &ConfigArgs) -> CliResult<()> {
    if args.template {
        reporter.result(&FileConfig::template()?)?;
        return Ok(());
    }
    // --show is the default action
    reporter.result(&render_config(config)?)?;
    Ok(())
}

/// Effective configuration as YAML
pub fn render_config(config: &CliConfig) -> CliResult<String> {
    Ok(serde_yaml_ng::to_string(config)?)
}
