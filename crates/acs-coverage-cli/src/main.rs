//! acscov: block-range coverage from the command line
//!
//! ## Usage
//!
//! ```bash
//! acscov parse "1-13, 15, 20-22" --total 23     # Coverage of one range text
//! acscov payload -i form.json                   # Request body for the backend
//! acscov roster -t 20 -a Maria=1-10 -a Ana=8-15  # Combined agents
//! acscov metrics -i data.json --equipe "Equipe 1"
//! ```

use acscov::{
    handlers, init_tracing, Cli, CliConfig, CliResult, ColorChoice, Commands, FileConfig,
    Reporter, Verbosity,
};
use clap::Parser;
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    init_tracing(config.verbosity);
    debug!(?config, "resolved configuration");

    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());

    match cli.command {
        Commands::Parse(ref args) => handlers::execute_parse(&config, &reporter, args),
        Commands::Payload(ref args) => handlers::execute_payload(&config, &reporter, args),
        Commands::Roster(ref args) => handlers::execute_roster(&config, &reporter, args),
        Commands::Metrics(ref args) => handlers::execute_metrics(&config, &reporter, args),
        Commands::Config(ref args) => handlers::execute_config(&config, &reporter, args),
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let color: ColorChoice = cli.color.clone().into();
    let mut config = CliConfig::new().with_verbosity(verbosity).with_color(color);

    if let Some(ref path) = cli.config {
        config = config.merge_file(&FileConfig::load(path)?);
    }
    if let Some(format) = cli.format {
        config = config.with_format(format.into());
    }

    let policy = cli.policy.resolve(config.policy)?.validate()?;
    Ok(config.with_policy(policy))
}
