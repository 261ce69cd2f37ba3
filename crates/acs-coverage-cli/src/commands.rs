//! CLI command definitions using clap

use crate::config::{ColorChoice, OutputFormat};
use crate::error::{CliError, CliResult};
use acs_coverage::{AcsAssignment, CoverageStatus, Priority, StatusPolicy};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// acscov: block-range coverage for ACS territory management
#[derive(Parser, Debug)]
#[command(name = "acscov")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// YAML configuration file
    #[arg(long, global = true, env = "ACSCOV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(long, global = true)]
    pub format: Option<FormatArg>,

    /// Status policy (overrides the config file)
    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse covered-block ranges and show the coverage
    Parse(ParseArgs),

    /// Build the JSON body for the backend from a form snapshot
    Payload(PayloadArgs),

    /// Combined coverage of several agents on one condominium
    Roster(RosterArgs),

    /// Team metrics and filtered listing from a data file
    Metrics(MetricsArgs),

    /// Show configuration
    Config(ConfigArgs),
}

/// Status policy flags
#[derive(Args, Debug, Default, Clone)]
pub struct PolicyArgs {
    /// How status is derived (tiered thresholds or exact counts)
    #[arg(long, global = true)]
    pub policy: Option<PolicyArg>,

    /// Lowest percentage counted as complete (tiered policy)
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub complete_at: Option<u8>,

    /// Lowest percentage counted as partial (tiered policy)
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub partial_at: Option<u8>,
}

impl PolicyArgs {
    /// Apply the flags on top of a base policy.
    ///
    /// Threshold flags only make sense for the tiered policy; passing them
    /// while the effective policy is exact is an error.
    pub fn resolve(&self, base: StatusPolicy) -> CliResult<StatusPolicy> {
        let base = match self.policy {
            Some(PolicyArg::Exact) => StatusPolicy::Exact,
            Some(PolicyArg::Tiered) if base == StatusPolicy::Exact => StatusPolicy::default(),
            _ => base,
        };
        match base {
            StatusPolicy::Tiered {
                complete_at,
                partial_at,
            } => Ok(StatusPolicy::Tiered {
                complete_at: self.complete_at.unwrap_or(complete_at),
                partial_at: self.partial_at.unwrap_or(partial_at),
            }),
            StatusPolicy::Exact if self.complete_at.is_some() || self.partial_at.is_some() => {
                Err(CliError::invalid_argument(
                    "--complete-at/--partial-at require the tiered policy",
                ))
            }
            StatusPolicy::Exact => Ok(StatusPolicy::Exact),
        }
    }
}

/// Arguments for the parse command
#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Covered blocks, e.g. "1-13, 15, 20-22"
    #[arg(allow_hyphen_values = true)]
    pub ranges: String,

    /// Total number of blocks in the condominium
    #[arg(short, long, allow_negative_numbers = true)]
    pub total: i64,

    /// List the tokens that were skipped
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for the payload command
#[derive(Parser, Debug)]
pub struct PayloadArgs {
    /// Form snapshot (JSON)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write the body here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the roster command
#[derive(Parser, Debug)]
pub struct RosterArgs {
    /// Total number of blocks in the condominium
    #[arg(short, long)]
    pub total: i64,

    /// Agent and blocks as NAME=RANGES (repeatable)
    #[arg(short, long = "assign", value_parser = parse_assignment, required = true)]
    pub assignments: Vec<AcsAssignment>,

    /// Remove an agent after the assignments are added (repeatable)
    #[arg(short, long)]
    pub remove: Vec<String>,
}

/// Parse `NAME=RANGES` into an assignment
pub fn parse_assignment(value: &str) -> Result<AcsAssignment, String> {
    let (nome, blocos) = value
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=RANGES, got '{value}'"))?;
    let nome = nome.trim();
    if nome.is_empty() {
        return Err("agent name is empty".to_string());
    }
    Ok(AcsAssignment::new(nome, blocos.trim()))
}

/// Arguments for the metrics command
#[derive(Parser, Debug)]
pub struct MetricsArgs {
    /// Data file with a `condominios` array (JSON)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Only this team's condominiums
    #[arg(long)]
    pub equipe: Option<String>,

    /// Only condominiums with this status
    #[arg(long)]
    pub status: Option<StatusArg>,

    /// Only condominiums with this priority
    #[arg(long)]
    pub priority: Option<PriorityArg>,

    /// Only condominiums whose primary agent is this
    #[arg(long)]
    pub acs: Option<String>,

    /// Minimum coverage percentage
    #[arg(long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_coverage: u8,

    /// Recompute each record's coverage from its agents' ranges
    #[arg(long)]
    pub recompute: bool,

    /// Sort the listing by coverage
    #[arg(long)]
    pub sort: Option<SortArg>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Show current configuration
    #[arg(long)]
    pub show: bool,

    /// Print a YAML template with every setting
    #[arg(long)]
    pub template: bool,
}

/// Color argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatArg {
    /// Human-readable text
    Text,
    /// JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Status policy argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyArg {
    /// Percentage thresholds (67% complete, 34% partial by default)
    Tiered,
    /// Complete only when every block is covered
    Exact,
}

/// Coverage status argument
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StatusArg {
    /// completo
    #[value(alias = "completo")]
    Complete,
    /// parcial
    #[value(alias = "parcial")]
    Partial,
    /// descoberto
    #[value(alias = "descoberto")]
    Uncovered,
}

impl From<StatusArg> for CoverageStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Complete => Self::Complete,
            StatusArg::Partial => Self::Partial,
            StatusArg::Uncovered => Self::Uncovered,
        }
    }
}

/// Priority argument
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PriorityArg {
    /// alta
    #[value(alias = "alta")]
    High,
    /// media
    #[value(alias = "media")]
    Medium,
    /// baixa
    #[value(alias = "baixa")]
    Low,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::High => Self::Alta,
            PriorityArg::Medium => Self::Media,
            PriorityArg::Low => Self::Baixa,
        }
    }
}

/// Sort direction argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortArg {
    /// Highest coverage first
    Desc,
    /// Lowest coverage first
    Asc,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_command() {
        let cli = Cli::try_parse_from(["acscov", "parse", "1-13,15", "--total", "23"]).unwrap();
        match cli.command {
            Commands::Parse(args) => {
                assert_eq!(args.ranges, "1-13,15");
                assert_eq!(args.total, 23);
                assert!(!args.explain);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_command_accepts_leading_dash_ranges() {
        let cli = Cli::try_parse_from(["acscov", "parse", "-5", "--total", "10"]).unwrap();
        assert!(matches!(cli.command, Commands::Parse(ref a) if a.ranges == "-5"));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "acscov", "-vv", "--format", "json", "--policy", "exact", "parse", "1", "-t", "2",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.format, Some(FormatArg::Json)));
        assert_eq!(cli.policy.policy, Some(PolicyArg::Exact));
    }

    #[test]
    fn test_roster_requires_assignment() {
        assert!(Cli::try_parse_from(["acscov", "roster", "--total", "10"]).is_err());
    }

    #[test]
    fn test_roster_assignments() {
        let cli = Cli::try_parse_from([
            "acscov", "roster", "-t", "23", "-a", "Maria=1-13", "-a", "João=14-16",
        ])
        .unwrap();
        match cli.command {
            Commands::Roster(args) => {
                assert_eq!(args.assignments.len(), 2);
                assert_eq!(args.assignments[1].nome, "João");
                assert_eq!(args.assignments[1].blocos, "14-16");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_metrics_accepts_backend_status_names() {
        let cli = Cli::try_parse_from([
            "acscov", "metrics", "-i", "d.json", "--status", "completo", "--priority", "alta",
        ])
        .unwrap();
        match cli.command {
            Commands::Metrics(args) => {
                assert!(matches!(args.status, Some(StatusArg::Complete)));
                assert!(matches!(args.priority, Some(PriorityArg::High)));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_assignment() {
        assert!(parse_assignment("Maria = 1-5").is_ok());
        assert!(parse_assignment("Maria").is_err());
        assert!(parse_assignment("=1-5").is_err());
    }

    mod policy_resolution_tests {
        use super::*;

        #[test]
        fn test_no_flags_keeps_base() {
            let args = PolicyArgs::default();
            assert_eq!(args.resolve(StatusPolicy::Exact).unwrap(), StatusPolicy::Exact);
        }

        #[test]
        fn test_exact_flag_wins() {
            let args = PolicyArgs {
                policy: Some(PolicyArg::Exact),
                ..PolicyArgs::default()
            };
            assert_eq!(args.resolve(StatusPolicy::default()).unwrap(), StatusPolicy::Exact);
        }

        #[test]
        fn test_threshold_overrides() {
            let args = PolicyArgs {
                policy: None,
                complete_at: Some(90),
                partial_at: None,
            };
            assert_eq!(
                args.resolve(StatusPolicy::default()).unwrap(),
                StatusPolicy::Tiered {
                    complete_at: 90,
                    partial_at: 34
                }
            );
        }

        #[test]
        fn test_tiered_flag_replaces_exact_base() {
            let args = PolicyArgs {
                policy: Some(PolicyArg::Tiered),
                ..PolicyArgs::default()
            };
            assert_eq!(args.resolve(StatusPolicy::Exact).unwrap(), StatusPolicy::default());
        }

        #[test]
        fn test_thresholds_with_exact_flag_rejected() {
            let args = PolicyArgs {
                policy: Some(PolicyArg::Exact),
                complete_at: Some(90),
                partial_at: None,
            };
            let err = args.resolve(StatusPolicy::default()).unwrap_err();
            assert!(matches!(err, CliError::InvalidArgument { .. }));
        }

        #[test]
        fn test_thresholds_with_exact_base_rejected() {
            let args = PolicyArgs {
                policy: None,
                complete_at: None,
                partial_at: Some(20),
            };
            assert!(args.resolve(StatusPolicy::Exact).is_err());
        }
    }
}
