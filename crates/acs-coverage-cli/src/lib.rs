//! acscov CLI library
//!
//! Command-line front end for `acs-coverage`: parse block ranges, build
//! backend payloads, combine agent rosters and summarize team data.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod logging;
mod output;

pub use commands::{
    parse_assignment, Cli, ColorArg, Commands, ConfigArgs, FormatArg, MetricsArgs, ParseArgs,
    PayloadArgs, PolicyArg, PolicyArgs, PriorityArg, RosterArgs, SortArg, StatusArg,
};
pub use config::{CliConfig, ColorChoice, FileConfig, OutputFormat, Verbosity};
pub use error::{CliError, CliResult};
pub use logging::init_tracing;
pub use output::{blocks, progress_bar, Reporter};
