//! Command handlers - extracted from main.rs for testability
//!
//! Each handler module contains:
//! - The execution logic for a CLI command
//! - Pure helper functions that build the output
//! - Tests for those helpers

pub mod config;
pub mod metrics;
pub mod parse;
pub mod payload;
pub mod roster;

pub use config::{execute_config, render_config};
pub use metrics::{execute_metrics, load_dataset, select_records, Dataset};
pub use parse::{execute_parse, render_parse};
pub use payload::{build_payload, execute_payload, load_form};
pub use roster::{build_record, execute_roster, render_roster};
