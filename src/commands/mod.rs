//! CLI command implementations.
//!
//! - **report**: build the chain, print the report, write the Graphviz file
//! - **init**: write a default `mh2graph.toml`

pub mod init;
pub mod report;

pub use init::{init_config, init_config_in};
pub use report::{handle_report, run_report, ReportConfig};
