use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::output::RankDir;

/// Root of `mh2graph.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Mh2Config {
    pub parameters: ParameterConfig,
    pub output: OutputConfig,
}

/// `[parameters]` section; unset values fall back to the built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParameterConfig {
    pub lambda: Option<f64>,
    pub mean_service_time: Option<f64>,
    pub coefficient_of_variation: Option<f64>,
    pub phase1_probability: Option<f64>,
}

/// `[output]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub dot_path: Option<PathBuf>,
    pub rankdir: Option<RankDir>,
}
