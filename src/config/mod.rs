//! Layered configuration.
//!
//! Precedence, lowest first: built-in defaults, `mh2graph.toml` (or the file
//! given with `--config`), `MH2_*` environment variables, command-line flags.
//! Environment variables and flags arrive together through clap, so this
//! module only merges the file layer with a set of overrides.

pub mod core;
pub mod loader;

use std::path::PathBuf;

pub use self::core::{Mh2Config, OutputConfig, ParameterConfig};
pub use loader::{load_config, load_config_from_path, parse_config, DEFAULT_CONFIG_FILE};

use crate::model::Parameters;
use crate::output::{DotConfig, RankDir};

/// Graphviz file written when nothing else is configured
pub const DEFAULT_DOT_PATH: &str = "graph2.dot";

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub lambda: Option<f64>,
    pub mean_service_time: Option<f64>,
    pub coefficient_of_variation: Option<f64>,
    pub phase1_probability: Option<f64>,
    pub dot_path: Option<PathBuf>,
    pub rankdir: Option<RankDir>,
}

/// Fully resolved run settings
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub parameters: Parameters,
    pub dot_path: PathBuf,
    pub dot: DotConfig,
}

/// Merge defaults, file values and overrides
pub fn resolve(file: &Mh2Config, overrides: &Overrides) -> ResolvedConfig {
    let defaults = Parameters::default();
    let p = &file.parameters;

    let parameters = Parameters {
        lambda: overrides
            .lambda
            .or(p.lambda)
            .unwrap_or(defaults.lambda),
        mean_service_time: overrides
            .mean_service_time
            .or(p.mean_service_time)
            .unwrap_or(defaults.mean_service_time),
        coefficient_of_variation: overrides
            .coefficient_of_variation
            .or(p.coefficient_of_variation)
            .unwrap_or(defaults.coefficient_of_variation),
        phase1_probability: overrides
            .phase1_probability
            .or(p.phase1_probability)
            .unwrap_or(defaults.phase1_probability),
    };

    let dot_path = overrides
        .dot_path
        .clone()
        .or_else(|| file.output.dot_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DOT_PATH));

    let dot = DotConfig {
        rankdir: overrides
            .rankdir
            .or(file.output.rankdir)
            .unwrap_or_default(),
        ..DotConfig::default()
    };

    ResolvedConfig {
        parameters,
        dot_path,
        dot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_given() {
        let resolved = resolve(&Mh2Config::default(), &Overrides::default());
        assert_eq!(resolved.parameters, Parameters::default());
        assert_eq!(resolved.dot_path, PathBuf::from("graph2.dot"));
        assert_eq!(resolved.dot.rankdir, RankDir::TopBottom);
    }

    #[test]
    fn test_overrides_beat_file_values() {
        let file = Mh2Config {
            parameters: ParameterConfig {
                lambda: Some(0.4),
                coefficient_of_variation: Some(1.5),
                ..Default::default()
            },
            output: OutputConfig {
                dot_path: Some(PathBuf::from("file.dot")),
                rankdir: Some(RankDir::LeftRight),
            },
        };
        let overrides = Overrides {
            lambda: Some(0.9),
            dot_path: Some(PathBuf::from("cli.dot")),
            ..Default::default()
        };

        let resolved = resolve(&file, &overrides);
        assert_eq!(resolved.parameters.lambda, 0.9);
        assert_eq!(resolved.parameters.coefficient_of_variation, 1.5);
        assert_eq!(resolved.parameters.mean_service_time, 10.0);
        assert_eq!(resolved.dot_path, PathBuf::from("cli.dot"));
        assert_eq!(resolved.dot.rankdir, RankDir::LeftRight);
    }
}
