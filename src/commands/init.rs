use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::DEFAULT_CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# mh2graph configuration
#
# Command-line flags and MH2_* environment variables override these values.

[parameters]
# Arrival rate λ
lambda = 0.7
# Mean service time B
mean_service_time = 10.0
# Coefficient of variation V (> 1 for hyperexponential service)
coefficient_of_variation = 2.2
# Probability q of serving a job in phase 1 (1/7)
phase1_probability = 0.14285714285714285

[output]
dot_path = "graph2.dot"
# "TB" (top to bottom) or "LR" (left to right)
rankdir = "TB"
"#;

/// Write the default configuration into `dir`
pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(DEFAULT_CONFIG_FILE);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}

pub fn init_config(force: bool) -> Result<()> {
    let path = init_config_in(Path::new("."), force)?;
    println!("Created {} configuration file", path.display());
    Ok(())
}
