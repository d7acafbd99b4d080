use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;

use crate::config::ResolvedConfig;
use crate::formatting::FormattingConfig;
use crate::model::{build_model, Model};
use crate::output::{write_graphviz, write_graphviz_echo, write_report, OutputFormat};

pub struct ReportConfig {
    pub resolved: ResolvedConfig,
    pub format: OutputFormat,
    pub formatting: FormattingConfig,
    pub write_dot: bool,
}

impl ReportConfig {
    pub fn new(
        resolved: ResolvedConfig,
        format: OutputFormat,
        formatting: FormattingConfig,
        write_dot: bool,
    ) -> Self {
        Self {
            resolved,
            format,
            formatting,
            write_dot,
        }
    }
}

/// Build the model, print the report to `out` and write the Graphviz file.
///
/// The report is complete before the file write starts, so a failed write
/// still leaves the full report on `out`.
pub fn run_report<W: Write>(config: &ReportConfig, out: &mut W) -> Result<Model> {
    let model = build_model(&config.resolved.parameters)
        .context("Failed to build the M/H2/1/2 model")?;

    write_report(&model, config.format, config.formatting, out)?;

    let dot_target = config.resolved.dot_path.display().to_string();
    if config.format == OutputFormat::Terminal {
        write_graphviz_echo(&model, &config.resolved.dot, &dot_target, out)?;
    }

    if config.write_dot {
        write_graphviz(&model, &config.resolved.dot, &config.resolved.dot_path)
            .with_context(|| format!("Failed to write Graphviz file {}", dot_target))?;

        if config.format == OutputFormat::Terminal {
            writeln!(out, "Graphviz file {} created.", dot_target)?;
            writeln!(
                out,
                "Render it with `dot -Tpng {} -o graph.png` or paste it into any online Graphviz viewer.",
                dot_target
            )?;
        }
    } else {
        info!("skipping Graphviz file");
    }

    Ok(model)
}

pub fn handle_report(config: ReportConfig) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    run_report(&config, &mut handle)?;
    handle.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, Mh2Config, Overrides};
    use tempfile::TempDir;

    fn config_in(dir: &TempDir, format: OutputFormat, write_dot: bool) -> ReportConfig {
        let overrides = Overrides {
            dot_path: Some(dir.path().join("graph2.dot")),
            ..Default::default()
        };
        ReportConfig::new(
            resolve(&Mh2Config::default(), &overrides),
            format,
            FormattingConfig::plain(),
            write_dot,
        )
    }

    #[test]
    fn test_report_writes_dot_file() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, OutputFormat::Terminal, true);

        let mut out = Vec::new();
        let model = run_report(&config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let written = std::fs::read_to_string(dir.path().join("graph2.dot")).unwrap();
        assert!(text.contains(&written));
        assert!(text.contains("created."));
        assert_eq!(model.transition_count(), 20);
    }

    #[test]
    fn test_no_dot_skips_file() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, OutputFormat::Terminal, false);

        run_report(&config, &mut Vec::<u8>::new()).unwrap();
        assert!(!dir.path().join("graph2.dot").exists());
    }

    #[test]
    fn test_unwritable_target_fails_after_report() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir, OutputFormat::Terminal, true);
        config.resolved.dot_path = dir.path().join("missing").join("graph2.dot");

        let mut out = Vec::new();
        let err = run_report(&config, &mut out).unwrap_err();

        assert!(format!("{err:#}").contains("Failed to write Graphviz file"));
        assert!(String::from_utf8(out).unwrap().contains("TRANSITION RATE MATRIX Q"));
    }

    #[test]
    fn test_json_stdout_is_pure_json() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir, OutputFormat::Json, true);

        let mut out = Vec::new();
        run_report(&config, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["transitions"].as_array().unwrap().len(), 20);
        assert!(dir.path().join("graph2.dot").exists());
    }
}
