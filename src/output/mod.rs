pub mod diagram;
pub mod dot;
pub mod json;
pub mod terminal;

use std::io::Write;

use crate::errors::Result;
use crate::formatting::FormattingConfig;
use crate::model::Model;

pub use dot::{export_graphviz, write_graphviz, DotConfig, DotWriter, EdgeClass, RankDir};
pub use json::{JsonReport, JsonWriter};
pub use terminal::{render, TerminalWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

/// Write the report for `model` in the requested format
pub fn write_report<W: Write>(
    model: &Model,
    format: OutputFormat,
    formatting: FormattingConfig,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Terminal => TerminalWriter::new(formatting).write(model, out)?,
        OutputFormat::Json => JsonWriter::new(out).write_model(model)?,
    }
    Ok(())
}

/// Graphviz source framed for echoing to the terminal
pub fn write_graphviz_echo<W: Write>(
    model: &Model,
    config: &DotConfig,
    target: &str,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", "=".repeat(100))?;
    writeln!(out, "  GRAPHVIZ SOURCE (saved as {target})")?;
    writeln!(out, "{}", "=".repeat(100))?;
    writeln!(out)?;
    out.write_all(export_graphviz(model, config)?.as_bytes())?;
    writeln!(out)?;
    Ok(())
}
