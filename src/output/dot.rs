//! DOT/Graphviz output for the transition graph.
//!
//! One node per state, one edge per non-zero off-diagonal generator entry.
//! Edge colour encodes the event: blue and green for arrivals starting
//! phase 1 and phase 2, red and orange for completions of phase 1 and
//! phase 2. Completions that pull the next job from the queue are dashed.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::errors::{Error, Result};
use crate::model::{Model, Phase, State, TransitionCategory};

/// Graph layout direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RankDir {
    #[default]
    #[serde(rename = "TB")]
    TopBottom,
    #[serde(rename = "LR")]
    LeftRight,
}

impl RankDir {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankDir::TopBottom => "TB",
            RankDir::LeftRight => "LR",
        }
    }
}

/// Configuration for DOT output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotConfig {
    /// Layout direction (default: top to bottom)
    pub rankdir: RankDir,
    /// Decimal places of rates in edge labels (default: 4)
    pub rate_decimals: usize,
    /// Emit `// ...` comments between edge groups (default: true)
    pub group_comments: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            rankdir: RankDir::TopBottom,
            rate_decimals: 4,
            group_comments: true,
        }
    }
}

/// Order and captions of edge groups in the output
const EDGE_GROUPS: [(EdgeClass, &str); 4] = [
    (EdgeClass::Arrival(Phase::One), "Arrivals starting phase 1"),
    (EdgeClass::Arrival(Phase::Two), "Arrivals starting phase 2"),
    (EdgeClass::Completion(Phase::One), "Phase 1 completions"),
    (EdgeClass::Completion(Phase::Two), "Phase 2 completions"),
];

/// Colour class of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeClass {
    Arrival(Phase),
    Completion(Phase),
}

impl EdgeClass {
    pub fn of(category: TransitionCategory) -> Self {
        match category {
            TransitionCategory::Arrival { phase } => Self::Arrival(phase),
            TransitionCategory::Completion { phase, .. } => Self::Completion(phase),
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Arrival(Phase::One) => "blue",
            Self::Arrival(Phase::Two) => "green",
            Self::Completion(Phase::One) => "red",
            Self::Completion(Phase::Two) => "orange",
        }
    }
}

/// Fill colour of a state node
pub fn node_fill(state: State) -> &'static str {
    match (state.phase(), state.is_full()) {
        (None, _) => "lightblue",
        (Some(_), true) => "pink",
        (Some(Phase::One), false) => "lightgreen",
        (Some(Phase::Two), false) => "lightyellow",
    }
}

/// DOT format writer
pub struct DotWriter {
    config: DotConfig,
}

impl DotWriter {
    pub fn with_config(config: DotConfig) -> Self {
        Self { config }
    }

    pub fn write<W: Write>(&self, model: &Model, out: &mut W) -> io::Result<()> {
        let rates = &model.rates;

        writeln!(out, "digraph MH2 {{")?;
        writeln!(out, "    rankdir={};", self.config.rankdir.as_str())?;
        writeln!(
            out,
            "    node [shape=circle, style=filled, fillcolor=lightgreen, fontsize=10];"
        )?;
        writeln!(out, "    edge [fontsize=9];")?;
        writeln!(out)?;
        writeln!(
            out,
            "    label=\"M/H₂/1/2 transition graph\\nλ₁={:.3}, λ₂={:.3}, μ₁={:.4}, μ₂={:.4}\";",
            rates.lambda1, rates.lambda2, rates.mu1, rates.mu2
        )?;
        writeln!(out, "    labelloc=\"t\";")?;
        writeln!(out, "    fontsize=14;")?;
        writeln!(out)?;

        if self.config.group_comments {
            writeln!(out, "    // States")?;
        }
        for state in State::ALL {
            writeln!(
                out,
                "    {} [label=\"{}\\n{}\\n({})\", fillcolor={}];",
                state.id(),
                state.id(),
                state.notation(),
                state.short_tag(),
                node_fill(state)
            )?;
        }

        for (class, caption) in EDGE_GROUPS {
            let edges: Vec<_> = model
                .transitions
                .iter()
                .filter(|t| EdgeClass::of(t.category) == class)
                .collect();
            if edges.is_empty() {
                continue;
            }

            writeln!(out)?;
            if self.config.group_comments {
                writeln!(out, "    // {} ({})", caption, class.color())?;
            }
            for t in edges {
                let style = if t.category.is_requeue() {
                    ", style=dashed"
                } else {
                    ""
                };
                writeln!(
                    out,
                    "    {} -> {} [label=\"{}\", color={}{}];",
                    t.from.id(),
                    t.to.id(),
                    t.category.label(rates, self.config.rate_decimals),
                    class.color(),
                    style
                )?;
            }
        }

        writeln!(out, "}}")?;
        Ok(())
    }
}

/// Render the Graphviz source to a string
pub fn export_graphviz(model: &Model, config: &DotConfig) -> io::Result<String> {
    let mut buffer = Vec::new();
    DotWriter::with_config(config.clone()).write(model, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Write the Graphviz source to `path`, creating or truncating the file
pub fn write_graphviz(model: &Model, config: &DotConfig, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        Error::file_system(
            format!("cannot create {}", path.display()),
            path,
            e,
        )
    })?;
    let mut buf_writer = BufWriter::new(file);

    DotWriter::with_config(config.clone())
        .write(model, &mut buf_writer)
        .and_then(|_| buf_writer.flush())
        .map_err(|e| Error::file_system(format!("cannot write {}", path.display()), path, e))?;

    info!(path = %path.display(), edges = model.transition_count(), "wrote graphviz file");
    Ok(())
}
