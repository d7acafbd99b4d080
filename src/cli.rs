use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Overrides;
use crate::formatting::FormattingConfig;
use crate::output::{self, RankDir};

#[derive(Parser, Debug)]
#[command(name = "mh2graph")]
#[command(about = "Transition graph and generator matrix of the M/H2/1/2 queue", long_about = None)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub report: ReportArgs,
}

impl Cli {
    /// The report command, whether spelled out or implied
    pub fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Report(self.report))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the chain, print the report and write the Graphviz file (default)
    Report(ReportArgs),

    /// Write a commented mh2graph.toml with the default parameters
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Arrival rate λ
    #[arg(long, env = "MH2_LAMBDA", allow_negative_numbers = true)]
    pub lambda: Option<f64>,

    /// Mean service time B
    #[arg(short = 'b', long, env = "MH2_MEAN_SERVICE_TIME", allow_negative_numbers = true)]
    pub mean_service_time: Option<f64>,

    /// Coefficient of variation V of the service time (must exceed 1)
    #[arg(long = "cv", env = "MH2_CV", allow_negative_numbers = true)]
    pub coefficient_of_variation: Option<f64>,

    /// Probability q that a job is served in phase 1
    #[arg(
        long = "q",
        visible_alias = "phase1-probability",
        env = "MH2_Q",
        allow_negative_numbers = true
    )]
    pub phase1_probability: Option<f64>,

    /// Graphviz output file (defaults to graph2.dot)
    #[arg(short = 'o', long = "dot-output", env = "MH2_DOT_OUTPUT")]
    pub dot_output: Option<PathBuf>,

    /// Graph layout direction
    #[arg(long, value_enum)]
    pub rankdir: Option<RankDirArg>,

    /// Configuration file (defaults to ./mh2graph.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report format on stdout
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Skip writing the Graphviz file
    #[arg(long = "no-dot")]
    pub no_dot: bool,

    /// Plain output (ASCII only, no colors)
    #[arg(long)]
    pub plain: bool,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl ReportArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            lambda: self.lambda,
            mean_service_time: self.mean_service_time,
            coefficient_of_variation: self.coefficient_of_variation,
            phase1_probability: self.phase1_probability,
            dot_path: self.dot_output.clone(),
            rankdir: self.rankdir.map(Into::into),
        }
    }

    pub fn formatting(&self) -> FormattingConfig {
        if self.plain {
            FormattingConfig::plain()
        } else {
            FormattingConfig::from_env()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Terminal,
    /// Model as a JSON document
    Json,
}

impl From<OutputFormat> for output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => output::OutputFormat::Terminal,
            OutputFormat::Json => output::OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RankDirArg {
    /// Top to bottom
    Tb,
    /// Left to right
    Lr,
}

impl From<RankDirArg> for RankDir {
    fn from(arg: RankDirArg) -> Self {
        match arg {
            RankDirArg::Tb => RankDir::TopBottom,
            RankDirArg::Lr => RankDir::LeftRight,
        }
    }
}
