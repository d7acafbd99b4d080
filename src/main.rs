use anyhow::Result;
use clap::Parser;
use mh2graph::cli::{Cli, Commands, ReportArgs};
use mh2graph::commands::{self, ReportConfig};
use mh2graph::{config, observability};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.into_command() {
        Commands::Report(args) => handle_report_command(args),
        Commands::Init { force } => {
            observability::init_tracing(0);
            commands::init_config(force)
        }
    }
}

fn handle_report_command(args: ReportArgs) -> Result<()> {
    observability::init_tracing(args.verbosity);

    let file_config = config::load_config(args.config.as_ref())?;
    let resolved = config::resolve(&file_config, &args.overrides());

    let report = ReportConfig::new(
        resolved,
        args.format.into(),
        args.formatting(),
        !args.no_dot,
    );
    commands::handle_report(report)
}
