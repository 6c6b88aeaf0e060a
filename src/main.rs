//! basta-network CLI: summarises a BASTA trees file into a transmission network.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use basta_network::network::write_network_files;
use basta_network::{AnalysisConfig, analyze_file};

#[derive(Parser)]
#[command(
    name = "basta-network",
    about = "Infer host-to-host transmission probabilities from a BASTA posterior tree sample"
)]
struct Cli {
    /// Input file containing the sampled trees (usually with extension .trees)
    #[arg(short, long)]
    input: PathBuf,

    /// Output prefix; writes <prefix>_network.txt (and <prefix>_network.json)
    #[arg(short, long)]
    output: PathBuf,

    /// Percentage of trees to discard as burnin
    #[arg(short, long, default_value = "20")]
    burnin: u32,

    /// Minimum probability for an edge to be listed in the JSON output
    #[arg(short, long, default_value = "0.1")]
    min_value: f64,

    /// Discard the first tree before applying burnin
    #[arg(long)]
    skip_first: bool,

    /// Classify trees in parallel
    #[arg(long)]
    parallel: bool,

    /// Also write the network as JSON
    #[arg(long)]
    json: bool,

    /// Log per-tree details
    #[arg(short, long)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = AnalysisConfig {
        burnin_percent: cli.burnin,
        min_value: cli.min_value,
        skip_first: cli.skip_first,
        parallel: cli.parallel,
        json: cli.json,
    };

    let network = match analyze_file(&cli.input, &config) {
        Ok(network) => network,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match write_network_files(&cli.output, &network, config.min_value, config.json) {
        Ok(paths) => {
            info!("Wrote {} file(s)", paths.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error writing output: {e}");
            ExitCode::FAILURE
        }
    }
}
