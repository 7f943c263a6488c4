mod commands;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "maxsphere",
    about = "Convert GoPro MAX frame pairs to equirectangular images"
)]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a sequence of frame pairs
    Run(commands::pipeline::RunArgs),
    /// Show the detected frame template and table cache status
    Info(commands::info::InfoArgs),
    /// Build a projection table ahead of time
    Table(commands::table::TableArgs),
    /// Print a default batch config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Run(args) => commands::pipeline::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Table(args) => commands::table::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
