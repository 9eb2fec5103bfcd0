//! Scrambler CLI - offline host for the scrambler reverb.

mod commands;
mod preset_file;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scrambler")]
#[command(author, version, about = "Scrambler reverb offline host", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a WAV file through the reverb
    Process(commands::process::ProcessArgs),

    /// List factory presets and their values
    Presets(commands::presets::PresetsArgs),

    /// List parameters and their ranges
    Params(commands::params::ParamsArgs),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Params(args) => commands::params::run(args),
    }
}
