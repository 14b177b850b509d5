//! Seedbed CLI
//!
//! Command-line interface for seeding a content backend

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod settings;

#[derive(Debug, Parser)]
#[command(name = "seedbed")]
#[command(about = "Seedbed - one-time content seeding", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./seedbed.toml when present)
    #[arg(long, global = true, env = "SEEDBED_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Seeding operations
    Seed(commands::seed::SeedArgs),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Seed(args) => commands::seed::execute(args, cli.config.as_deref()).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
