//! Seed commands
//!
//! Usage: seedbed seed run [--environment <ENV>] [--fixtures <PATH>] ...
//!        seedbed seed status [--environment <ENV>]

use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use seedbed_core::logging_facility;
use seedbed_core::seed::{Collaborators, RunGuard, SeedOutcome, Seeder, UploadsDir};
use seedbed_core::SeedConfig;
use seedbed_store::fixtures::load_fixtures;
use seedbed_store::SqliteBackend;

use crate::settings;

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Seed the environment unless it has been seeded before
    Run(Overrides),
    /// Report whether the environment has been seeded
    Status(Overrides),
}

/// Flags that take precedence over file and environment configuration
#[derive(Debug, Default, Args)]
pub struct Overrides {
    /// Deployment environment the run-once flag is scoped to
    #[arg(long)]
    pub environment: Option<String>,

    /// SQLite database path
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Directory of seed files referenced by fixtures
    #[arg(long)]
    pub uploads_dir: Option<PathBuf>,

    /// Fixture document (JSON or YAML)
    #[arg(long)]
    pub fixtures: Option<PathBuf>,

    /// Directory uploaded blobs are stored in
    #[arg(long)]
    pub blob_dir: Option<PathBuf>,
}

impl Overrides {
    fn apply(self, mut cfg: SeedConfig) -> SeedConfig {
        if let Some(environment) = self.environment {
            cfg.environment = environment;
        }
        if let Some(database) = self.database {
            cfg.database = database;
        }
        if let Some(uploads_dir) = self.uploads_dir {
            cfg.uploads_dir = uploads_dir;
        }
        if let Some(fixtures) = self.fixtures {
            cfg.fixtures = fixtures;
        }
        if let Some(blob_dir) = self.blob_dir {
            cfg.blob_dir = blob_dir;
        }
        cfg
    }
}

/// Execute seed command
pub async fn execute(
    args: SeedArgs,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (overrides, run) = match args.command {
        SeedCommand::Run(overrides) => (overrides, true),
        SeedCommand::Status(overrides) => (overrides, false),
    };
    let cfg = overrides.apply(settings::load(config_path)?);
    logging_facility::init(cfg.log_profile);

    if run {
        execute_run(&cfg).await
    } else {
        execute_status(&cfg).await
    }
}

/// Execute seed run
async fn execute_run(cfg: &SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let backend = Arc::new(SqliteBackend::open(&cfg.database, &cfg.blob_dir)?);
    let fixtures = load_fixtures(&cfg.fixtures)?;

    let collaborators = Collaborators {
        content: backend.clone(),
        assets: backend.clone(),
        files: Arc::new(UploadsDir::new(&cfg.uploads_dir)),
        kv: backend,
    };
    let seeder = Seeder::new(collaborators, cfg.environment.as_str());

    match seeder.run(&fixtures).await? {
        SeedOutcome::AlreadySeeded => {
            println!(
                "Environment '{}' was already seeded; nothing imported",
                cfg.environment
            );
        }
        SeedOutcome::Seeded(report) => {
            for (content_type, err) in report.failures() {
                eprintln!("✗ {}: {}", content_type, err);
            }
            println!(
                "✓ Seeded environment '{}': {} entries created, {} failed (run {})",
                cfg.environment,
                report.created_count(),
                report.failed_count(),
                seeder.run_id()
            );
        }
    }

    Ok(())
}

/// Execute seed status
async fn execute_status(cfg: &SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let Some(backend) = SqliteBackend::open_read_only(&cfg.database, &cfg.blob_dir)? else {
        println!("Environment '{}': not seeded", cfg.environment);
        return Ok(());
    };
    let backend = Arc::new(backend);
    let guard = RunGuard::new(backend.clone(), cfg.environment.as_str());

    let state = if guard.peek().await? {
        "seeded"
    } else {
        "not seeded"
    };
    println!("Environment '{}': {}", cfg.environment, state);

    for (content_type, count) in backend.entry_counts()? {
        if count > 0 {
            println!("  {:<16} {}", content_type.as_str(), count);
        }
    }
    println!("  {:<16} {}", "files", backend.file_count()?);

    Ok(())
}
