// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod report;
mod snapshot;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context};
use snapshot::Snapshot;
use staffing::{EngineConfig, StaffingRepository, run_pass};
use staffing_domain::MissionId;
use staffing_persistence::Persistence;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(args.log_level().into())
                .from_env_lossy(),
        )
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err:#}");
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Mission staffing batch runner
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file
    #[arg(short, long, default_value = "staffing.db")]
    database: PathBuf,

    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        info!(database = %self.database.display(), "Opening staffing database");
        let mut persistence = Persistence::new_with_file(&self.database)
            .wrap_err_with(|| format!("Failed to open {}", self.database.display()))?;
        self.command.run(&mut persistence)
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Load a master data snapshot
    #[command(visible_alias = "i")]
    Import {
        /// JSON snapshot of missions, workers, availability, priorities and history
        snapshot: PathBuf,
    },

    /// Run one staffing pass
    #[command(visible_alias = "r")]
    Run {
        /// JSON engine configuration; defaults apply to anything left out
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Process name recorded in the run log
        #[arg(short, long)]
        process: Option<String>,

        /// Write a per-slot CSV report here
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print the stored status summaries of a mission as JSON
    #[command(visible_alias = "s")]
    Status {
        #[arg(short, long)]
        mission: i64,
    },
}

impl Command {
    fn run(self, persistence: &mut Persistence) -> Result<()> {
        match self {
            Self::Import { snapshot } => import(persistence, &snapshot),
            Self::Run {
                config,
                process,
                report,
            } => run(persistence, config.as_deref(), process, report.as_deref()),
            Self::Status { mission } => status(persistence, mission),
        }
    }
}

fn import(persistence: &mut Persistence, path: &Path) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    let snapshot = Snapshot::from_json(&json)
        .wrap_err_with(|| format!("Invalid snapshot {}", path.display()))?;
    snapshot.apply(persistence)?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    EngineConfig::from_json(&json).wrap_err_with(|| format!("Invalid config {}", path.display()))
}

fn run(
    persistence: &mut Persistence,
    config: Option<&Path>,
    process: Option<String>,
    report_path: Option<&Path>,
) -> Result<()> {
    let mut config = load_config(config)?;
    if let Some(process) = process {
        config.process_name = process;
    }

    let mut lease = persistence.reconnect()?;
    let process = config.process_name.clone();
    let pass = run_pass(persistence, &mut lease, &config, &process)?;

    if let Some(path) = report_path {
        let file =
            File::create(path).wrap_err_with(|| format!("Failed to create {}", path.display()))?;
        report::write_csv(&pass, file)?;
        info!(path = %path.display(), "Pass report written");
    }

    let failed = pass.failed_missions();
    if !failed.is_empty() {
        warn!(
            failed = failed.len(),
            "Some missions could not be staffed; see the log above"
        );
    }
    Ok(())
}

fn status(persistence: &mut Persistence, mission: i64) -> Result<()> {
    let summaries = persistence.status_summaries(MissionId::new(mission))?;
    println!("{}", serde_json::to_string_pretty(&summaries)?);
    Ok(())
}
