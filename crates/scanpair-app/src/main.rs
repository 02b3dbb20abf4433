// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanpair — combine front/back document scans into side-by-side images.
//
// Entry point. Initialises logging, resolves the scan directory (the current
// directory unless one is given), runs the pipeline once, and prints each
// pair's outcome followed by a summary.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use scanpair_core::human_errors::{Severity, humanize_error};
use scanpair_core::{CombinerConfig, ScanpairError};
use scanpair_pipeline::Pipeline;

#[derive(Parser)]
#[command(
    name = "scanpair",
    about = "Combine <id>F.jpg / <id>B.jpg scans into side-by-side <id>.jpg images",
    version
)]
struct Cli {
    /// Scan directory (defaults to the current directory)
    dir: Option<PathBuf>,

    /// JSON settings file; missing fields use the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Create the archive directories before running
    #[arg(long)]
    create_dirs: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let root = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot determine the current directory")?,
    };

    let config = match &cli.config {
        Some(path) => match CombinerConfig::load(path) {
            Ok(config) => config,
            Err(err) => return Ok(report_fatal(&err)),
        },
        None => CombinerConfig::default(),
    };

    let pipeline = match Pipeline::new(&root, config) {
        Ok(pipeline) => pipeline,
        Err(err) => return Ok(report_fatal(&err)),
    };

    if cli.create_dirs && root.is_dir() {
        let archiver = pipeline.archiver();
        create_dir(archiver.source_dir())?;
        create_dir(archiver.combined_dir())?;
    }

    tracing::info!(root = %root.display(), "Scanpair starting");

    let summary = match pipeline.run_with(|outcome| println!("{outcome}")) {
        Ok(summary) => summary,
        Err(err @ ScanpairError::RootDirectoryMissing(_)) => return Ok(report_fatal(&err)),
        Err(err) => {
            return Err(err).with_context(|| format!("scanning {}", root.display()));
        }
    };

    println!("Processing complete!");
    println!(
        "{} succeeded, {} warned, {} failed",
        summary.succeeded, summary.warned, summary.failed
    );
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("serializing run summary")?
        );
    }

    Ok(if summary.failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Print a run-level error in plain language; nothing has been touched.
fn report_fatal(err: &ScanpairError) -> ExitCode {
    let human = humanize_error(err);
    tracing::error!(error = %err, severity = ?human.severity, "run aborted");
    eprintln!("Error: {}", human.message);
    eprintln!("{}", human.suggestion);
    match human.severity {
        Severity::Transient => eprintln!("This may be temporary; running again can succeed."),
        Severity::ActionRequired => eprintln!("Nothing was processed. Fix the above, then run again."),
        Severity::Permanent => {}
    }
    ExitCode::FAILURE
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)
        .with_context(|| format!("creating archive directory {}", path.display()))
}
