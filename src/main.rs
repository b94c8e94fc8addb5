//! gitscope - read-only developer context reports over a git checkout
//!
//! Six tools, one report each: repository status, recent activity,
//! time-windowed work summary, structural code map, risk/churn scan,
//! and text search. Every tool resolves a repo path, runs bounded git
//! queries, aggregates, and prints a deterministic text report.

mod activity;
mod churn;
mod config;
mod git_ops;
mod map;
mod risk;
mod scan;
mod search;
mod status;
mod summary;
#[cfg(test)]
mod testutil;
mod util;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gitscope",
    about = "Read-only developer context reports over a git checkout",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Technical snapshot of the repo: branch, dirty state, sync, changes
    Status {
        /// Path to the repository (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Hot files and latest commits from recent history
    Activity {
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Number of commits to analyze
        #[arg(short, long, default_value_t = 20)]
        n: usize,
    },
    /// Development progress and technical debt over a time window
    Summary {
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Time window, e.g. "24h", "7d", "2w", or any git-understood date
        #[arg(long, default_value = "7d")]
        since: String,
    },
    /// Directory tree with entry-point and config markers
    Map {
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Max number of files/folders to display
        #[arg(long, default_value_t = 25)]
        top: usize,
    },
    /// Hotspots (large files that change often) and test coverage gaps
    Risk {
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Search tracked content, with surrounding context lines
    Search {
        /// The text to search for
        query: String,
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Optional filter, e.g. "*.py" or "src/*.js"
        #[arg(long, default_value = "")]
        pattern: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("GITSCOPE_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Tool entry points never fail: path errors come back as the report.
    let report = match args.command {
        Command::Status { path } => status::report(&path),
        Command::Activity { path, n } => activity::report(&path, n),
        Command::Summary { path, since } => summary::report(&path, &since),
        Command::Map { path, top } => map::report(&path, top),
        Command::Risk { path } => risk::report(&path),
        Command::Search {
            path,
            query,
            pattern,
        } => search::report(&path, &query, &pattern),
    };

    println!("{}", report);
    Ok(())
}
