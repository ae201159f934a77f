//! CLI command definitions and handlers

mod analyze;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// Archscan - Architecture and risk analysis for JS/TS projects
#[derive(Parser, Debug)]
#[command(name = "archscan")]
#[command(
    version,
    about = "Static architecture and dependency-risk analysis for JavaScript and TypeScript projects",
    long_about = "Archscan builds a file-level dependency graph of a JS/TS project, classifies \
declared packages against observed imports, scans for dangerous code patterns and committed \
secrets, and folds everything into a single health score.\n\n\
Run without a subcommand to analyze the current directory:\n  \
archscan .",
    after_help = "\
Examples:
  archscan .                           Analyze current directory
  archscan analyze . --format json     JSON output for scripting
  archscan analyze . -o report.json --format json
  archscan analyze . --no-audit        Skip the npm audit lookup
  archscan config --audit off          Persistently disable npm audit"
)]
pub struct Cli {
    /// Path to project (default: current directory)
    #[arg(global = true, default_value = ".")]
    pub path: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel workers (1-64)
    #[arg(long, global = true, default_value = "8", value_parser = parse_workers)]
    pub workers: usize,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a project and report its architecture and risk profile
    Analyze {
        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Skip the npm audit lookup for this run
        #[arg(long)]
        no_audit: bool,

        /// Skip git hotspot collection for this run
        #[arg(long)]
        no_git: bool,
    },

    /// Show or persistently change archscan settings
    Config {
        /// Enable or disable npm audit by default
        #[arg(long, value_parser = ["on", "off"])]
        audit: Option<String>,

        /// Enable or disable git hotspot collection by default
        #[arg(long, value_parser = ["on", "off"])]
        git: Option<String>,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Analyze {
            format,
            output,
            no_audit,
            no_git,
        }) => analyze::run(
            &cli.path,
            &format,
            output.as_deref(),
            no_audit,
            no_git,
            cli.workers,
        ),

        Some(Commands::Config { audit, git }) => {
            config::run(audit.as_deref(), git.as_deref())
        }

        // Default: analyze with text output to stdout.
        None => analyze::run(&cli.path, "text", None, false, false, cli.workers),
    }
}
