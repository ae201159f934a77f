//! `archscan analyze` handler (also the bare-invocation default)

use crate::config::Settings;
use crate::pipeline::{self, AnalysisOptions};
use crate::reporters::{self, OutputFormat};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

pub fn run(
    path: &Path,
    format: &str,
    output: Option<&Path>,
    no_audit: bool,
    no_git: bool,
    workers: usize,
) -> Result<()> {
    let settings = Settings::load()?;
    let format: OutputFormat = format.parse()?;

    // CLI flags can only disable, never re-enable, persisted settings.
    let options = AnalysisOptions {
        audit: settings.audit && !no_audit,
        git: settings.git && !no_git,
        workers,
        progress: output.is_none() && console::user_attended(),
    };
    debug!("Analysis options: {:?}", options);

    let report = pipeline::analyze(path, &options)?;
    let rendered = reporters::render(&report, format)?;

    match output {
        Some(file) => {
            std::fs::write(file, &rendered)
                .with_context(|| format!("failed to write report to {}", file.display()))?;
            eprintln!("Report written to {}", file.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
