//! JSON reporter
//!
//! Outputs the full AnalysisReport as pretty-printed JSON for machine
//! consumption or piping to jq.

use crate::pipeline::AnalysisReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
