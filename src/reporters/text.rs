//! Text (terminal) reporter with colors and formatting

use crate::models::Severity;
use crate::pipeline::AnalysisReport;
use anyhow::Result;

/// Score colors (ANSI escape codes)
fn score_color(score: u32) -> &'static str {
    match score {
        90..=100 => "\x1b[32m", // Green
        75..=89 => "\x1b[92m",  // Light green
        50..=74 => "\x1b[33m",  // Yellow
        25..=49 => "\x1b[91m",  // Light red
        _ => "\x1b[31m",        // Red
    }
}

/// Severity colors
fn severity_color(severity: &Severity) -> &'static str {
    match severity {
        Severity::Critical => "\x1b[31m", // Red
        Severity::High => "\x1b[91m",     // Light red
        Severity::Medium => "\x1b[33m",   // Yellow
        Severity::Low => "\x1b[34m",      // Blue
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Severity tag
fn severity_tag(severity: &Severity) -> &'static str {
    match severity {
        Severity::Critical => "[C]",
        Severity::High => "[H]",
        Severity::Medium => "[M]",
        Severity::Low => "[L]",
    }
}

/// Render report as formatted terminal output
pub fn render(report: &AnalysisReport) -> Result<String> {
    let mut out = String::new();

    // Header
    let score_c = score_color(report.score);
    out.push_str(&format!("\n{BOLD}Archscan Analysis: {}{RESET}\n", report.project));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Health: {score_c}{BOLD}{}/100{RESET}  ",
        report.score
    ));
    out.push_str(&format!(
        "Files: {}  LOC: {}  Graph: {} nodes / {} edges\n\n",
        report.stats.total_files,
        report.stats.total_lines,
        report.graph.node_count(),
        report.graph.edge_count()
    ));

    // Findings
    let fs = &report.findings_summary;
    out.push_str(&format!("{BOLD}FINDINGS{RESET} ({} total)\n", fs.total));
    let mut summary_parts = Vec::new();
    if fs.critical > 0 {
        summary_parts.push(format!("\x1b[31m{} critical{RESET}", fs.critical));
    }
    if fs.high > 0 {
        summary_parts.push(format!("\x1b[91m{} high{RESET}", fs.high));
    }
    if fs.medium > 0 {
        summary_parts.push(format!("\x1b[33m{} medium{RESET}", fs.medium));
    }
    if fs.low > 0 {
        summary_parts.push(format!("\x1b[34m{} low{RESET}", fs.low));
    }
    if !summary_parts.is_empty() {
        out.push_str(&format!("  {}\n", summary_parts.join("  ")));
    }
    for finding in &report.findings {
        let color = severity_color(&finding.severity);
        let location = match (&finding.file, finding.line) {
            (Some(file), Some(line)) => format!("{file}:{line}"),
            (Some(file), None) => file.clone(),
            _ => "(project)".to_string(),
        };
        out.push_str(&format!(
            "  {color}{}{RESET} {} {DIM}{location}{RESET}\n",
            severity_tag(&finding.severity),
            finding.name
        ));
    }
    out.push('\n');

    // Packages
    let pkgs = &report.packages;
    out.push_str(&format!("{BOLD}PACKAGES{RESET}\n"));
    out.push_str(&format!(
        "  used: {}  unused: {}  possibly outdated: {}\n",
        pkgs.used.len(),
        pkgs.unused.len(),
        pkgs.outdated.len()
    ));
    for unused in &pkgs.unused {
        out.push_str(&format!("  \x1b[33munused{RESET} {unused}\n"));
    }
    for suggestion in &pkgs.suggestions {
        out.push_str(&format!("  {DIM}hint{RESET} {suggestion}\n"));
    }
    out.push('\n');

    // Hotspots
    if !report.hotspots.is_empty() {
        out.push_str(&format!("{BOLD}HOTSPOTS{RESET}\n"));
        for hotspot in &report.hotspots {
            out.push_str(&format!(
                "  {:>4} commits  {}\n",
                hotspot.commits, hotspot.path
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "{DIM}Analyzed {} files in {}ms ({} parse failures){RESET}\n",
        report.performance.files_analyzed,
        report.performance.elapsed_ms,
        report.performance.parse_failures
    ));

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_text_render_contains_sections() {
        let report = test_report();
        let out = render(&report).expect("render");
        assert!(out.contains("Archscan Analysis: demo"));
        assert!(out.contains("85/100"));
        assert!(out.contains("FINDINGS"));
        assert!(out.contains("eval() call"));
        assert!(out.contains("src/index.ts:3"));
        assert!(out.contains("PACKAGES"));
    }

    #[test]
    fn test_text_render_omits_empty_hotspots() {
        let report = test_report();
        let out = render(&report).expect("render");
        assert!(!out.contains("HOTSPOTS"));
    }
}
