//! Analysis pipeline
//!
//! Orchestrates a full project analysis:
//! 1. Enumerate source files (the only fatal step)
//! 2. Per-file parse, import extraction, security scans, LOC counting,
//!    in parallel across a sized rayon pool
//! 3. Build the file dependency graph from resolved relative imports
//! 4. Classify declared packages against observed external imports
//! 5. Run the optional collaborators (npm audit, git hotspots)
//! 6. Merge findings, score, and assemble the report
//!
//! Per-file results are re-sorted into enumeration order before any
//! aggregation, so the report is reproducible regardless of worker
//! scheduling.

use crate::deps::{classify_usage, load_manifest, run_npm_audit, UsageClassification};
use crate::files;
use crate::githist;
use crate::graph::DependencyGraph;
use crate::imports::{
    extract_specifiers, is_relative_specifier, resolve_relative, RawImport, ResolverContext,
};
use crate::models::{
    FindingsSummary, Hotspot, PerfMetrics, ProjectFile, ProjectStats, SecurityFinding,
};
use crate::parsers::{parse_source, SourceKind};
use crate::scoring::{health_score, ScoreInputs, SeverityCounts};
use crate::security::{scan_secrets, scan_tree, sort_by_severity};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// How many hotspot entries the report carries.
const MAX_HOTSPOTS: usize = 10;

/// Toggles and sizing for one analysis run. Injected by the caller; the
/// pipeline never reads configuration ambiently.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Run the npm audit collaborator.
    pub audit: bool,
    /// Collect git change hotspots.
    pub git: bool,
    /// Worker threads for per-file analysis.
    pub workers: usize,
    /// Show a progress bar on stderr.
    pub progress: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            audit: true,
            git: true,
            workers: 4,
            progress: false,
        }
    }
}

/// The complete result of one analysis run. Everything except
/// `generated_at` is a pure function of the project state.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub project: String,
    pub generated_at: String,
    pub score: u32,
    pub stats: ProjectStats,
    pub hotspots: Vec<Hotspot>,
    pub graph: DependencyGraph,
    pub packages: UsageClassification,
    pub findings: Vec<SecurityFinding>,
    pub findings_summary: FindingsSummary,
    pub performance: PerfMetrics,
}

/// Everything one worker produces for one file.
struct FileOutcome {
    file: ProjectFile,
    imports: Vec<RawImport>,
    structural_findings: Vec<SecurityFinding>,
    secret_findings: Vec<SecurityFinding>,
    parse_failed: bool,
}

/// Run the full analysis for the project at `root`.
pub fn analyze(root: &Path, options: &AnalysisOptions) -> Result<AnalysisReport> {
    let started = Instant::now();
    info!("Analyzing {:?} with {} workers", root, options.workers);

    let files = files::enumerate(root)
        .with_context(|| format!("failed to enumerate project files under {}", root.display()))?;

    let bar = progress_bar(options, files.len());
    bar.set_message("Analyzing files");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.workers)
        .build()
        .context("failed to build worker pool")?;

    let mut outcomes: Vec<(usize, FileOutcome)> = pool.install(|| {
        files
            .par_iter()
            .enumerate()
            .map(|(index, file)| {
                let outcome = analyze_file(root, file);
                bar.inc(1);
                (index, outcome)
            })
            .collect()
    });
    bar.finish_and_clear();

    // Workers may finish in any order; enumeration order is the canonical
    // order for graph truncation and finding concatenation.
    outcomes.sort_by_key(|(index, _)| *index);
    let outcomes: Vec<FileOutcome> = outcomes.into_iter().map(|(_, o)| o).collect();

    let stats = aggregate_stats(&outcomes);
    let parse_failures = outcomes.iter().filter(|o| o.parse_failed).count();

    let (graph, external_specifiers) = build_graph(&outcomes);

    let manifest = load_manifest(root);
    let packages = classify_usage(&manifest, &external_specifiers);

    let mut findings = merge_code_findings(&outcomes);
    if options.audit {
        findings.extend(run_npm_audit(root));
    } else {
        debug!("npm audit disabled");
    }
    sort_by_severity(&mut findings);
    let findings_summary = FindingsSummary::from_findings(&findings);

    let hotspots = if options.git {
        githist::collect_hotspots(root, MAX_HOTSPOTS)
    } else {
        debug!("git hotspot collection disabled");
        Vec::new()
    };

    let score = health_score(&ScoreInputs {
        total_files: stats.total_files,
        total_loc: stats.total_lines,
        code_lines: stats.code_lines,
        comment_lines: stats.comment_lines,
        hotspot_commits: hotspots.iter().map(|h| h.commits).collect(),
        coupling_ratio: graph.coupling_ratio(),
        unused_packages: packages.unused.len(),
        severity_counts: SeverityCounts::tally(findings.iter().map(|f| f.severity)),
    });

    let project = manifest
        .name
        .clone()
        .or_else(|| {
            root.file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "project".to_string());

    let performance = PerfMetrics {
        elapsed_ms: started.elapsed().as_millis() as u64,
        files_analyzed: stats.total_files,
        parse_failures,
    };
    info!(
        "Analysis of {} finished in {}ms: score {}, {} findings",
        project, performance.elapsed_ms, score, findings.len()
    );

    Ok(AnalysisReport {
        project,
        generated_at: chrono::Utc::now().to_rfc3339(),
        score,
        stats,
        hotspots,
        graph,
        packages,
        findings,
        findings_summary,
        performance,
    })
}

/// All per-file work. Unreadable files degrade to an empty outcome; a
/// parse failure still keeps the LOC count and secret scan.
fn analyze_file(root: &Path, file: &ProjectFile) -> FileOutcome {
    let mut outcome = FileOutcome {
        file: file.clone(),
        imports: Vec::new(),
        structural_findings: Vec::new(),
        secret_findings: Vec::new(),
        parse_failed: false,
    };

    let content = match std::fs::read_to_string(root.join(&file.path)) {
        Ok(c) => c,
        Err(e) => {
            debug!("Skipping unreadable file {}: {}", file.path, e);
            outcome.parse_failed = true;
            return outcome;
        }
    };

    outcome.file.loc = files::count_lines(&content);
    outcome.secret_findings = scan_secrets(&file.path, &content);

    // json and other non-code extensions have no grammar; that is not a
    // parse failure.
    if let Some(kind) = SourceKind::from_extension(&file.extension) {
        match parse_source(&content, kind) {
            Some(tree) => {
                outcome.imports = extract_specifiers(&tree, &content);
                outcome.structural_findings = scan_tree(&file.path, &tree, &content);
            }
            None => {
                debug!("Parse failure in {}", file.path);
                outcome.parse_failed = true;
            }
        }
    }

    outcome
}

fn aggregate_stats(outcomes: &[FileOutcome]) -> ProjectStats {
    let mut stats = ProjectStats::default();
    for outcome in outcomes {
        stats.total_files += 1;
        stats.total_lines += outcome.file.loc.total;
        stats.code_lines += outcome.file.loc.code;
        stats.comment_lines += outcome.file.loc.comment;
        stats.blank_lines += outcome.file.loc.blank;
        stats.total_bytes += outcome.file.size;
    }
    stats
}

/// Build the dependency graph and collect external specifiers.
///
/// Nodes are added for every file in enumeration order, edges per file in
/// import order; the graph's own caps drop whatever exceeds them.
/// Unresolvable relative specifiers are dropped; non-relative specifiers
/// feed package classification.
fn build_graph(outcomes: &[FileOutcome]) -> (DependencyGraph, Vec<String>) {
    let mut graph = DependencyGraph::new();
    for outcome in outcomes {
        graph.add_node(&outcome.file.path);
    }

    let ctx = ResolverContext::new(outcomes.iter().map(|o| o.file.path.clone()));
    let mut external = Vec::new();

    for outcome in outcomes {
        let importer_dir = match outcome.file.path.rsplit_once('/') {
            Some((dir, _)) => dir,
            None => "",
        };
        for import in &outcome.imports {
            if is_relative_specifier(&import.specifier) {
                if let Some(target) = resolve_relative(&import.specifier, importer_dir, &ctx) {
                    graph.add_edge(&outcome.file.path, &target);
                } else {
                    debug!(
                        "Unresolved import {} from {}",
                        import.specifier, outcome.file.path
                    );
                }
            } else {
                external.push(import.specifier.clone());
            }
        }
    }

    (graph, external)
}

/// Concatenate code-scan findings: structural scans for every file in
/// enumeration order, then secret scans in the same order. Audit findings
/// are appended after this by the caller.
fn merge_code_findings(outcomes: &[FileOutcome]) -> Vec<SecurityFinding> {
    let mut findings = Vec::new();
    for outcome in outcomes {
        findings.extend(outcome.structural_findings.iter().cloned());
    }
    for outcome in outcomes {
        findings.extend(outcome.secret_findings.iter().cloned());
    }
    findings
}

fn progress_bar(options: &AnalysisOptions, len: usize) -> ProgressBar {
    if !options.progress {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create dirs");
        }
        fs::write(path, content).expect("write file");
    }

    fn quiet_options() -> AnalysisOptions {
        AnalysisOptions {
            audit: false,
            git: false,
            workers: 2,
            progress: false,
        }
    }

    #[test]
    fn test_analyze_builds_graph_and_classifies_packages() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            dir.path(),
            "package.json",
            r#"{ "name": "demo", "dependencies": { "lodash": "^4.0.0", "left-pad": "^1.0.0" } }"#,
        );
        write(
            dir.path(),
            "src/index.ts",
            "import { merge } from 'lodash';\nimport { helper } from './util';\nhelper(merge);\n",
        );
        write(dir.path(), "src/util.ts", "export function helper(x) { return x; }\n");

        let report = analyze(dir.path(), &quiet_options()).expect("analyze");

        assert_eq!(report.project, "demo");
        assert_eq!(report.stats.total_files, 3);
        assert!(report.graph.nodes().contains(&"src/index.ts"));
        assert!(report
            .graph
            .edges()
            .contains(&("src/index.ts", "src/util.ts")));
        assert_eq!(report.packages.used, vec!["lodash"]);
        assert_eq!(report.packages.unused, vec!["left-pad"]);
        assert!(report.score <= 100);
    }

    #[test]
    fn test_analyze_collects_findings_sorted_by_severity() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            dir.path(),
            "src/app.js",
            "el.innerHTML = input;\nconst r = eval(input);\n",
        );
        write(
            dir.path(),
            "src/cfg.js",
            "const apiKey = 'abcd1234efgh5678ijkl';\n",
        );

        let report = analyze(dir.path(), &quiet_options()).expect("analyze");

        assert_eq!(report.findings.len(), 3);
        // eval (critical) first, then the two high/medium.
        assert_eq!(report.findings[0].name, "eval() call");
        assert_eq!(report.findings_summary.critical, 1);
        assert_eq!(report.findings_summary.total, 3);
    }

    #[test]
    fn test_analyze_missing_root_is_fatal() {
        let result = analyze(Path::new("/nonexistent/project"), &quiet_options());
        assert!(result.is_err());
    }

    #[test]
    fn test_unparsable_file_degrades_to_loc_and_secrets() {
        let dir = tempfile::tempdir().expect("tempdir");
        // Valid json, no grammar: counted but never a parse failure.
        write(dir.path(), "data.json", "{ \"a\": 1 }\n");
        write(dir.path(), "ok.js", "const x = 1;\n");

        let report = analyze(dir.path(), &quiet_options()).expect("analyze");
        assert_eq!(report.stats.total_files, 2);
        assert_eq!(report.performance.parse_failures, 0);
    }

    #[test]
    fn test_empty_project() {
        let dir = tempfile::tempdir().expect("tempdir");
        let report = analyze(dir.path(), &quiet_options()).expect("analyze");
        assert_eq!(report.stats.total_files, 0);
        assert_eq!(report.score, 100);
        assert!(report.findings.is_empty());
    }
}
