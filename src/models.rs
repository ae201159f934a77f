//! Core data models for archscan
//!
//! Shared types for project files, security findings, and the final
//! analysis report.

use serde::{Deserialize, Serialize};

/// Generate a deterministic finding ID based on content hash.
///
/// Findings keep stable IDs across runs, which keeps repeated analyses of
/// an unchanged project bit-identical (except the report timestamp) and
/// makes findings trackable over time.
///
/// The ID is a 16-character hex string derived from hashing the finding
/// name, file path, line number, and description.
pub fn deterministic_finding_id(name: &str, file: &str, line: u32, description: &str) -> String {
    let input = format!("{name}\n{file}\n{line}\n{description}");
    let digest = md5::compute(input.as_bytes());
    format!("{:x}", digest)[..16].to_string()
}

/// Severity levels for findings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Presentation rank: critical sorts before high, high before medium,
    /// medium before low.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::High => 1,
            Severity::Medium => 2,
            Severity::Low => 3,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Where a security finding came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingSource {
    /// Produced by the package ecosystem vulnerability lookup (npm audit)
    DependencyAudit,
    /// Produced by scanning the project's own source code
    CodeScan,
}

/// A security issue found in the project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityFinding {
    pub id: String,
    pub name: String,
    pub severity: Severity,
    pub description: String,
    pub source: FindingSource,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl SecurityFinding {
    /// Build a code-scan finding tied to a file location.
    pub fn code_scan(
        name: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
        category: impl Into<String>,
        file: impl Into<String>,
        line: u32,
    ) -> Self {
        let name = name.into();
        let description = description.into();
        let file = file.into();
        let id = deterministic_finding_id(&name, &file, line, &description);
        Self {
            id,
            name,
            severity,
            description,
            source: FindingSource::CodeScan,
            category: category.into(),
            file: Some(file),
            line: Some(line),
        }
    }
}

/// Summary of findings by severity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindingsSummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

impl FindingsSummary {
    pub fn from_findings(findings: &[SecurityFinding]) -> Self {
        let mut summary = Self::default();
        for f in findings {
            match f.severity {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
            }
            summary.total += 1;
        }
        summary
    }
}

/// Per-file line statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocStats {
    pub total: usize,
    pub code: usize,
    pub comment: usize,
    pub blank: usize,
}

/// A file discovered during project enumeration.
///
/// Identity is the normalized relative path (forward slashes). Immutable
/// once produced by enumeration; `loc` is filled in by per-file analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    pub path: String,
    pub size: u64,
    pub extension: String,
    #[serde(default)]
    pub loc: LocStats,
}

/// Aggregate statistics over all enumerated files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectStats {
    pub total_files: usize,
    pub total_lines: usize,
    pub code_lines: usize,
    pub comment_lines: usize,
    pub blank_lines: usize,
    pub total_bytes: u64,
}

/// A file with a high historical commit-touch count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotspot {
    pub path: String,
    pub commits: usize,
}

/// Timing information for a completed analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerfMetrics {
    pub elapsed_ms: u64,
    pub files_analyzed: usize,
    pub parse_failures: usize,
}
