//! Composite health scoring
//!
//! Folds project size, change concentration, coupling, dependency hygiene,
//! security findings, and comment density into a single score on [0, 100].
//! Every deduction is individually capped so one bad dimension cannot zero
//! the score on its own; the final value is floored to an integer and
//! clamped.
//!
//! # Deductions
//!
//! - Large file count (> 200 files): 10
//! - Large line count (> 10,000 LOC): 10
//! - Change hotspots: 3 per file with > 10 commits, capped at 15
//! - High coupling (edges per node > 3.0): 15
//! - Unused dependencies: 2 each, capped at 15
//! - Security findings: 10/critical + 5/high + 2/medium, capped at 30
//! - Sparse comments (comment/code ratio < 0.05): 5

use crate::models::Severity;

const HOTSPOT_COMMIT_THRESHOLD: usize = 10;
const COUPLING_THRESHOLD: f64 = 3.0;
const COMMENT_RATIO_THRESHOLD: f64 = 0.05;

/// Everything the scorer looks at, already aggregated.
#[derive(Debug, Clone, Default)]
pub struct ScoreInputs {
    pub total_files: usize,
    pub total_loc: usize,
    pub code_lines: usize,
    pub comment_lines: usize,
    /// Commit counts for the hotspot list, one entry per hotspot file.
    pub hotspot_commits: Vec<usize>,
    /// Graph edges divided by max(nodes, 1).
    pub coupling_ratio: f64,
    pub unused_packages: usize,
    pub severity_counts: SeverityCounts,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn tally(severities: impl IntoIterator<Item = Severity>) -> Self {
        let mut counts = Self::default();
        for severity in severities {
            match severity {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
            }
        }
        counts
    }
}

/// Compute the health score for `inputs`.
pub fn health_score(inputs: &ScoreInputs) -> u32 {
    let mut score = 100.0f64;

    if inputs.total_files > 200 {
        score -= 10.0;
    }
    if inputs.total_loc > 10_000 {
        score -= 10.0;
    }

    let hot_files = inputs
        .hotspot_commits
        .iter()
        .filter(|&&commits| commits > HOTSPOT_COMMIT_THRESHOLD)
        .count();
    score -= f64::min(3.0 * hot_files as f64, 15.0);

    if inputs.coupling_ratio > COUPLING_THRESHOLD {
        score -= 15.0;
    }

    score -= f64::min(2.0 * inputs.unused_packages as f64, 15.0);

    let counts = inputs.severity_counts;
    let security_deduction =
        10.0 * counts.critical as f64 + 5.0 * counts.high as f64 + 2.0 * counts.medium as f64;
    score -= f64::min(security_deduction, 30.0);

    // Ratio is undefined for a project with no code lines; skip the
    // deduction rather than punish empty projects.
    if inputs.code_lines > 0 {
        let ratio = inputs.comment_lines as f64 / inputs.code_lines as f64;
        if ratio < COMMENT_RATIO_THRESHOLD {
            score -= 5.0;
        }
    }

    score.floor().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy() -> ScoreInputs {
        ScoreInputs {
            total_files: 10,
            total_loc: 500,
            code_lines: 400,
            comment_lines: 50,
            hotspot_commits: vec![2, 3],
            coupling_ratio: 1.0,
            unused_packages: 0,
            severity_counts: SeverityCounts::default(),
        }
    }

    #[test]
    fn test_clean_project_scores_100() {
        assert_eq!(health_score(&healthy()), 100);
    }

    #[test]
    fn test_size_deductions() {
        let mut inputs = healthy();
        inputs.total_files = 201;
        assert_eq!(health_score(&inputs), 90);
        inputs.total_loc = 10_001;
        assert_eq!(health_score(&inputs), 80);
    }

    #[test]
    fn test_hotspot_deduction_capped() {
        let mut inputs = healthy();
        inputs.hotspot_commits = vec![11, 12];
        assert_eq!(health_score(&inputs), 94);
        // Ten hot files would be 30 raw, capped at 15.
        inputs.hotspot_commits = vec![20; 10];
        assert_eq!(health_score(&inputs), 85);
    }

    #[test]
    fn test_hotspot_threshold_is_strict() {
        let mut inputs = healthy();
        inputs.hotspot_commits = vec![10];
        assert_eq!(health_score(&inputs), 100);
    }

    #[test]
    fn test_coupling_deduction() {
        let mut inputs = healthy();
        inputs.coupling_ratio = 3.5;
        assert_eq!(health_score(&inputs), 85);
        inputs.coupling_ratio = 3.0;
        assert_eq!(health_score(&inputs), 100);
    }

    #[test]
    fn test_unused_package_deduction_capped() {
        let mut inputs = healthy();
        inputs.unused_packages = 3;
        assert_eq!(health_score(&inputs), 94);
        inputs.unused_packages = 50;
        assert_eq!(health_score(&inputs), 85);
    }

    #[test]
    fn test_security_deduction_capped() {
        let mut inputs = healthy();
        inputs.severity_counts = SeverityCounts {
            critical: 1,
            high: 2,
            medium: 3,
            low: 100,
        };
        // 10 + 10 + 6 = 26; low findings never deduct.
        assert_eq!(health_score(&inputs), 74);

        inputs.severity_counts.critical = 10;
        assert_eq!(health_score(&inputs), 70);
    }

    #[test]
    fn test_comment_ratio_deduction() {
        let mut inputs = healthy();
        inputs.comment_lines = 10; // ratio 0.025
        assert_eq!(health_score(&inputs), 95);

        // No code lines at all: no deduction.
        inputs.code_lines = 0;
        inputs.comment_lines = 0;
        assert_eq!(health_score(&inputs), 100);
    }

    #[test]
    fn test_score_never_negative() {
        let inputs = ScoreInputs {
            total_files: 500,
            total_loc: 50_000,
            code_lines: 40_000,
            comment_lines: 0,
            hotspot_commits: vec![100; 10],
            coupling_ratio: 9.0,
            unused_packages: 40,
            severity_counts: SeverityCounts {
                critical: 20,
                ..Default::default()
            },
        };
        // 100 - 10 - 10 - 15 - 15 - 15 - 30 - 5 = 0
        assert_eq!(health_score(&inputs), 0);
    }

    #[test]
    fn test_tally() {
        use crate::models::Severity;
        let counts = SeverityCounts::tally(vec![
            Severity::Critical,
            Severity::High,
            Severity::High,
            Severity::Low,
        ]);
        assert_eq!(counts.critical, 1);
        assert_eq!(counts.high, 2);
        assert_eq!(counts.medium, 0);
        assert_eq!(counts.low, 1);
    }
}
