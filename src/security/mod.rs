//! Security pattern engine
//!
//! Two independent sub-scans per file — a structural scan over the syntax
//! tree and a line-based secret scan — plus the merge/ordering policy for
//! presenting findings from all sources together.

mod ast_scan;
mod secrets;

pub use ast_scan::scan_tree;
pub use secrets::scan_secrets;

use crate::models::SecurityFinding;

/// Stably sort findings by severity rank (critical first). Equal
/// severities keep their prior relative order, so per-file discovery
/// order and the code-scan/audit concatenation order survive the sort.
pub fn sort_by_severity(findings: &mut [SecurityFinding]) {
    findings.sort_by_key(|f| f.severity.rank());
}
