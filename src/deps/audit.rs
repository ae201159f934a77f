//! npm audit adapter
//!
//! Runs `npm audit --json` once per analysis and normalizes its output
//! into the common finding shape. Handles both the npm v7+ per-package
//! `vulnerabilities` map and the legacy v6 `advisories` list. Any failure
//! (tool missing, timeout, unparsable output) degrades to zero findings.

use crate::models::{deterministic_finding_id, FindingSource, SecurityFinding, Severity};
use serde_json::Value as JsonValue;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Fixed timeout for the single blocking audit invocation.
pub const AUDIT_TIMEOUT_SECS: u64 = 120;

/// Run the ecosystem vulnerability lookup for `root`.
///
/// Skipped (empty result) when `package.json` or a lockfile is missing,
/// since npm audit requires both.
pub fn run_npm_audit(root: &Path) -> Vec<SecurityFinding> {
    if !root.join("package.json").exists() {
        debug!("No package.json; skipping npm audit");
        return Vec::new();
    }
    if !super::manifest::has_lockfile(root) {
        debug!("No lockfile; skipping npm audit");
        return Vec::new();
    }

    let stdout = match run_audit_command(root) {
        Some(out) => out,
        None => return Vec::new(),
    };

    // npm audit exits non-zero when vulnerabilities exist; only the JSON
    // payload matters.
    let data: JsonValue = match serde_json::from_str(&stdout) {
        Ok(v) => v,
        Err(e) => {
            warn!("Failed to parse npm audit JSON: {}", e);
            return Vec::new();
        }
    };

    let findings = parse_audit_report(&data);
    info!("npm audit produced {} findings", findings.len());
    findings
}

/// Spawn `npm audit --json`, enforcing the fixed timeout by polling.
fn run_audit_command(root: &Path) -> Option<String> {
    let child = Command::new("npm")
        .args(["audit", "--json"])
        .current_dir(root)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn();

    let mut child = match child {
        Ok(c) => c,
        Err(e) => {
            if e.kind() == std::io::ErrorKind::NotFound {
                debug!("npm not installed; skipping audit");
            } else {
                warn!("Failed to run npm audit: {}", e);
            }
            return None;
        }
    };

    let start = Instant::now();
    let timeout = Duration::from_secs(AUDIT_TIMEOUT_SECS);
    loop {
        match child.try_wait() {
            Ok(Some(_status)) => {
                let mut out = String::new();
                if let Some(mut stdout) = child.stdout.take() {
                    let _ = stdout.read_to_string(&mut out);
                }
                return Some(out);
            }
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    warn!("npm audit timed out after {}s", AUDIT_TIMEOUT_SECS);
                    return None;
                }
                std::thread::sleep(Duration::from_millis(100));
            }
            Err(e) => {
                warn!("Failed to wait for npm audit: {}", e);
                return None;
            }
        }
    }
}

/// Normalize either audit report shape into findings.
fn parse_audit_report(data: &JsonValue) -> Vec<SecurityFinding> {
    let mut findings = Vec::new();

    // npm v7+: { "vulnerabilities": { "<pkg>": { severity, range, via: [...] } } }
    if let Some(vulns) = data.get("vulnerabilities").and_then(|v| v.as_object()) {
        for (package, vuln) in vulns {
            let severity = map_severity(vuln.get("severity").and_then(|s| s.as_str()).unwrap_or(""));
            let range = vuln.get("range").and_then(|r| r.as_str()).unwrap_or("*");
            let via = vuln.get("via").and_then(|v| v.as_array()).map(|a| a.as_slice());

            let titles: Vec<&str> = via
                .unwrap_or(&[])
                .iter()
                .filter_map(|v| v.get("title").and_then(|t| t.as_str()))
                .collect();

            if titles.is_empty() {
                findings.push(audit_finding(package, severity, range, None));
            } else {
                for title in titles {
                    findings.push(audit_finding(package, severity, range, Some(title)));
                }
            }
        }
    }
    // npm v6: { "advisories": { "<id>": { module_name, severity, title, vulnerable_versions } } }
    else if let Some(advisories) = data.get("advisories").and_then(|a| a.as_object()) {
        for advisory in advisories.values() {
            let package = advisory
                .get("module_name")
                .and_then(|n| n.as_str())
                .unwrap_or("unknown");
            let severity =
                map_severity(advisory.get("severity").and_then(|s| s.as_str()).unwrap_or(""));
            let range = advisory
                .get("vulnerable_versions")
                .and_then(|v| v.as_str())
                .unwrap_or("*");
            let title = advisory.get("title").and_then(|t| t.as_str());
            findings.push(audit_finding(package, severity, range, title));
        }
    }

    findings
}

fn audit_finding(
    package: &str,
    severity: Severity,
    range: &str,
    title: Option<&str>,
) -> SecurityFinding {
    let name = format!("Vulnerable dependency: {package}");
    let description = match title {
        Some(t) => format!("{t} (vulnerable versions: {range})"),
        None => format!("Known vulnerability in {package} (vulnerable versions: {range})"),
    };
    let id = deterministic_finding_id(&name, package, 0, &description);
    SecurityFinding {
        id,
        name,
        severity,
        description,
        source: FindingSource::DependencyAudit,
        category: "vulnerable-dependency".to_string(),
        file: None,
        line: None,
    }
}

/// Map npm severity strings to ours; npm's "moderate" is our medium.
fn map_severity(npm_severity: &str) -> Severity {
    match npm_severity.to_lowercase().as_str() {
        "critical" => Severity::Critical,
        "high" => Severity::High,
        "moderate" => Severity::Medium,
        _ => Severity::Low,
    }
}
