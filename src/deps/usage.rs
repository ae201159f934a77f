//! Package usage classification
//!
//! Matches external import specifiers against the declared manifest to
//! produce used/unused sets, the version-prefix "possibly outdated" flag,
//! and ecosystem hygiene suggestions.

use super::manifest::PackageManifest;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Packages expected to be used only by tooling, never imported at
/// runtime. Declared-but-unimported names in this set are not flagged.
pub const BUILD_TIME_PACKAGES: &[&str] = &[
    "typescript",
    "eslint",
    "prettier",
    "ts-node",
    "tsx",
    "jest",
    "mocha",
    "vitest",
    "webpack",
    "vite",
    "rollup",
    "esbuild",
    "turbo",
];

/// Classification of declared packages against observed imports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageClassification {
    pub used: Vec<String>,
    pub unused: Vec<String>,
    /// Declared ranges without a `^`, `~`, or `*` prefix. A heuristic
    /// proxy only; pinned-but-current versions land here too.
    pub outdated: Vec<String>,
    pub suggestions: Vec<String>,
}

/// The manifest-lookup key for a specifier: scope + name for scoped
/// packages, first path segment otherwise.
pub fn bare_package_name(specifier: &str) -> String {
    if specifier.starts_with('@') {
        specifier.splitn(3, '/').take(2).collect::<Vec<_>>().join("/")
    } else {
        specifier.split('/').next().unwrap_or(specifier).to_string()
    }
}

fn is_build_time_only(name: &str) -> bool {
    BUILD_TIME_PACKAGES.contains(&name) || name.starts_with("@types/")
}

fn looks_pinned(range: &str) -> bool {
    !(range.starts_with('^') || range.starts_with('~') || range.starts_with('*'))
}

/// Classify declared packages against every external specifier seen in
/// the project. `external_specifiers` holds raw specifiers (not bare
/// names) across all files; matching short-circuits on the first hit.
pub fn classify_usage(
    manifest: &PackageManifest,
    external_specifiers: &[String],
) -> UsageClassification {
    let mut result = UsageClassification::default();
    let declared = manifest.declared();

    for (&name, &range) in &declared {
        let used = external_specifiers
            .iter()
            .any(|spec| bare_package_name(spec) == name);

        if used {
            result.used.push(name.to_string());
        } else if !is_build_time_only(name) {
            result.unused.push(name.to_string());
        }

        if looks_pinned(range) {
            result.outdated.push(name.to_string());
        }
    }

    // Hygiene gates, fixed order, independent of each other.
    if !declared.contains_key("typescript") {
        result
            .suggestions
            .push("Add typescript for static type checking".to_string());
    }
    if !declared.contains_key("eslint") {
        result
            .suggestions
            .push("Add eslint to catch common bugs and enforce a lint baseline".to_string());
    }
    if !declared.contains_key("prettier") {
        result
            .suggestions
            .push("Add prettier for consistent code formatting".to_string());
    }

    debug!(
        "Package usage: {} used, {} unused, {} flagged outdated",
        result.used.len(),
        result.unused.len(),
        result.outdated.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn manifest(deps: &[(&str, &str)], dev: &[(&str, &str)]) -> PackageManifest {
        let to_map = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>()
        };
        PackageManifest {
            name: None,
            dependencies: to_map(deps),
            dev_dependencies: to_map(dev),
        }
    }

    fn specs(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_bare_package_name() {
        assert_eq!(bare_package_name("@scope/pkg/sub"), "@scope/pkg");
        assert_eq!(bare_package_name("lodash/merge"), "lodash");
        assert_eq!(bare_package_name("left-pad"), "left-pad");
    }

    #[test]
    fn test_used_via_subpath_import() {
        let m = manifest(&[("lodash", "^4.0.0")], &[]);
        let result = classify_usage(&m, &specs(&["lodash/merge"]));
        assert_eq!(result.used, vec!["lodash"]);
        assert!(result.unused.is_empty());
    }

    #[test]
    fn test_build_time_exemption() {
        // eslint declared in both sections and imported nowhere: neither
        // used nor unused. left-pad gets flagged.
        let m = manifest(
            &[("eslint", "^9.0.0"), ("left-pad", "^1.0.0")],
            &[("eslint", "^9.0.0")],
        );
        let result = classify_usage(&m, &[]);
        assert!(!result.used.contains(&"eslint".to_string()));
        assert!(!result.unused.contains(&"eslint".to_string()));
        assert_eq!(result.unused, vec!["left-pad"]);
    }

    #[test]
    fn test_types_packages_exempt() {
        let m = manifest(&[], &[("@types/node", "^20.0.0")]);
        let result = classify_usage(&m, &[]);
        assert!(result.unused.is_empty());
    }

    #[test]
    fn test_used_never_also_unused() {
        let m = manifest(&[("react", "^18.0.0")], &[]);
        let result = classify_usage(&m, &specs(&["react", "react/jsx-runtime"]));
        assert_eq!(result.used, vec!["react"]);
        assert!(result.unused.is_empty());
    }

    #[test]
    fn test_outdated_version_heuristic() {
        let m = manifest(
            &[("pinned", "1.2.3"), ("caret", "^1.2.3"), ("tilde", "~1.2.3"), ("any", "*")],
            &[],
        );
        let result = classify_usage(&m, &[]);
        assert_eq!(result.outdated, vec!["pinned"]);
    }

    #[test]
    fn test_suggestion_gates_fixed_order() {
        let m = manifest(&[], &[("eslint", "^9.0.0")]);
        let result = classify_usage(&m, &[]);
        assert_eq!(result.suggestions.len(), 2);
        assert!(result.suggestions[0].contains("typescript"));
        assert!(result.suggestions[1].contains("prettier"));
    }

    #[test]
    fn test_no_suggestions_when_tooling_present() {
        let m = manifest(
            &[],
            &[
                ("typescript", "^5.0.0"),
                ("eslint", "^9.0.0"),
                ("prettier", "^3.0.0"),
            ],
        );
        assert!(classify_usage(&m, &[]).suggestions.is_empty());
    }

    #[test]
    fn test_scoped_package_usage() {
        let m = manifest(&[("@scope/pkg", "^1.0.0")], &[]);
        let result = classify_usage(&m, &specs(&["@scope/pkg/sub"]));
        assert_eq!(result.used, vec!["@scope/pkg"]);
    }
}
