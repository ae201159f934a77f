//! package.json loading
//!
//! A missing or unparsable manifest is a collaborator-unavailable
//! condition: the classifier simply sees an empty manifest and the run
//! continues.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Declared dependency ranges from package.json. Maps are BTreeMaps so
/// every downstream iteration is in stable name order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    /// All declared names with their ranges; `dependencies` wins when a
    /// name appears in both sections.
    pub fn declared(&self) -> BTreeMap<&str, &str> {
        let mut merged: BTreeMap<&str, &str> = BTreeMap::new();
        for (name, range) in &self.dev_dependencies {
            merged.insert(name, range);
        }
        for (name, range) in &self.dependencies {
            merged.insert(name, range);
        }
        merged
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.dev_dependencies.is_empty()
    }
}

/// Load `package.json` from the project root; empty manifest on any failure.
pub fn load_manifest(root: &Path) -> PackageManifest {
    let path = root.join("package.json");
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            debug!("No readable package.json at {:?}: {}", path, e);
            return PackageManifest::default();
        }
    };
    match serde_json::from_str(&content) {
        Ok(manifest) => manifest,
        Err(e) => {
            debug!("Failed to parse package.json: {}", e);
            PackageManifest::default()
        }
    }
}

/// Whether any supported lockfile is present (npm audit prerequisite).
pub fn has_lockfile(root: &Path) -> bool {
    root.join("package-lock.json").exists()
        || root.join("yarn.lock").exists()
        || root.join("pnpm-lock.yaml").exists()
        || root.join("bun.lockb").exists()
}
