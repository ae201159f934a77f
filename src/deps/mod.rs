//! Declared-dependency analysis
//!
//! Loads the project manifest, classifies declared packages against
//! observed imports, and adapts the npm vulnerability audit into the
//! common finding shape.

mod audit;
mod manifest;
mod usage;

pub use audit::{run_npm_audit, AUDIT_TIMEOUT_SECS};
pub use manifest::{has_lockfile, load_manifest, PackageManifest};
pub use usage::{bare_package_name, classify_usage, UsageClassification, BUILD_TIME_PACKAGES};
