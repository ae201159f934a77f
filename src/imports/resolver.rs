//! Relative specifier resolution
//!
//! Maps a relative specifier onto a project file by probing a fixed
//! candidate order. Resolution stops at the first hit; when both `a.ts`
//! and `a/index.ts` exist, `./a` resolves to `a.ts`.

use rustc_hash::FxHashSet;

/// Extension probes, tried in priority order after the exact path.
const EXTENSION_PROBES: &[&str] = &[".ts", ".tsx", ".js", ".jsx"];

/// Index-file probes, tried after the extension probes.
const INDEX_PROBES: &[&str] = &["/index.ts", "/index.tsx", "/index.js", "/index.jsx"];

/// The normalized project file set a resolver works against.
pub struct ResolverContext {
    files: FxHashSet<String>,
}

impl ResolverContext {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: paths.into_iter().map(Into::into).collect(),
        }
    }

    fn contains(&self, candidate: &str) -> bool {
        self.files.contains(candidate)
    }
}

/// Resolve `specifier` from the file living in `importer_dir`.
///
/// `importer_dir` is the importing file's directory relative to the
/// project root (empty string for root-level files). Absolute specifiers
/// (leading `/`) resolve against the project root, not the OS root.
/// Returns the resolved project path, or `None` when no probe matches.
pub fn resolve_relative(
    specifier: &str,
    importer_dir: &str,
    ctx: &ResolverContext,
) -> Option<String> {
    let joined = if let Some(rooted) = specifier.strip_prefix('/') {
        normalize_segments(rooted)
    } else {
        let base = if importer_dir.is_empty() {
            specifier.to_string()
        } else {
            format!("{importer_dir}/{specifier}")
        };
        normalize_segments(&base)
    };

    // Exact path first, then extension probes, then index probes. Each
    // candidate also gets a `.js`-rewritten-to-`.ts` variant for TS
    // projects that import compiled-style `.js` paths.
    if let Some(hit) = probe(&joined, ctx) {
        return Some(hit);
    }
    for ext in EXTENSION_PROBES {
        if let Some(hit) = probe(&format!("{joined}{ext}"), ctx) {
            return Some(hit);
        }
    }
    for index in INDEX_PROBES {
        if let Some(hit) = probe(&format!("{joined}{index}"), ctx) {
            return Some(hit);
        }
    }
    None
}

fn probe(candidate: &str, ctx: &ResolverContext) -> Option<String> {
    if ctx.contains(candidate) {
        return Some(candidate.to_string());
    }
    if let Some(stem) = candidate.strip_suffix(".js") {
        let ts_variant = format!("{stem}.ts");
        if ctx.contains(&ts_variant) {
            return Some(ts_variant);
        }
    }
    None
}

/// Collapse `.` and `..` segments and unify separators. `..` at the top
/// of the path is dropped; a specifier cannot escape the project root.
fn normalize_segments(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    let unified = path.replace('\\', "/");
    for seg in unified.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts.join("/")
}
