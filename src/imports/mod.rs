//! Import extraction and path resolution
//!
//! `extractor` walks a syntax tree and yields raw import specifiers;
//! `resolver` maps relative specifiers onto project files using the fixed
//! probe order. External specifiers never reach the resolver; they feed
//! package-usage classification instead.

mod extractor;
mod resolver;

pub use extractor::{extract_specifiers, RawImport};
pub use resolver::{resolve_relative, ResolverContext};

/// A specifier is relative when it targets the project file tree rather
/// than an installed package: `.`-prefixed paths, or `/`-prefixed paths
/// interpreted against the project root.
pub fn is_relative_specifier(spec: &str) -> bool {
    spec.starts_with('.') || spec.starts_with('/')
}
