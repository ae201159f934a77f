//! Import specifier extraction
//!
//! Walks a parsed tree in pre-order and collects every statically
//! resolvable import specifier: static imports, re-exports, CommonJS
//! `require("...")`, and dynamic `import("...")`. Calls whose argument is
//! not a string literal are skipped; they cannot be resolved statically.

use tree_sitter::{Node, Tree};

/// A raw specifier found in a file, in tree-traversal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImport {
    pub specifier: String,
    /// 1-based source line of the import site.
    pub line: u32,
}

/// Extract all import specifiers from `tree`, duplicates preserved.
pub fn extract_specifiers(tree: &Tree, source: &str) -> Vec<RawImport> {
    let mut out = Vec::new();
    collect(tree.root_node(), source, &mut out);
    out
}

fn collect(node: Node, source: &str, out: &mut Vec<RawImport>) {
    match node.kind() {
        // import x from "s"; import "s";
        "import_statement" => {
            if let Some(spec) = node
                .child_by_field_name("source")
                .and_then(|s| string_literal(s, source))
            {
                push(node, spec, out);
            }
        }
        // export { x } from "s"; export * from "s";
        "export_statement" => {
            if let Some(spec) = node
                .child_by_field_name("source")
                .and_then(|s| string_literal(s, source))
            {
                push(node, spec, out);
            }
        }
        // require("s") and import("s")
        "call_expression" => {
            if let Some(func) = node.child_by_field_name("function") {
                let is_require =
                    func.kind() == "identifier" && node_text(func, source) == "require";
                let is_dynamic_import = func.kind() == "import";
                if is_require || is_dynamic_import {
                    if let Some(spec) = first_string_argument(node, source) {
                        push(node, spec, out);
                    }
                }
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect(child, source, out);
    }
}

fn push(node: Node, specifier: String, out: &mut Vec<RawImport>) {
    out.push(RawImport {
        specifier,
        line: node.start_position().row as u32 + 1,
    });
}

fn first_string_argument(call: Node, source: &str) -> Option<String> {
    let args = call.child_by_field_name("arguments")?;
    let mut cursor = args.walk();
    let first = args.named_children(&mut cursor).next()?;
    string_literal(first, source)
}

/// The unquoted content of a string-literal node. Template strings and
/// anything else return `None`.
fn string_literal(node: Node, source: &str) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }
    let raw = node_text(node, source);
    Some(raw.trim_matches(|c| c == '"' || c == '\'').to_string())
}

fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{parse_source, SourceKind};

    fn extract(src: &str, kind: SourceKind) -> Vec<String> {
        let tree = parse_source(src, kind).expect("parse");
        extract_specifiers(&tree, src)
            .into_iter()
            .map(|i| i.specifier)
            .collect()
    }

    #[test]
    fn test_static_import() {
        let specs = extract("import { merge } from 'lodash';\n", SourceKind::JavaScript);
        assert_eq!(specs, vec!["lodash"]);
    }

    #[test]
    fn test_reexports() {
        let src = "export { a } from './a';\nexport * from './b';\n";
        assert_eq!(extract(src, SourceKind::TypeScript), vec!["./a", "./b"]);
    }

    #[test]
    fn test_require_and_dynamic_import() {
        let src = "const fs = require('fs');\nconst mod = import('./lazy');\n";
        assert_eq!(extract(src, SourceKind::JavaScript), vec!["fs", "./lazy"]);
    }

    #[test]
    fn test_non_literal_arguments_ignored() {
        let src = "const name = './a';\nrequire(name);\nimport(`./t${x}`);\n";
        assert!(extract(src, SourceKind::JavaScript).is_empty());
    }

    #[test]
    fn test_duplicates_preserved_in_order() {
        let src = "import a from './a';\nimport b from './b';\nimport a2 from './a';\n";
        assert_eq!(
            extract(src, SourceKind::JavaScript),
            vec!["./a", "./b", "./a"]
        );
    }

    #[test]
    fn test_lines_are_one_based() {
        let src = "\n\nimport a from './a';\n";
        let tree = parse_source(src, SourceKind::JavaScript).expect("parse");
        let imports = extract_specifiers(&tree, src);
        assert_eq!(imports[0].line, 3);
    }
}
