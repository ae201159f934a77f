//! Structural security scan
//!
//! Walks a JS/TS syntax tree against a fixed catalog of dangerous call,
//! assignment, and attribute shapes. Every match produces one finding
//! with its 1-based source line; a file that failed to parse simply never
//! reaches this scan.

use crate::models::{SecurityFinding, Severity};
use tree_sitter::{Node, Tree};

/// Scan `tree` for the fixed set of dangerous shapes.
pub fn scan_tree(path: &str, tree: &Tree, source: &str) -> Vec<SecurityFinding> {
    let mut findings = Vec::new();
    walk(tree.root_node(), source, path, &mut findings);
    findings
}

fn walk(node: Node, source: &str, path: &str, findings: &mut Vec<SecurityFinding>) {
    match node.kind() {
        "call_expression" => check_call(node, source, path, findings),
        "new_expression" => check_new(node, source, path, findings),
        "assignment_expression" => check_assignment(node, source, path, findings),
        "jsx_attribute" => check_jsx_attribute(node, source, path, findings),
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, source, path, findings);
    }
}

fn check_call(node: Node, source: &str, path: &str, findings: &mut Vec<SecurityFinding>) {
    let Some(func) = node.child_by_field_name("function") else {
        return;
    };

    match func.kind() {
        "identifier" => match text(func, source) {
            "eval" => findings.push(finding(
                "eval() call",
                Severity::Critical,
                "Dynamic code evaluation via eval() can execute attacker-controlled input",
                "code-injection",
                path,
                node,
            )),
            "Function" => findings.push(function_constructor_finding(path, node)),
            "exec" | "execSync" => findings.push(exec_finding(path, node)),
            _ => {}
        },
        "member_expression" => {
            let Some(prop) = func.child_by_field_name("property") else {
                return;
            };
            match text(prop, source) {
                "exec" | "execSync" => findings.push(exec_finding(path, node)),
                "write" => {
                    let is_document = func
                        .child_by_field_name("object")
                        .map(|o| o.kind() == "identifier" && text(o, source) == "document")
                        .unwrap_or(false);
                    if is_document {
                        findings.push(finding(
                            "document.write() call",
                            Severity::Medium,
                            "document.write() with dynamic content enables DOM-based XSS",
                            "xss",
                            path,
                            node,
                        ));
                    }
                }
                _ => {}
            }
        }
        _ => {}
    }
}

fn check_new(node: Node, source: &str, path: &str, findings: &mut Vec<SecurityFinding>) {
    let is_function_ctor = node
        .child_by_field_name("constructor")
        .map(|c| c.kind() == "identifier" && text(c, source) == "Function")
        .unwrap_or(false);
    if is_function_ctor {
        findings.push(function_constructor_finding(path, node));
    }
}

fn check_assignment(node: Node, source: &str, path: &str, findings: &mut Vec<SecurityFinding>) {
    let Some(left) = node.child_by_field_name("left") else {
        return;
    };
    if left.kind() != "member_expression" {
        return;
    }
    let is_inner_html = left
        .child_by_field_name("property")
        .map(|p| text(p, source) == "innerHTML")
        .unwrap_or(false);
    if is_inner_html {
        findings.push(finding(
            "innerHTML assignment",
            Severity::Medium,
            "Assigning to innerHTML renders unescaped markup and enables XSS",
            "xss",
            path,
            node,
        ));
    }
}

fn check_jsx_attribute(node: Node, source: &str, path: &str, findings: &mut Vec<SecurityFinding>) {
    let is_dangerous = node
        .child(0)
        .map(|name| text(name, source) == "dangerouslySetInnerHTML")
        .unwrap_or(false);
    if is_dangerous {
        findings.push(finding(
            "dangerouslySetInnerHTML attribute",
            Severity::Medium,
            "dangerouslySetInnerHTML bypasses React's escaping and enables XSS",
            "xss",
            path,
            node,
        ));
    }
}

fn function_constructor_finding(path: &str, node: Node) -> SecurityFinding {
    finding(
        "Function constructor",
        Severity::High,
        "The Function constructor compiles strings to code, equivalent to eval()",
        "code-injection",
        path,
        node,
    )
}

fn exec_finding(path: &str, node: Node) -> SecurityFinding {
    finding(
        "exec() call",
        Severity::High,
        "Shell command execution; command injection risk with dynamic input",
        "command-injection",
        path,
        node,
    )
}

fn finding(
    name: &str,
    severity: Severity,
    description: &str,
    category: &str,
    path: &str,
    node: Node,
) -> SecurityFinding {
    SecurityFinding::code_scan(
        name,
        severity,
        description,
        category,
        path,
        node.start_position().row as u32 + 1,
    )
}

fn text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}
