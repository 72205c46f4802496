//! Restricted decorator-expression classifier
//!
//! Before Python 3.9 a decorator had to be a dotted name, optionally called
//! once. Anything else is a relaxed expression that needs rewriting.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::features::parsing::domain::{SyntaxKind, SyntaxNode};

/// `NAME(.NAME)*` optionally followed by one parenthesized argument list on one line
static LEGACY_DECORATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*(\([^\r\n]*?\))?$")
        .expect("legacy decorator pattern is valid")
});

static DOTTED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("dotted name pattern is valid")
});

/// Expression child of a decorator (the node after `@`)
pub fn decorator_expression(decorator: &SyntaxNode) -> Option<&SyntaxNode> {
    let mut children = decorator.children().iter();
    match children.next() {
        Some(at) if at.raw_kind() == "@" => {}
        _ => return None,
    }
    children.next().filter(|expr| expr.kind() != SyntaxKind::Comment)
}

/// Whether a decorator expression is valid under the pre-3.9 grammar
///
/// The check runs on the exact source text, prefix included, so `@ a` or
/// arguments spread over several lines count as relaxed.
pub fn is_legacy_expression(expr: &SyntaxNode) -> bool {
    let text = expr.original_text();
    let Some(captures) = LEGACY_DECORATOR.captures(&text) else {
        return false;
    };
    if captures.get(1).is_none() {
        return true;
    }

    // `a(b)(c)` matches the pattern too; only a single call on a dotted name is legacy
    expr.kind() == SyntaxKind::CallExpr
        && expr
            .children()
            .first()
            .is_some_and(|callee| DOTTED_NAME.is_match(&callee.original_text()))
}

/// Whether a decorator node needs rewriting
///
/// A decorator without an expression counts as relaxed so the walker gets
/// to report the malformed node.
pub fn decorator_needs_rewrite(decorator: &SyntaxNode) -> bool {
    decorator_expression(decorator).map_or(true, |expr| !is_legacy_expression(expr))
}

/// Whether `node` is, or contains, a decorator that needs rewriting
///
/// Memoized on each visited node.
pub fn has_relaxed_decorator(node: &SyntaxNode) -> bool {
    node.cached_flag(|| match node.kind() {
        SyntaxKind::Decorator => decorator_needs_rewrite(node),
        _ => node.children().iter().any(has_relaxed_decorator),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceVersion;
    use crate::features::parsing::{Parser, TreeSitterParser};

    fn first_decorator(source: &str) -> SyntaxNode {
        fn find(node: &SyntaxNode) -> Option<&SyntaxNode> {
            if node.kind() == SyntaxKind::Decorator {
                return Some(node);
            }
            node.children().iter().find_map(find)
        }
        let tree = TreeSitterParser::python()
            .parse(source, SourceVersion::latest())
            .unwrap();
        find(&tree.root).cloned().unwrap()
    }

    fn needs_rewrite(decorator_line: &str) -> bool {
        let source = format!("{decorator_line}\ndef f():\n    pass\n");
        decorator_needs_rewrite(&first_decorator(&source))
    }

    #[test]
    fn test_legacy_forms_pass() {
        assert!(!needs_rewrite("@name"));
        assert!(!needs_rewrite("@module.sub.name"));
        assert!(!needs_rewrite("@module.sub.name(arg1, arg2)"));
        assert!(!needs_rewrite("@a(b(c))"));
        assert!(!needs_rewrite("@property"));
        assert!(!needs_rewrite("@a()"));
    }

    #[test]
    fn test_relaxed_forms_are_flagged() {
        assert!(needs_rewrite("@(a if b else c)"));
        assert!(needs_rewrite("@obj[0]"));
        assert!(needs_rewrite("@a().b"));
        assert!(needs_rewrite("@a(b)(c)"));
        assert!(needs_rewrite("@a(b).c(d)"));
        assert!(needs_rewrite("@buttons[0].clicked.connect"));
    }

    #[test]
    fn test_unusual_formatting_is_flagged() {
        assert!(needs_rewrite("@ name"));
        assert!(needs_rewrite("@a . b"));
        assert!(needs_rewrite("@a(\n    b,\n)"));
    }

    #[test]
    fn test_subtree_flag_propagates() {
        let tree = TreeSitterParser::python()
            .parse(
                "class A:\n    @x[0]\n    def f(self):\n        pass\n\nclass B:\n    pass\n",
                SourceVersion::latest(),
            )
            .unwrap();
        assert!(has_relaxed_decorator(&tree.root));
        let classes: Vec<_> = tree
            .root
            .children()
            .iter()
            .filter(|c| c.kind() == SyntaxKind::ClassDef)
            .collect();
        assert_eq!(classes.len(), 2);
        assert!(has_relaxed_decorator(classes[0]));
        assert!(!has_relaxed_decorator(classes[1]));
    }
}
