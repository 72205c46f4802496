//! Tree-sitter parser implementation
//!
//! This is where tree-sitter dependency lives.

use std::borrow::Cow;

use tree_sitter::{Node, Parser as TSParser};

use crate::config::SourceVersion;
use crate::features::parsing::domain::{ParseError, ParsedTree, SyntaxKind, SyntaxNode};
use crate::features::parsing::ports::Parser;
use crate::shared::models::Span;

/// Grammar constructs newer than some supported versions, with the first
/// version that accepts them; `None` marks Python 2 syntax the grammar
/// still recognizes
const VERSION_GATES: &[(&str, &str, Option<SourceVersion>)] = &[
    ("match_statement", "match statement", Some(SourceVersion::Py310)),
    ("except_group_clause", "except* clause", Some(SourceVersion::Py311)),
    ("type_alias_statement", "type alias statement", Some(SourceVersion::Py312)),
    ("type_parameter", "type parameter list", Some(SourceVersion::Py312)),
    ("print_statement", "print statement", None),
    ("exec_statement", "exec statement", None),
];

/// Tree-sitter based parser
pub struct TreeSitterParser {
    language: TreeSitterLanguage,
}

/// Supported tree-sitter languages
#[derive(Debug, Clone, Copy)]
pub enum TreeSitterLanguage {
    Python,
}

impl TreeSitterParser {
    /// Create a Python parser
    pub fn python() -> Self {
        Self {
            language: TreeSitterLanguage::Python,
        }
    }

    /// Get the tree-sitter language
    fn get_ts_language(&self) -> tree_sitter::Language {
        match self.language {
            TreeSitterLanguage::Python => tree_sitter_python::language(),
        }
    }

    /// First ERROR or MISSING node in preorder
    fn first_error<'t>(node: Node<'t>) -> Option<Node<'t>> {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if !node.has_error() {
            return None;
        }
        (0..node.child_count())
            .filter_map(|i| node.child(i))
            .find_map(Self::first_error)
    }

    /// First node in preorder that `version` does not accept, with the reason
    fn first_unsupported<'t>(node: Node<'t>, version: SourceVersion) -> Option<(Node<'t>, String)> {
        let gate = VERSION_GATES
            .iter()
            .find(|(kind, _, _)| *kind == node.kind());
        if let Some((_, construct, since)) = gate {
            match since {
                None => return Some((node, format!("{construct} is Python 2 syntax"))),
                Some(since) if version < *since => {
                    return Some((
                        node,
                        format!("{construct} requires Python {since} or newer, source is {version}"),
                    ));
                }
                Some(_) => {}
            }
        }
        (0..node.named_child_count())
            .filter_map(|i| node.named_child(i))
            .find_map(|child| Self::first_unsupported(child, version))
    }

    fn error_for(node: Node<'_>) -> ParseError {
        let position = node.start_position();
        let message = if node.is_missing() {
            format!("invalid syntax: missing {:?}", node.kind())
        } else {
            "invalid syntax".to_string()
        };
        ParseError::new(
            message,
            position.row as u32 + 1,
            position.column as u32 + 1,
        )
    }
}

fn span_of(node: &Node<'_>) -> Span {
    Span::new(
        node.start_position().row as u32 + 1,
        node.start_position().column as u32,
        node.end_position().row as u32 + 1,
        node.end_position().column as u32,
    )
}

/// Builds a lossless tree by attaching inter-token text to the following leaf
struct LosslessBuilder<'s> {
    source: &'s str,
    offset: usize,
}

impl<'s> LosslessBuilder<'s> {
    fn new(source: &'s str) -> Self {
        Self { source, offset: 0 }
    }

    fn slice(&self, start: usize, end: usize) -> &'s str {
        self.source.get(start..end).unwrap_or("")
    }

    /// Root is always a composite closed by an end marker holding the trailing text
    fn build_root(mut self, root: Node<'_>, end: Span) -> SyntaxNode {
        let mut children = self.build_children(root);
        let span = span_of(&root);

        let rest = self.slice(self.offset, self.source.len());
        children.push(SyntaxNode::leaf(
            SyntaxKind::EndMarker,
            "endmarker",
            end,
            rest,
            "",
        ));

        SyntaxNode::composite(
            SyntaxKind::from_raw(root.kind(), root.is_named()),
            root.kind(),
            span.cover(&end),
            children,
        )
    }

    fn build_children(&mut self, node: Node<'_>) -> Vec<SyntaxNode> {
        (0..node.child_count())
            .filter_map(|i| node.child(i))
            .map(|child| self.build(child))
            .collect()
    }

    fn build(&mut self, node: Node<'_>) -> SyntaxNode {
        let kind = SyntaxKind::from_raw(node.kind(), node.is_named());
        let span = span_of(&node);

        if node.child_count() == 0 {
            let start = node.start_byte().max(self.offset);
            let end = node.end_byte().max(start);
            let prefix = self.slice(self.offset, start);
            let value = self.slice(start, end);
            self.offset = end;
            return SyntaxNode::leaf(kind, node.kind(), span, prefix, value);
        }

        let children = self.build_children(node);
        SyntaxNode::composite(kind, node.kind(), span, children)
    }
}

/// Source with every lone CR turned into LF
///
/// The grammar only breaks lines on LF. Both characters are one byte, so
/// offsets into the copy are offsets into the original.
fn grammar_text(source: &str) -> Cow<'_, str> {
    let bytes = source.as_bytes();
    let lone_cr = |at: usize| bytes[at] == b'\r' && bytes.get(at + 1) != Some(&b'\n');
    if !(0..bytes.len()).any(lone_cr) {
        return Cow::Borrowed(source);
    }
    let normalized = source
        .char_indices()
        .map(|(at, c)| if c == '\r' && lone_cr(at) { '\n' } else { c })
        .collect();
    Cow::Owned(normalized)
}

/// Zero-width span at the end of `source` (LF line breaks)
fn span_of_end(source: &str) -> Span {
    let line = source.matches('\n').count() as u32 + 1;
    let col = source.rsplit('\n').next().map_or(0, str::len) as u32;
    Span::new(line, col, line, col)
}

impl Parser for TreeSitterParser {
    fn parse(&self, source: &str, version: SourceVersion) -> Result<ParsedTree, ParseError> {
        let mut parser = TSParser::new();
        parser
            .set_language(&self.get_ts_language())
            .map_err(|e| ParseError::new(format!("failed to set language: {}", e), 1, 1))?;

        let text = grammar_text(source);
        let tree = parser
            .parse(text.as_ref(), None)
            .ok_or_else(|| ParseError::new("failed to parse source code", 1, 1))?;

        let root_node = tree.root_node();
        if let Some(bad) = Self::first_error(root_node) {
            return Err(Self::error_for(bad));
        }
        if let Some((node, message)) = Self::first_unsupported(root_node, version) {
            let position = node.start_position();
            return Err(ParseError::new(
                message,
                position.row as u32 + 1,
                position.column as u32 + 1,
            ));
        }

        tracing::trace!(
            version = %version,
            statements = root_node.named_child_count(),
            "Parsed source"
        );

        let root = LosslessBuilder::new(source).build_root(root_node, span_of_end(&text));
        Ok(ParsedTree::new(root, self.language_name()))
    }

    /// Every supported version parses; newer syntax is rejected after parsing
    fn supports_version(&self, _version: SourceVersion) -> bool {
        match self.language {
            TreeSitterLanguage::Python => true,
        }
    }

    fn language_name(&self) -> &'static str {
        match self.language {
            TreeSitterLanguage::Python => "python",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Result<ParsedTree, ParseError> {
        TreeSitterParser::python().parse(source, SourceVersion::latest())
    }

    fn find<'a>(node: &'a SyntaxNode, kind: SyntaxKind) -> Option<&'a SyntaxNode> {
        if node.kind() == kind {
            return Some(node);
        }
        node.children().iter().find_map(|c| find(c, kind))
    }

    #[test]
    fn test_parse_python_function() {
        let tree = parse("def hello():\n    pass\n").unwrap();
        assert_eq!(tree.root.kind(), SyntaxKind::Module);
        assert_eq!(tree.language, "python");
        assert!(find(&tree.root, SyntaxKind::FunctionDef).is_some());
        assert!(find(&tree.root, SyntaxKind::Block).is_some());
    }

    #[test]
    fn test_tree_is_lossless() {
        let source = "# header\r\n\r\n@a.b(c)  # trailing\r\nclass Foo(Base):\r\n\tx = 1  \r\n\r\n\r\n";
        let tree = parse(source).unwrap();
        assert_eq!(tree.source_text(), source);
    }

    #[test]
    fn test_empty_and_comment_only_sources() {
        for source in ["", "\n\n", "# only a comment\n"] {
            let tree = parse(source).unwrap();
            assert_eq!(tree.root.kind(), SyntaxKind::Module);
            assert_eq!(tree.source_text(), source);
            let last = tree.root.children().last().unwrap();
            assert_eq!(last.kind(), SyntaxKind::EndMarker);
        }
    }

    #[test]
    fn test_endmarker_carries_trailing_text() {
        let tree = parse("x = 1\n\n  \n").unwrap();
        let last = tree.root.children().last().unwrap();
        assert_eq!(last.kind(), SyntaxKind::EndMarker);
        assert_eq!(last.prefix(), "\n\n  \n");
    }

    #[test]
    fn test_decorator_shape() {
        let tree = parse("@(a if b else c)\ndef f():\n    pass\n").unwrap();
        let decorator = find(&tree.root, SyntaxKind::Decorator).unwrap();
        let children = decorator.children();
        assert_eq!(children[0].raw_kind(), "@");
        assert_eq!(children[1].original_text(), "(a if b else c)");
    }

    #[test]
    fn test_syntax_error_location() {
        let err = parse("def f(:\n    pass\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.file.is_none());
        assert!(err.message.starts_with("invalid syntax"));
    }

    fn parse_as(source: &str, version: SourceVersion) -> Result<ParsedTree, ParseError> {
        TreeSitterParser::python().parse(source, version)
    }

    #[test]
    fn test_lone_cr_breaks_lines() {
        let source = "x = 1\ry = 2\r@a[0]\rdef f():\r    pass\r";
        let tree = parse(source).unwrap();
        assert_eq!(tree.source_text(), source);

        let statements: Vec<_> = tree
            .root
            .children()
            .iter()
            .map(|c| c.kind())
            .collect();
        assert_eq!(
            statements,
            vec![
                SyntaxKind::Other,
                SyntaxKind::Other,
                SyntaxKind::DecoratedDefinition,
                SyntaxKind::EndMarker,
            ]
        );
        let end = tree.root.children().last().unwrap().span();
        assert_eq!(end.start_line, 6);
    }

    #[test]
    fn test_grammar_text_keeps_crlf() {
        assert!(matches!(grammar_text("a\r\nb\n"), Cow::Borrowed(_)));
        assert_eq!(grammar_text("a\rb\r\nc\r"), "a\nb\r\nc\n");
    }

    #[test]
    fn test_match_statement_needs_310() {
        let source = "match x:\n    case 1:\n        pass\n";
        let err = parse_as(source, SourceVersion::Py39).unwrap_err();
        assert_eq!((err.line, err.column), (1, 1));
        assert!(err.message.contains("3.10"));
        assert!(parse_as(source, SourceVersion::Py310).is_ok());
    }

    #[test]
    fn test_except_star_needs_311() {
        let source = "try:\n    pass\nexcept* ValueError:\n    pass\n";
        let err = parse_as(source, SourceVersion::Py310).unwrap_err();
        assert_eq!(err.line, 3);
        assert!(parse_as(source, SourceVersion::Py311).is_ok());
    }

    #[test]
    fn test_type_alias_and_parameters_need_312() {
        for source in ["type X = int\n", "def f[T](x: T) -> T:\n    return x\n"] {
            assert!(parse_as(source, SourceVersion::Py311).is_err(), "{source:?}");
            assert!(parse_as(source, SourceVersion::Py312).is_ok(), "{source:?}");
        }
    }

    #[test]
    fn test_python2_statements_always_rejected() {
        for source in ["print \"hi\"\n", "exec \"x\"\n"] {
            for version in SourceVersion::ALL {
                assert!(parse_as(source, version).is_err(), "{source:?} as {version}");
            }
        }
        assert!(parse_as("print(\"hi\")\n", SourceVersion::Py39).is_ok());
    }

    #[test]
    fn test_supports_all_versions() {
        let parser = TreeSitterParser::python();
        assert!(SourceVersion::ALL.iter().all(|v| parser.supports_version(*v)));
    }
}
