//! Parsed tree representation
//!
//! Abstracts the parsed AST for downstream processing.

use thiserror::Error;

use super::syntax_node::SyntaxNode;

/// Parsed syntax tree
#[derive(Debug, Clone)]
pub struct ParsedTree {
    /// Root node of the tree
    pub root: SyntaxNode,

    /// Language
    pub language: &'static str,
}

/// Source rejected by the grammar
///
/// Line and column are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "{}line {line}, column {column}: {message}",
    .file.as_deref().map(|f| format!("{f}: ")).unwrap_or_default()
)]
pub struct ParseError {
    pub message: String,
    pub file: Option<String>,
    pub line: u32,
    pub column: u32,
}

impl ParsedTree {
    pub fn new(root: SyntaxNode, language: &'static str) -> Self {
        Self { root, language }
    }

    /// Exact source text the tree was built from
    pub fn source_text(&self) -> String {
        self.root.original_text()
    }
}

impl ParseError {
    pub fn new(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            message: message.into(),
            file: None,
            line,
            column,
        }
    }

    /// Attach the file name the source came from
    pub fn with_file(mut self, file: Option<&str>) -> Self {
        if let Some(file) = file {
            self.file = Some(file.to_string());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new("invalid syntax", 3, 5);
        assert_eq!(err.to_string(), "line 3, column 5: invalid syntax");

        let err = err.with_file(Some("pkg/mod.py"));
        assert_eq!(err.to_string(), "pkg/mod.py: line 3, column 5: invalid syntax");
    }

    #[test]
    fn test_with_file_none_keeps_existing() {
        let err = ParseError::new("x", 1, 1).with_file(Some("a.py")).with_file(None);
        assert_eq!(err.file.as_deref(), Some("a.py"));
    }
}
