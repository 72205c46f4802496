//! Lossless syntax node representation
//!
//! Every leaf keeps the whitespace that precedes it (its prefix), so the
//! concatenated leaf texts of a tree reproduce the parsed source exactly.

use std::fmt;

use once_cell::unsync::OnceCell;

use crate::shared::models::Span;

/// Node kinds the converter distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Module,

    // Definitions
    Decorator,
    DecoratedDefinition,
    FunctionDef,
    ClassDef,

    // Compound statements
    IfStmt,
    ElifClause,
    ElseClause,
    WhileStmt,
    ForStmt,
    WithStmt,
    TryStmt,
    ExceptClause,
    FinallyClause,

    // Other
    Block,
    Comment,
    CallExpr,
    EndMarker,

    /// Anonymous token (keyword, operator, punctuation)
    Token,

    /// Any other named node; see [`SyntaxNode::raw_kind`]
    Other,
}

impl SyntaxKind {
    /// Map a tree-sitter kind to a syntax kind
    pub fn from_raw(raw_kind: &str, named: bool) -> Self {
        match raw_kind {
            "module" => SyntaxKind::Module,
            "decorator" => SyntaxKind::Decorator,
            "decorated_definition" => SyntaxKind::DecoratedDefinition,
            "function_definition" => SyntaxKind::FunctionDef,
            "class_definition" => SyntaxKind::ClassDef,
            "if_statement" => SyntaxKind::IfStmt,
            "elif_clause" => SyntaxKind::ElifClause,
            "else_clause" => SyntaxKind::ElseClause,
            "while_statement" => SyntaxKind::WhileStmt,
            "for_statement" => SyntaxKind::ForStmt,
            "with_statement" => SyntaxKind::WithStmt,
            "try_statement" => SyntaxKind::TryStmt,
            "except_clause" | "except_group_clause" => SyntaxKind::ExceptClause,
            "finally_clause" => SyntaxKind::FinallyClause,
            "block" => SyntaxKind::Block,
            "comment" => SyntaxKind::Comment,
            "call" => SyntaxKind::CallExpr,
            _ if named => SyntaxKind::Other,
            _ => SyntaxKind::Token,
        }
    }

    /// Function, class, or a decorated one of those
    pub fn is_definition(&self) -> bool {
        matches!(
            self,
            SyntaxKind::FunctionDef | SyntaxKind::ClassDef | SyntaxKind::DecoratedDefinition
        )
    }
}

#[derive(Debug, Clone)]
enum NodeData {
    Leaf { prefix: String, value: String },
    Composite { children: Vec<SyntaxNode> },
}

/// Syntax node
///
/// Built once by the parser and only read afterwards. The `flag` cell lets
/// analyses memoize a per-node verdict for the lifetime of the tree.
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    kind: SyntaxKind,
    raw_kind: &'static str,
    span: Span,
    data: NodeData,
    flag: OnceCell<bool>,
}

impl SyntaxNode {
    pub fn leaf(
        kind: SyntaxKind,
        raw_kind: &'static str,
        span: Span,
        prefix: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            raw_kind,
            span,
            data: NodeData::Leaf {
                prefix: prefix.into(),
                value: value.into(),
            },
            flag: OnceCell::new(),
        }
    }

    pub fn composite(
        kind: SyntaxKind,
        raw_kind: &'static str,
        span: Span,
        children: Vec<SyntaxNode>,
    ) -> Self {
        Self {
            kind,
            raw_kind,
            span,
            data: NodeData::Composite { children },
            flag: OnceCell::new(),
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// Original tree-sitter kind (`"identifier"`, `":"`, ...)
    pub fn raw_kind(&self) -> &'static str {
        self.raw_kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Children in source order (empty for leaves)
    pub fn children(&self) -> &[SyntaxNode] {
        match &self.data {
            NodeData::Leaf { .. } => &[],
            NodeData::Composite { children } => children,
        }
    }

    /// Token text of a leaf, without its prefix
    pub fn value(&self) -> Option<&str> {
        match &self.data {
            NodeData::Leaf { value, .. } => Some(value),
            NodeData::Composite { .. } => None,
        }
    }

    /// Text preceding the node (the prefix of its first leaf)
    pub fn prefix(&self) -> &str {
        match self.first_leaf().map(|leaf| &leaf.data) {
            Some(NodeData::Leaf { prefix, .. }) => prefix,
            _ => "",
        }
    }

    pub fn first_leaf(&self) -> Option<&SyntaxNode> {
        match &self.data {
            NodeData::Leaf { .. } => Some(self),
            NodeData::Composite { children } => children.iter().find_map(|c| c.first_leaf()),
        }
    }

    /// Append the exact source text of the node (prefixes included)
    pub fn write_text(&self, out: &mut String) {
        match &self.data {
            NodeData::Leaf { prefix, value } => {
                out.push_str(prefix);
                out.push_str(value);
            }
            NodeData::Composite { children } => {
                for child in children {
                    child.write_text(out);
                }
            }
        }
    }

    /// Exact source text of the node, prefixes included
    pub fn original_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    /// Memoized per-node verdict; `compute` runs at most once per node
    pub fn cached_flag(&self, compute: impl FnOnce() -> bool) -> bool {
        *self.flag.get_or_init(compute)
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original_text())
    }
}
