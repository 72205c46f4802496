//! Suite-bearing constructs and their emission plans
//!
//! A plan splits a compound statement into the parts the walker emits in
//! order: header material as written, the indented suite, and trailing
//! clauses that carry suites of their own.

use crate::errors::InternalError;
use crate::features::parsing::domain::{SyntaxKind, SyntaxNode};

/// Compound statements whose suites may hold decorated definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstructKind {
    Function,
    Class,
    If,
    While,
    For,
    With,
    Try,
}

/// One step of an emission plan
#[derive(Debug, Clone, Copy)]
pub enum Part<'a> {
    /// Emitted as written
    Verbatim(&'a SyntaxNode),
    /// Indented block
    Suite(&'a SyntaxNode),
    /// `elif` / `else` / `except` / `finally` clause, planned with [`clause_plan`]
    Clause(&'a SyntaxNode),
}

impl ConstructKind {
    pub fn from_syntax(kind: SyntaxKind) -> Option<Self> {
        match kind {
            SyntaxKind::FunctionDef => Some(ConstructKind::Function),
            SyntaxKind::ClassDef => Some(ConstructKind::Class),
            SyntaxKind::IfStmt => Some(ConstructKind::If),
            SyntaxKind::WhileStmt => Some(ConstructKind::While),
            SyntaxKind::ForStmt => Some(ConstructKind::For),
            SyntaxKind::WithStmt => Some(ConstructKind::With),
            SyntaxKind::TryStmt => Some(ConstructKind::Try),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConstructKind::Function => "function definition",
            ConstructKind::Class => "class definition",
            ConstructKind::If => "if statement",
            ConstructKind::While => "while statement",
            ConstructKind::For => "for statement",
            ConstructKind::With => "with statement",
            ConstructKind::Try => "try statement",
        }
    }

    fn keyword(&self) -> &'static str {
        match self {
            ConstructKind::Function => "def",
            ConstructKind::Class => "class",
            ConstructKind::If => "if",
            ConstructKind::While => "while",
            ConstructKind::For => "for",
            ConstructKind::With => "with",
            ConstructKind::Try => "try",
        }
    }

    fn allows_async(&self) -> bool {
        matches!(
            self,
            ConstructKind::Function | ConstructKind::For | ConstructKind::With
        )
    }

    fn allows_clause(&self, kind: SyntaxKind) -> bool {
        match self {
            ConstructKind::If => matches!(kind, SyntaxKind::ElifClause | SyntaxKind::ElseClause),
            ConstructKind::While | ConstructKind::For => kind == SyntaxKind::ElseClause,
            ConstructKind::Try => matches!(
                kind,
                SyntaxKind::ExceptClause | SyntaxKind::ElseClause | SyntaxKind::FinallyClause
            ),
            ConstructKind::Function | ConstructKind::Class | ConstructKind::With => false,
        }
    }
}

fn clause_name(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::ElifClause => "elif clause",
        SyntaxKind::ElseClause => "else clause",
        SyntaxKind::ExceptClause => "except clause",
        SyntaxKind::FinallyClause => "finally clause",
        _ => "clause",
    }
}

/// Position a clause may take: `elif`/`except` first, then `else`, then `finally`
fn clause_rank(kind: SyntaxKind) -> u8 {
    match kind {
        SyntaxKind::ElseClause => 1,
        SyntaxKind::FinallyClause => 2,
        _ => 0,
    }
}

fn describe(node: &SyntaxNode) -> String {
    format!("`{}`", node.raw_kind())
}

/// Plan the header and suite shared by constructs and clauses
///
/// Returns the parts up to and including the suite, and the index of the
/// first child after it.
fn header_and_suite<'a>(
    construct: &'static str,
    keywords: &[&str],
    allows_async: bool,
    node: &'a SyntaxNode,
) -> Result<(Vec<Part<'a>>, usize), InternalError> {
    let children = node.children();

    let mut at = 0;
    if allows_async && children.first().is_some_and(|c| c.raw_kind() == "async") {
        at = 1;
    }
    match children.get(at) {
        Some(keyword) if keywords.contains(&keyword.raw_kind()) => {}
        Some(other) => {
            return Err(InternalError::structure(
                construct,
                "leading keyword",
                describe(other),
                node.span(),
            ))
        }
        None => {
            return Err(InternalError::structure(
                construct,
                "leading keyword",
                "no children",
                node.span(),
            ))
        }
    }

    let block_at = children
        .iter()
        .position(|c| c.kind() == SyntaxKind::Block)
        .ok_or_else(|| {
            InternalError::structure(construct, "an indented block", "none", node.span())
        })?;

    let colon = children[..block_at]
        .iter()
        .rev()
        .find(|c| c.kind() != SyntaxKind::Comment);
    match colon {
        Some(c) if c.raw_kind() == ":" => {}
        Some(other) => {
            return Err(InternalError::structure(
                construct,
                "`:` before the block",
                describe(other),
                node.span(),
            ))
        }
        None => {
            return Err(InternalError::structure(
                construct,
                "`:` before the block",
                "nothing",
                node.span(),
            ))
        }
    }

    let mut parts: Vec<Part<'a>> = children[..block_at].iter().map(Part::Verbatim).collect();
    parts.push(Part::Suite(&children[block_at]));
    Ok((parts, block_at + 1))
}

/// Emission plan for a compound statement
pub fn plan(kind: ConstructKind, node: &SyntaxNode) -> Result<Vec<Part<'_>>, InternalError> {
    let construct = kind.name();
    let (mut parts, rest) = header_and_suite(construct, &[kind.keyword()], kind.allows_async(), node)?;

    let mut rank = 0;
    let mut seen_else = false;
    let mut seen_finally = false;
    let mut handlers = 0;

    for child in &node.children()[rest..] {
        let child_kind = child.kind();
        if child_kind == SyntaxKind::Comment {
            parts.push(Part::Verbatim(child));
            continue;
        }
        if !kind.allows_clause(child_kind) {
            return Err(InternalError::structure(
                construct,
                "a clause or comment after the block",
                describe(child),
                child.span(),
            ));
        }

        let child_rank = clause_rank(child_kind);
        let repeated = (child_kind == SyntaxKind::ElseClause && seen_else)
            || (child_kind == SyntaxKind::FinallyClause && seen_finally);
        if child_rank < rank || repeated {
            return Err(InternalError::structure(
                construct,
                "clauses in order",
                format!("misplaced {}", clause_name(child_kind)),
                child.span(),
            ));
        }
        rank = child_rank;
        match child_kind {
            SyntaxKind::ElseClause => seen_else = true,
            SyntaxKind::FinallyClause => seen_finally = true,
            SyntaxKind::ExceptClause => handlers += 1,
            _ => {}
        }
        parts.push(Part::Clause(child));
    }

    if kind == ConstructKind::Try {
        if !seen_finally && handlers == 0 {
            return Err(InternalError::structure(
                construct,
                "an except or finally clause",
                "none",
                node.span(),
            ));
        }
        if seen_else && handlers == 0 {
            return Err(InternalError::structure(
                construct,
                "an except clause before else",
                "none",
                node.span(),
            ));
        }
    }

    Ok(parts)
}

/// Emission plan for an `elif` / `else` / `except` / `finally` clause
pub fn clause_plan(clause: &SyntaxNode) -> Result<Vec<Part<'_>>, InternalError> {
    let kind = clause.kind();
    let keywords: &[&str] = match kind {
        SyntaxKind::ElifClause => &["elif"],
        SyntaxKind::ElseClause => &["else"],
        SyntaxKind::ExceptClause => &["except", "except*"],
        SyntaxKind::FinallyClause => &["finally"],
        _ => {
            return Err(InternalError::structure(
                "clause",
                "elif, else, except or finally",
                describe(clause),
                clause.span(),
            ))
        }
    };
    let construct = clause_name(kind);
    let (mut parts, rest) = header_and_suite(construct, keywords, false, clause)?;

    for child in &clause.children()[rest..] {
        if child.kind() != SyntaxKind::Comment {
            return Err(InternalError::structure(
                construct,
                "only comments after the block",
                describe(child),
                child.span(),
            ));
        }
        parts.push(Part::Verbatim(child));
    }
    Ok(parts)
}
