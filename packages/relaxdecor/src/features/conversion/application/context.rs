//! Conversion context: walks one (sub)tree and renders its converted text
//!
//! A context owns the text emitted so far, split at the first child that
//! holds a relaxed decorator. Everything before that child is the prefix,
//! the rest is the suffix, and the helper function goes between the two.
//! Flagged suites get their own nested context one level deeper, so every
//! indented body that rewrites something carries its own helper.

use tracing::debug;

use crate::config::ConversionConfig;
use crate::errors::{InternalError, Result};
use crate::features::conversion::domain::{
    clause_plan, decorator_expression, has_relaxed_decorator, plan, ConstructKind, Part,
};
use crate::features::parsing::domain::{SyntaxKind, SyntaxNode};

use super::reassembler::{reassemble, Insertion};

/// Text emitted so far, before and after the split point
#[derive(Debug, Default)]
struct Accumulator {
    prefix: String,
    suffix: String,
    in_suffix: bool,
}

impl Accumulator {
    fn target(&mut self) -> &mut String {
        if self.in_suffix {
            &mut self.suffix
        } else {
            &mut self.prefix
        }
    }

    fn push(&mut self, text: &str) {
        self.target().push_str(text);
    }

    fn push_node(&mut self, node: &SyntaxNode) {
        node.write_text(self.target());
    }
}

/// Per-(sub)tree conversion state
pub struct ConversionContext<'t, 'c> {
    root: &'t SyntaxNode,
    config: &'c ConversionConfig,
    depth: usize,
    /// Output is spliced into an enclosing context
    raw: bool,
    acc: Accumulator,
    node_before_expr: Option<&'t SyntaxNode>,
}

impl<'t, 'c> ConversionContext<'t, 'c> {
    /// Context for a whole module
    pub fn new(root: &'t SyntaxNode, config: &'c ConversionConfig) -> Self {
        Self {
            root,
            config,
            depth: 0,
            raw: false,
            acc: Accumulator::default(),
            node_before_expr: None,
        }
    }

    fn nested(root: &'t SyntaxNode, config: &'c ConversionConfig, depth: usize) -> Self {
        Self {
            root,
            config,
            depth,
            raw: true,
            acc: Accumulator::default(),
            node_before_expr: None,
        }
    }

    /// Convert the tree and return the final text
    ///
    /// Nested contexts return their text without leading whitespace; the
    /// parent has already written the line break and indentation.
    pub fn render(mut self) -> Result<String> {
        self.walk()?;
        let out = self.finalize()?;
        if self.raw {
            Ok(out.trim_start().to_string())
        } else {
            Ok(out)
        }
    }

    fn walk(&mut self) -> Result<()> {
        let root = self.root;
        let children = root.children();
        if children.is_empty() {
            self.acc.push_node(root);
            return Ok(());
        }

        // Comments right above the first flagged statement belong to it.
        // With nothing before them they are a file header instead, and
        // `split_comments` keeps them above the helper.
        let split = children.iter().position(has_relaxed_decorator).map(|first| {
            children[..first]
                .iter()
                .rposition(|c| c.kind() != SyntaxKind::Comment)
                .map_or(0, |before| before + 1)
        });

        for (at, child) in children.iter().enumerate() {
            if Some(at) == split {
                self.acc.in_suffix = true;
                self.node_before_expr = at.checked_sub(1).map(|before| &children[before]);
            }
            self.process(child)?;
        }
        Ok(())
    }

    fn process(&mut self, node: &'t SyntaxNode) -> Result<()> {
        if !has_relaxed_decorator(node) {
            self.acc.push_node(node);
            return Ok(());
        }

        if node.kind() == SyntaxKind::Decorator {
            return self.process_decorator(node);
        }

        if let Some(kind) = ConstructKind::from_syntax(node.kind()) {
            for part in plan(kind, node)? {
                self.process_part(part)?;
            }
            return Ok(());
        }

        for child in node.children() {
            self.process(child)?;
        }
        Ok(())
    }

    fn process_part(&mut self, part: Part<'t>) -> Result<()> {
        match part {
            Part::Verbatim(node) => self.acc.push_node(node),
            Part::Suite(block) => self.process_suite(block)?,
            Part::Clause(clause) => {
                if !has_relaxed_decorator(clause) {
                    self.acc.push_node(clause);
                    return Ok(());
                }
                for part in clause_plan(clause)? {
                    self.process_part(part)?;
                }
            }
        }
        Ok(())
    }

    fn process_suite(&mut self, block: &'t SyntaxNode) -> Result<()> {
        if !has_relaxed_decorator(block) {
            self.acc.push_node(block);
            return Ok(());
        }

        let depth = self.depth + 1;
        self.acc.push(self.config.linesep().as_str());
        self.acc.push(&self.config.indentation().at_level(depth));

        let nested = ConversionContext::nested(block, self.config, depth).render()?;
        self.acc.push(&nested);
        Ok(())
    }

    /// `@expr` becomes `@<helper>(expr)`; trailing comments stay as written
    fn process_decorator(&mut self, node: &'t SyntaxNode) -> Result<()> {
        let children = node.children();
        let at = children
            .first()
            .filter(|c| c.raw_kind() == "@")
            .ok_or_else(|| {
                InternalError::structure("decorator", "`@`", "another token", node.span())
            })?;
        let expr = decorator_expression(node).ok_or_else(|| {
            InternalError::structure(
                "decorator",
                "an expression after `@`",
                "nothing",
                node.span(),
            )
        })?;

        let text = expr.original_text();
        let text = text.trim();
        debug!(span = %node.span(), expression = text, "Rewriting relaxed decorator");

        self.acc.push_node(at);
        self.acc
            .push(&format!("{}({})", self.config.decorator().as_str(), text));

        for trailing in &children[2..] {
            if trailing.kind() != SyntaxKind::Comment {
                return Err(InternalError::structure(
                    "decorator",
                    "a single expression",
                    format!("`{}`", trailing.raw_kind()),
                    trailing.span(),
                )
                .into());
            }
            self.acc.push_node(trailing);
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<String> {
        let acc = std::mem::take(&mut self.acc);
        if !has_relaxed_decorator(self.root) {
            let mut out = acc.prefix;
            out.push_str(&acc.suffix);
            return Ok(out);
        }

        let insertion = Insertion {
            decorator: self.config.decorator(),
            unit: self.config.indentation(),
            linesep: self.config.linesep(),
            depth: self.depth,
            pep8: self.config.pep8(),
            after_definition: self
                .node_before_expr
                .is_some_and(|node| node.kind().is_definition()),
        };
        debug!(depth = self.depth, span = %self.root.span(), "Inserting helper function");

        Ok(reassemble(&acc.prefix, &acc.suffix, &insertion)?)
    }
}

/// Convert a parsed module
pub fn convert_tree(root: &SyntaxNode, config: &ConversionConfig) -> Result<String> {
    ConversionContext::new(root, config).render()
}
