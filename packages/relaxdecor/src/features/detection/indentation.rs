//! Indentation unit detection

use crate::config::Indentation;
use crate::features::parsing::domain::{SyntaxKind, SyntaxNode};

/// Indentation unit of the first block whose body starts on its own line
///
/// Falls back to four spaces when nothing is indented.
pub fn detect_indentation(root: &SyntaxNode) -> Indentation {
    find_unit(root, None).unwrap_or_default()
}

fn find_unit(node: &SyntaxNode, parent: Option<&SyntaxNode>) -> Option<Indentation> {
    if node.kind() == SyntaxKind::Block {
        if let Some(unit) = parent.and_then(|owner| block_unit(node, owner)) {
            return Some(unit);
        }
    }
    node.children()
        .iter()
        .find_map(|child| find_unit(child, Some(node)))
}

/// Indentation the block adds over the statement that owns it
fn block_unit(block: &SyntaxNode, owner: &SyntaxNode) -> Option<Indentation> {
    let prefix = block.prefix();
    let line_start = prefix.rfind(['\n', '\r'])? + 1;
    let run = &prefix[line_start..];
    if !run.chars().all(|c| c == ' ' || c == '\t') {
        return None;
    }
    let owner_width = owner.span().start_col as usize;
    Indentation::from_observed(run.get(owner_width..).unwrap_or(""))
}
