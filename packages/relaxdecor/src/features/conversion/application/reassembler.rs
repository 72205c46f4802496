//! Splices the helper function between converted prefix and suffix
//!
//! Untouched text passes through byte for byte; only line separators around
//! the inserted helper are synthesized.

use crate::config::{DecoratorName, Indentation, Linesep};
use crate::errors::InternalError;
use crate::features::conversion::domain::render_helper;

/// Everything [`reassemble`] needs besides the two text halves
#[derive(Debug, Clone, Copy)]
pub struct Insertion<'a> {
    pub decorator: &'a DecoratorName,
    pub unit: &'a Indentation,
    pub linesep: Linesep,
    pub depth: usize,
    pub pep8: bool,
    /// The statement right before the first rewritten one is a definition
    pub after_definition: bool,
}

/// Split leading comment lines off `code`
///
/// Returns the run of whole lines whose trimmed text starts with `#`, and
/// the rest. An empty first line ends the run. The suffix only starts with
/// comments when nothing precedes them in the context; at module level that
/// is a file header (shebang, encoding line, license) and stays on top.
pub fn split_comments<'c>(code: &'c str, linesep: &str) -> (&'c str, &'c str) {
    let mut end = 0;
    while end < code.len() {
        let rest = &code[end..];
        let (line, advance) = match rest.find(linesep) {
            Some(at) => (&rest[..at], at + linesep.len()),
            None => (rest, rest.len()),
        };
        if !line.trim().starts_with('#') {
            break;
        }
        end += advance;
    }
    code.split_at(end)
}

/// Leading run of whole line separators
pub fn leading_lineseps<'c>(code: &'c str, linesep: &str) -> &'c str {
    let stripped = code.trim_start_matches(linesep);
    &code[..code.len() - stripped.len()]
}

/// Line separators to add after `code` so it ends with `expected` blank lines
pub fn missing_newlines(code: &str, expected: usize, linesep: &str) -> usize {
    let trailing = code
        .rsplit(linesep)
        .take_while(|segment| segment.trim().is_empty())
        .count();
    let blank = trailing.saturating_sub(1);
    expected.saturating_sub(blank)
}

/// Final text of a context that rewrote something
pub fn reassemble(prefix: &str, suffix: &str, insertion: &Insertion<'_>) -> Result<String, InternalError> {
    let linesep = insertion.linesep.as_str();
    let (comments, rest) = split_comments(suffix, linesep);
    let rest_lineseps = leading_lineseps(rest, linesep);

    let mut buffer = String::with_capacity(prefix.len() + suffix.len() + 512);
    buffer.push_str(prefix);
    buffer.push_str(comments);
    buffer.push_str(rest_lineseps);

    if !buffer.is_empty() && !buffer.ends_with(['\n', '\r']) {
        buffer.push_str(linesep);
    }

    if insertion.pep8 && !buffer.is_empty() {
        let expected = if insertion.depth == 0 && insertion.after_definition {
            2
        } else {
            1
        };
        let missing = missing_newlines(&buffer, expected, linesep);
        buffer.push_str(&linesep.repeat(missing));
    }

    let helper = render_helper(
        insertion.decorator,
        insertion.unit,
        insertion.depth,
        insertion.linesep,
    )?;
    buffer.push_str(&helper);
    buffer.push_str(linesep);

    if insertion.pep8 {
        let missing = missing_newlines(&buffer, 2, linesep);
        buffer.push_str(&linesep.repeat(missing));
    }

    buffer.push_str(rest.trim_start_matches(|c: char| linesep.contains(c)));
    Ok(buffer)
}
