//! Runtime helper template
//!
//! The helper defers a relaxed decorator expression to call time:
//! `@expr` becomes `@helper(expr)`, which older grammars accept.

use crate::config::{DecoratorName, Indentation, Linesep};
use crate::errors::InternalError;

const NAME_PLACEHOLDER: &str = "{name}";

/// Helper source as (indentation level, text) pairs
const HELPER_TEMPLATE: &[(usize, &str)] = &[
    (0, "def {name}(expr):"),
    (1, "\"\"\"Runtime wrapper for relaxed decorator expressions."),
    (1, ""),
    (1, "    Args:"),
    (1, "        expr: Decorator expression as written in the source."),
    (1, ""),
    (1, "    Decorating a function with ``{name}(expr)`` defers evaluation of"),
    (1, "    the expression to call time, which keeps the decorator line valid"),
    (1, "    under the restricted grammar of older Python versions."),
    (1, ""),
    (1, "\"\"\""),
    (1, "import functools"),
    (1, "def caller(func):"),
    (2, "@functools.wraps(func)"),
    (2, "def wrapper(*args, **kwargs):"),
    (3, "return expr(func)(*args, **kwargs)"),
    (2, "return wrapper"),
    (1, "return caller"),
];

/// Render the helper function
///
/// Every line is indented `depth` units deeper than its template level.
/// Lines are joined with `linesep`; there is no trailing separator.
pub fn render_helper(
    name: &DecoratorName,
    unit: &Indentation,
    depth: usize,
    linesep: Linesep,
) -> Result<String, InternalError> {
    render_lines(HELPER_TEMPLATE, name, unit, depth, linesep)
}

fn render_lines(
    template: &[(usize, &str)],
    name: &DecoratorName,
    unit: &Indentation,
    depth: usize,
    linesep: Linesep,
) -> Result<String, InternalError> {
    let lines: Vec<String> = template
        .iter()
        .map(|(level, text)| {
            format!(
                "{}{}",
                unit.at_level(depth + level),
                text.replace(NAME_PLACEHOLDER, name.as_str())
            )
        })
        .collect();

    let head = format!("def {}(expr):", name.as_str());
    if lines.first().map(|line| line.trim_start()) != Some(head.as_str()) {
        return Err(InternalError::Template {
            name: name.to_string(),
            site: "definition line",
        });
    }
    if lines.iter().any(|line| line.contains(NAME_PLACEHOLDER)) {
        return Err(InternalError::Template {
            name: name.to_string(),
            site: "unsubstituted placeholder",
        });
    }

    Ok(lines.join(linesep.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_top_level_render() {
        let name = DecoratorName::new("_wrap").unwrap();
        let out = render_helper(&name, &Indentation::default(), 0, Linesep::Lf).unwrap();
        let lines: Vec<&str> = out.split('\n').collect();

        assert_eq!(lines.len(), HELPER_TEMPLATE.len());
        assert_eq!(lines[0], "def _wrap(expr):");
        assert_eq!(lines[2], "    ");
        assert_eq!(
            lines[6],
            "        Decorating a function with ``_wrap(expr)`` defers evaluation of"
        );
        assert_eq!(lines[15], "            return expr(func)(*args, **kwargs)");
        assert_eq!(lines[17], "    return caller");
        assert!(!out.ends_with('\n'));
    }

    #[test]
    fn test_nested_render_with_tabs_and_crlf() {
        let name = DecoratorName::default();
        let out = render_helper(&name, &Indentation::tab(), 2, Linesep::CrLf).unwrap();
        let lines: Vec<&str> = out.split("\r\n").collect();

        assert_eq!(lines[0], "\t\tdef _relaxdecor_decorator(expr):");
        assert_eq!(lines[13], "\t\t\t\t@functools.wraps(func)");
        assert!(lines.iter().all(|line| line.starts_with("\t\t")));
        assert_eq!(out.matches('\n').count(), out.matches("\r\n").count());
    }

    #[test]
    fn test_broken_template_is_rejected() {
        let name = DecoratorName::default();
        let err = render_lines(
            &[(0, "def other(expr):")],
            &name,
            &Indentation::default(),
            0,
            Linesep::Lf,
        )
        .unwrap_err();
        assert_eq!(
            err,
            InternalError::Template {
                name: "_relaxdecor_decorator".to_string(),
                site: "definition line",
            }
        );
    }
}
