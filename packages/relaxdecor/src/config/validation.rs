//! Option validation: helper-function names and boolean switches

use std::fmt;

use super::error::{ConfigError, ConfigResult};

/// Default helper-function name
pub const DEFAULT_DECORATOR_NAME: &str = "_relaxdecor_decorator";

/// Python keywords (hard and soft keywords that cannot be rebound by `def`)
const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Validated name of the synthesized helper function
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecoratorName(String);

impl DecoratorName {
    /// Validate `name` as a helper-function name
    ///
    /// Rejects non-identifiers, keywords, and anything starting with `__`
    /// (class-private and dunder names).
    pub fn new(name: impl Into<String>) -> ConfigResult<Self> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(ConfigError::InvalidDecoratorName(name));
        }
        if PYTHON_KEYWORDS.contains(&name.as_str()) {
            return Err(ConfigError::KeywordDecoratorName(name));
        }
        if name.starts_with("__") {
            return Err(ConfigError::ReservedDecoratorName(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DecoratorName {
    fn default() -> Self {
        Self(DEFAULT_DECORATOR_NAME.to_string())
    }
}

impl fmt::Display for DecoratorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check whether `name` is a Python identifier
///
/// Non-ASCII characters are accepted when alphabetic (start) or alphanumeric
/// (continuation), which approximates the XID classes Python uses.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}

/// Parse an environment-style boolean switch
///
/// Returns `None` for values that are neither truthy nor falsy.
pub fn parse_boolean_state(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "y" | "on" | "true" => Some(true),
        "0" | "no" | "n" | "off" | "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_names() {
        for name in ["_ok_name", "name2", "wrap", "_", "décor"] {
            assert!(DecoratorName::new(name).is_ok(), "{name} should be accepted");
        }
    }

    #[test]
    fn test_rejects_invalid_names() {
        assert_eq!(
            DecoratorName::new(""),
            Err(ConfigError::InvalidDecoratorName(String::new()))
        );
        assert_eq!(
            DecoratorName::new("1bad"),
            Err(ConfigError::InvalidDecoratorName("1bad".to_string()))
        );
        assert_eq!(
            DecoratorName::new("has-dash"),
            Err(ConfigError::InvalidDecoratorName("has-dash".to_string()))
        );
        assert_eq!(
            DecoratorName::new("__dunder"),
            Err(ConfigError::ReservedDecoratorName("__dunder".to_string()))
        );
        assert_eq!(
            DecoratorName::new("lambda"),
            Err(ConfigError::KeywordDecoratorName("lambda".to_string()))
        );
    }

    #[test]
    fn test_default_name_is_valid() {
        let default = DecoratorName::default();
        assert_eq!(DecoratorName::new(default.as_str()), Ok(default));
    }

    #[test]
    fn test_parse_boolean_state() {
        assert_eq!(parse_boolean_state("Yes"), Some(true));
        assert_eq!(parse_boolean_state("1"), Some(true));
        assert_eq!(parse_boolean_state("off"), Some(false));
        assert_eq!(parse_boolean_state(" false "), Some(false));
        assert_eq!(parse_boolean_state("maybe"), None);
    }
}
