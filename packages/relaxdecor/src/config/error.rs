//! Configuration error types

use thiserror::Error;

/// Configuration error type
///
/// Every variant is raised before any source is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Helper-function name is not a valid Python identifier
    #[error("name of decorator for runtime checks is not a valid identifier name: {0:?}")]
    InvalidDecoratorName(String),

    /// Helper-function name is class-private or dunder
    #[error("name of decorator for runtime checks should not start with double underscore: {0:?}")]
    ReservedDecoratorName(String),

    /// Helper-function name is a Python keyword
    #[error("name of decorator for runtime checks is a reserved keyword: {0:?}")]
    KeywordDecoratorName(String),

    /// Unknown line separator
    #[error("invalid line separator {0:?}; expected one of LF, CRLF, CR")]
    UnknownLinesep(String),

    /// Invalid indentation value
    #[error("invalid indentation {0:?}; expected a positive number of spaces or 't'/'tab'")]
    InvalidIndentation(String),

    /// Unsupported source version
    #[error("unsupported source version {found:?}. Supported versions: {}", supported.join(", "))]
    UnsupportedVersion {
        found: String,
        supported: Vec<&'static str>,
    },

    /// Invalid worker count
    #[error("invalid concurrency {0:?}; expected a positive integer")]
    InvalidConcurrency(String),

    /// Unrecognized boolean value in an environment variable
    #[error("invalid boolean value {value:?} in environment variable {var}")]
    InvalidBoolean { var: String, value: String },
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_version_lists_choices() {
        let err = ConfigError::UnsupportedVersion {
            found: "2.7".to_string(),
            supported: vec!["3.9", "3.10"],
        };
        let msg = err.to_string();
        assert!(msg.contains("\"2.7\""));
        assert!(msg.contains("3.9, 3.10"));
    }
}
