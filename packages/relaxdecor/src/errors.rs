//! Error types for relaxdecor
//!
//! Provides unified error handling across the crate.

use std::path::PathBuf;

use thiserror::Error;

pub use crate::config::ConfigError;
pub use crate::features::parsing::domain::ParseError;
use crate::shared::models::Span;

/// Main error type for relaxdecor operations
#[derive(Debug, Error)]
pub enum RelaxdecorError {
    /// Source could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Invalid options
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Converter invariant broken
    #[error("Internal error: {0}")]
    Internal(#[from] InternalError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Worker pool could not be started
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Input file is not valid UTF-8
    #[error("{}: source is not valid UTF-8", path.display())]
    Encoding { path: PathBuf },
}

/// Violation of an assumption the converter makes about the tree shape
///
/// Distinct from user errors: seeing one means the grammar produced a node
/// layout the walker does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalError {
    /// A construct is missing an expected part, or has an unexpected one
    #[error("malformed {construct} at {span}: expected {expected}, found {found}")]
    Structure {
        construct: &'static str,
        expected: &'static str,
        found: String,
        span: Span,
    },

    /// Helper template could not be rendered
    #[error("invalid helper template for {name:?}: {site}")]
    Template { name: String, site: &'static str },
}

impl InternalError {
    pub fn structure(
        construct: &'static str,
        expected: &'static str,
        found: impl Into<String>,
        span: Span,
    ) -> Self {
        InternalError::Structure {
            construct,
            expected,
            found: found.into(),
            span,
        }
    }
}

impl RelaxdecorError {
    /// Whether the error stems from user input rather than a converter bug
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            RelaxdecorError::Internal(_) | RelaxdecorError::ThreadPool(_)
        )
    }
}

/// Result type alias for relaxdecor operations
pub type Result<T> = std::result::Result<T, RelaxdecorError>;
