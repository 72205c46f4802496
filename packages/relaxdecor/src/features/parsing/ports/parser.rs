//! Parser port (interface)
//!
//! Defines the contract for parsing source code.

use crate::config::SourceVersion;
use crate::features::parsing::domain::{ParseError, ParsedTree};

/// Parser trait - abstraction over parsing implementation
///
/// Implementations must build lossless trees: the concatenated leaf texts of
/// the root reproduce `source` exactly.
pub trait Parser: Send + Sync {
    /// Parse source code into a ParsedTree
    fn parse(&self, source: &str, version: SourceVersion) -> Result<ParsedTree, ParseError>;

    /// Check if this parser accepts the given grammar version
    fn supports_version(&self, version: SourceVersion) -> bool;

    /// Get supported language name
    fn language_name(&self) -> &'static str;
}
