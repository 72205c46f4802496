//! Parsing Feature
//!
//! Turns Python source into a lossless syntax tree.
//!
//! ## Structure
//! - `domain/` - ParsedTree, SyntaxNode, ParseError
//! - `ports/` - Parser trait
//! - `infrastructure/` - TreeSitterParser

pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports
pub use domain::{ParseError, ParsedTree, SyntaxKind, SyntaxNode};
pub use infrastructure::TreeSitterParser;
pub use ports::Parser;
