//! Shared domain models

mod span;

pub use span::Span;
