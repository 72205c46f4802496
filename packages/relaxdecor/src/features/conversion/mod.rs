//! Conversion Feature
//!
//! Rewrites relaxed decorator expressions into `@helper(expr)` and inserts
//! the helper function into every block that needs it.
//!
//! ## Structure
//! - `domain/` - classifier, construct plans, helper template
//! - `application/` - ConversionContext, reassembler, ConvertSourceUseCase

pub mod application;
pub mod domain;

// Re-exports
pub use application::{convert_tree, ConversionContext, ConvertSourceUseCase};
pub use domain::{has_relaxed_decorator, ConstructKind};
