//! Conversion domain: what to rewrite and what to insert

pub mod classifier;
pub mod construct;
pub mod template;

pub use classifier::{decorator_expression, decorator_needs_rewrite, has_relaxed_decorator};
pub use construct::{clause_plan, plan, ConstructKind, Part};
pub use template::render_helper;
