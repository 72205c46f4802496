//! Detection Feature
//!
//! Infers formatting conventions from the source when no option sets them.

mod indentation;
mod linesep;

pub use indentation::detect_indentation;
pub use linesep::detect_linesep;
