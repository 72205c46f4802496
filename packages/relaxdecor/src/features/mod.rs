//! Feature modules (vertical slices)
//!
//! - parsing: source text to lossless syntax tree
//! - detection: line separator and indentation inference
//! - conversion: relaxed decorator rewriting
//! - batch: file discovery and in-place conversion

pub mod batch;
pub mod conversion;
pub mod detection;
pub mod parsing;
