//! Conversion application layer

pub mod context;
pub mod convert_source;
pub mod reassembler;

pub use context::{convert_tree, ConversionContext};
pub use convert_source::ConvertSourceUseCase;
pub use reassembler::{leading_lineseps, missing_newlines, reassemble, split_comments, Insertion};
