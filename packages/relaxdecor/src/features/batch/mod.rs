//! Batch Feature
//!
//! File discovery and in-place conversion of many files in parallel.

mod bom;
mod discovery;
mod runner;

pub use bom::{split_bom, BOM};
pub use discovery::discover_files;
pub use runner::{BatchReport, BatchRunner, FileOutcome};
