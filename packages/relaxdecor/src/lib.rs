/*
 * relaxdecor - Relaxed decorator back-port for Python
 *
 * Rewrites decorators that only Python 3.9+ accepts (`@buttons[0].clicked`)
 * into `@helper(expr)` and inserts the helper function, so the result runs
 * on older interpreters.
 *
 * Feature-First Layout:
 * - shared/      : Common models (Span)
 * - config/      : Option layering, validation, provenance
 * - features/    : Vertical slices (parsing → detection → conversion → batch)
 */

//! Relaxed decorator back-port compiler
//!
//! ```rust
//! use relaxdecor::config::ConversionConfig;
//!
//! let source = "@handlers[0]\ndef on_click():\n    pass\n";
//! let out = relaxdecor::convert(source, None, &ConversionConfig::default()).unwrap();
//! assert!(out.starts_with("def _relaxdecor_decorator(expr):"));
//! assert!(out.contains("@_relaxdecor_decorator(handlers[0])\ndef on_click():"));
//! ```

// Shared types
pub mod shared;

// Configuration
pub mod config;

// Feature slices
pub mod features;

// Errors
pub mod errors;

pub use config::{ConversionConfig, ConvertOptions, ResolvedOptions};
pub use errors::{RelaxdecorError, Result};
pub use features::batch::{discover_files, BatchReport, BatchRunner};
pub use features::conversion::ConvertSourceUseCase;
pub use features::parsing::TreeSitterParser;

/// Convert one Python source with fully specified settings
///
/// Deterministic and free of side effects. Source without relaxed
/// decorators comes back unchanged.
pub fn convert(source: &str, filename: Option<&str>, config: &ConversionConfig) -> Result<String> {
    ConvertSourceUseCase::new(TreeSitterParser::python()).execute(source, filename, config)
}

/// Convert one Python source, detecting line separator and indentation
/// where `options` leave them open
pub fn convert_with_options(
    source: &str,
    filename: Option<&str>,
    options: &ResolvedOptions,
) -> Result<String> {
    ConvertSourceUseCase::new(TreeSitterParser::python())
        .execute_with_options(source, filename, options)
}
