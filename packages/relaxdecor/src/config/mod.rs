//! Configuration system
//!
//! Conversion settings come from three layers, highest precedence first:
//! - explicit values (CLI flags or API arguments)
//! - `RELAXDECOR_*` environment variables
//! - built-in defaults
//!
//! Line separator and indentation fall back to auto-detection from the source
//! when no layer provides them.
//!
//! # Examples
//!
//! ```rust
//! use relaxdecor::config::{ConversionConfig, Indentation, Linesep};
//!
//! let config = ConversionConfig::builder()
//!     .linesep(Linesep::CrLf)
//!     .indentation(Indentation::tab())
//!     .decorator("_wrap")
//!     .build()
//!     .unwrap();
//! assert_eq!(config.decorator().as_str(), "_wrap");
//! ```

pub mod conversion_config;
pub mod error;
pub mod options;
pub mod provenance;
pub mod validation;
pub mod values;

// Re-exports
pub use conversion_config::{ConversionConfig, ConversionConfigBuilder};
pub use error::{ConfigError, ConfigResult};
pub use options::{BatchOptions, BatchSettings, ConvertOptions, ResolvedOptions};
pub use provenance::{ConfigProvenance, ConfigSource};
pub use validation::{is_identifier, parse_boolean_state, DecoratorName};
pub use values::{Indentation, Linesep, SourceVersion};
