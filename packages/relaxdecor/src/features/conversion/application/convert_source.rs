//! Convert source use case

use tracing::debug;

use crate::config::{ConfigError, ConversionConfig, ResolvedOptions, SourceVersion};
use crate::errors::Result;
use crate::features::detection::{detect_indentation, detect_linesep};
use crate::features::parsing::domain::ParsedTree;
use crate::features::parsing::ports::Parser;

use super::context::convert_tree;

/// Convert source use case
pub struct ConvertSourceUseCase<P: Parser> {
    parser: P,
}

impl<P: Parser> ConvertSourceUseCase<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    /// Convert `source` with fully resolved settings
    pub fn execute(
        &self,
        source: &str,
        filename: Option<&str>,
        config: &ConversionConfig,
    ) -> Result<String> {
        let tree = self.parse(source, filename, config.source_version())?;
        convert_tree(&tree.root, config)
    }

    /// Convert `source`, detecting line separator and indentation when the
    /// options leave them open
    pub fn execute_with_options(
        &self,
        source: &str,
        filename: Option<&str>,
        options: &ResolvedOptions,
    ) -> Result<String> {
        let tree = self.parse(source, filename, options.source_version)?;
        let config = options.to_config(|| detect_linesep(source), || detect_indentation(&tree.root));
        convert_tree(&tree.root, &config)
    }

    fn parse(
        &self,
        source: &str,
        filename: Option<&str>,
        version: SourceVersion,
    ) -> Result<ParsedTree> {
        if !self.parser.supports_version(version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version.to_string(),
                supported: SourceVersion::supported(),
            }
            .into());
        }

        debug!(
            file = filename.unwrap_or("<string>"),
            language = self.parser.language_name(),
            version = %version,
            "Parsing source"
        );
        self.parser
            .parse(source, version)
            .map_err(|e| e.with_file(filename).into())
    }
}
