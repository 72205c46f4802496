//! Per-conversion settings consumed by the walker and reassembler

use super::error::ConfigResult;
use super::validation::DecoratorName;
use super::values::{Indentation, Linesep, SourceVersion};

/// Fully resolved conversion settings
///
/// Built through [`ConversionConfig::builder`]; the helper name is validated
/// when the builder finishes, before any source is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionConfig {
    linesep: Linesep,
    indentation: Indentation,
    pep8: bool,
    source_version: SourceVersion,
    decorator: DecoratorName,
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }

    pub fn linesep(&self) -> Linesep {
        self.linesep
    }

    pub fn indentation(&self) -> &Indentation {
        &self.indentation
    }

    /// Whether blank lines around the helper follow PEP 8
    pub fn pep8(&self) -> bool {
        self.pep8
    }

    pub fn source_version(&self) -> SourceVersion {
        self.source_version
    }

    pub fn decorator(&self) -> &DecoratorName {
        &self.decorator
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            linesep: Linesep::default(),
            indentation: Indentation::default(),
            pep8: true,
            source_version: SourceVersion::default(),
            decorator: DecoratorName::default(),
        }
    }
}

/// Builder for [`ConversionConfig`]
#[derive(Debug, Clone, Default)]
pub struct ConversionConfigBuilder {
    linesep: Option<Linesep>,
    indentation: Option<Indentation>,
    pep8: Option<bool>,
    source_version: Option<SourceVersion>,
    decorator: Option<String>,
}

impl ConversionConfigBuilder {
    pub fn linesep(mut self, linesep: Linesep) -> Self {
        self.linesep = Some(linesep);
        self
    }

    pub fn indentation(mut self, indentation: Indentation) -> Self {
        self.indentation = Some(indentation);
        self
    }

    pub fn pep8(mut self, pep8: bool) -> Self {
        self.pep8 = Some(pep8);
        self
    }

    pub fn source_version(mut self, version: SourceVersion) -> Self {
        self.source_version = Some(version);
        self
    }

    pub fn decorator(mut self, name: impl Into<String>) -> Self {
        self.decorator = Some(name.into());
        self
    }

    /// Build with a name that already passed validation
    pub(crate) fn with_validated_decorator(self, decorator: DecoratorName) -> ConversionConfig {
        ConversionConfig {
            linesep: self.linesep.unwrap_or_default(),
            indentation: self.indentation.unwrap_or_default(),
            pep8: self.pep8.unwrap_or(true),
            source_version: self.source_version.unwrap_or_default(),
            decorator,
        }
    }

    /// Validate and build
    pub fn build(self) -> ConfigResult<ConversionConfig> {
        let decorator = match self.decorator.clone() {
            Some(name) => DecoratorName::new(name)?,
            None => DecoratorName::default(),
        };

        Ok(self.with_validated_decorator(decorator))
    }
}
