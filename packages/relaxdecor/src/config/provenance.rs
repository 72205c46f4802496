//! Configuration provenance tracking
//!
//! Track where each resolved option came from (flag, env, default, detection)

use std::collections::HashMap;
use std::fmt;

/// Configuration provenance tracking
#[derive(Debug, Clone, Default)]
pub struct ConfigProvenance {
    /// Field name → source, e.g. "linesep" → ConfigSource::Env("RELAXDECOR_LINESEP")
    field_sources: HashMap<String, ConfigSource>,
}

/// Configuration source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// From CLI flag or API argument
    Explicit,

    /// From environment variable
    Env(String),

    /// Built-in default
    Default,

    /// Inferred from the source text
    Detected,
}

impl ConfigProvenance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the source of a field
    pub fn track_field(&mut self, field: &str, source: ConfigSource) {
        self.field_sources.insert(field.to_string(), source);
    }

    /// Get source for a specific field
    pub fn get_source(&self, field: &str) -> Option<&ConfigSource> {
        self.field_sources.get(field)
    }

    pub fn field_sources(&self) -> &HashMap<String, ConfigSource> {
        &self.field_sources
    }

    /// Human-readable summary, one field per line in name order
    pub fn summary(&self) -> String {
        let mut fields: Vec<_> = self.field_sources.iter().collect();
        fields.sort_by_key(|(k, _)| *k);

        fields
            .into_iter()
            .map(|(field, source)| format!("  {} ← {}", field, source))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ConfigSource {
    /// Get a short description
    pub fn describe(&self) -> String {
        match self {
            ConfigSource::Explicit => "explicit".to_string(),
            ConfigSource::Env(var) => format!("env:{}", var),
            ConfigSource::Default => "default".to_string(),
            ConfigSource::Detected => "detected".to_string(),
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Explicit => f.write_str("command line"),
            ConfigSource::Env(var) => write!(f, "env ${}", var),
            ConfigSource::Default => f.write_str("built-in default"),
            ConfigSource::Detected => f.write_str("detected from source"),
        }
    }
}
