//! Option layering: explicit value > `RELAXDECOR_*` environment > default

use tracing::debug;

use super::conversion_config::ConversionConfig;
use super::error::{ConfigError, ConfigResult};
use super::provenance::{ConfigProvenance, ConfigSource};
use super::validation::{parse_boolean_state, DecoratorName};
use super::values::{Indentation, Linesep, SourceVersion};

pub const ENV_QUIET: &str = "RELAXDECOR_QUIET";
pub const ENV_CONCURRENCY: &str = "RELAXDECOR_CONCURRENCY";
pub const ENV_SOURCE_VERSION: &str = "RELAXDECOR_SOURCE_VERSION";
pub const ENV_LINESEP: &str = "RELAXDECOR_LINESEP";
pub const ENV_INDENTATION: &str = "RELAXDECOR_INDENTATION";
pub const ENV_PEP8: &str = "RELAXDECOR_PEP8";
pub const ENV_DECORATOR: &str = "RELAXDECOR_DECORATOR";

fn process_env(var: &str) -> Option<String> {
    std::env::var(var).ok()
}

/// Pick the explicit value, else the parsed env value, and record where it came from
fn layer<T, F, P>(
    field: &str,
    explicit: Option<T>,
    var: &str,
    env: &F,
    parse: P,
    provenance: &mut ConfigProvenance,
) -> ConfigResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    P: FnOnce(&str) -> ConfigResult<T>,
{
    if let Some(value) = explicit {
        provenance.track_field(field, ConfigSource::Explicit);
        return Ok(Some(value));
    }
    match env(var) {
        Some(raw) if !raw.is_empty() => {
            let value = parse(&raw)?;
            provenance.track_field(field, ConfigSource::Env(var.to_string()));
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}

fn parse_env_boolean(var: &str, raw: &str) -> ConfigResult<bool> {
    parse_boolean_state(raw).ok_or_else(|| ConfigError::InvalidBoolean {
        var: var.to_string(),
        value: raw.to_string(),
    })
}

/// Conversion options as given by the caller; `None` defers to lower layers
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub source_version: Option<SourceVersion>,
    pub linesep: Option<Linesep>,
    pub indentation: Option<Indentation>,
    pub pep8: Option<bool>,
    pub decorator: Option<String>,
}

/// Conversion options after layering
///
/// Line separator and indentation stay `None` until a source is available
/// to detect them from.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub source_version: SourceVersion,
    pub linesep: Option<Linesep>,
    pub indentation: Option<Indentation>,
    pub pep8: bool,
    pub decorator: DecoratorName,
    pub provenance: ConfigProvenance,
}

impl ConvertOptions {
    /// Resolve against the process environment
    pub fn resolve(&self) -> ConfigResult<ResolvedOptions> {
        self.resolve_with(process_env)
    }

    /// Resolve against a custom environment lookup
    pub fn resolve_with<F>(&self, env: F) -> ConfigResult<ResolvedOptions>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut provenance = ConfigProvenance::new();

        let source_version = layer(
            "source_version",
            self.source_version,
            ENV_SOURCE_VERSION,
            &env,
            |raw| raw.parse(),
            &mut provenance,
        )?;
        let linesep = layer(
            "linesep",
            self.linesep,
            ENV_LINESEP,
            &env,
            |raw| raw.parse(),
            &mut provenance,
        )?;
        let indentation = layer(
            "indentation",
            self.indentation.clone(),
            ENV_INDENTATION,
            &env,
            |raw| raw.parse(),
            &mut provenance,
        )?;
        let pep8 = layer(
            "pep8",
            self.pep8,
            ENV_PEP8,
            &env,
            |raw| parse_env_boolean(ENV_PEP8, raw),
            &mut provenance,
        )?;
        let decorator = layer(
            "decorator",
            self.decorator.clone(),
            ENV_DECORATOR,
            &env,
            |raw| Ok(raw.to_string()),
            &mut provenance,
        )?;

        for (field, resolved) in [
            ("source_version", source_version.is_some()),
            ("pep8", pep8.is_some()),
            ("decorator", decorator.is_some()),
        ] {
            if !resolved {
                provenance.track_field(field, ConfigSource::Default);
            }
        }

        let decorator = match decorator {
            Some(name) => DecoratorName::new(name)?,
            None => DecoratorName::default(),
        };

        Ok(ResolvedOptions {
            source_version: source_version.unwrap_or_default(),
            linesep,
            indentation,
            pep8: pep8.unwrap_or(true),
            decorator,
            provenance,
        })
    }
}

impl ResolvedOptions {
    /// Build the final config, filling undecided settings from detection
    ///
    /// Detectors run only for settings no layer provided.
    pub fn to_config<L, I>(&self, detect_linesep: L, detect_indentation: I) -> ConversionConfig
    where
        L: FnOnce() -> Linesep,
        I: FnOnce() -> Indentation,
    {
        let mut provenance = self.provenance.clone();

        let linesep = self.linesep.unwrap_or_else(|| {
            provenance.track_field("linesep", ConfigSource::Detected);
            detect_linesep()
        });
        let indentation = self.indentation.clone().unwrap_or_else(|| {
            provenance.track_field("indentation", ConfigSource::Detected);
            detect_indentation()
        });

        debug!(
            linesep = %linesep,
            indentation = %indentation.describe(),
            "Resolved conversion options:\n{}",
            provenance.summary()
        );

        let builder = ConversionConfig::builder()
            .linesep(linesep)
            .indentation(indentation)
            .pep8(self.pep8)
            .source_version(self.source_version);
        builder.with_validated_decorator(self.decorator.clone())
    }
}

/// Batch-level options as given by the caller
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// `true` only when explicitly requested
    pub quiet: bool,
    pub concurrency: Option<usize>,
    pub dry_run: bool,
}

/// Batch-level options after layering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSettings {
    pub quiet: bool,
    pub concurrency: usize,
    pub dry_run: bool,
}

impl BatchOptions {
    pub fn resolve(&self) -> ConfigResult<BatchSettings> {
        self.resolve_with(process_env)
    }

    pub fn resolve_with<F>(&self, env: F) -> ConfigResult<BatchSettings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let quiet = if self.quiet {
            true
        } else {
            match env(ENV_QUIET) {
                Some(raw) if !raw.is_empty() => parse_env_boolean(ENV_QUIET, &raw)?,
                _ => false,
            }
        };

        let concurrency = match self.concurrency {
            Some(0) => return Err(ConfigError::InvalidConcurrency("0".to_string())),
            Some(n) => n,
            None => match env(ENV_CONCURRENCY) {
                Some(raw) if !raw.is_empty() => match raw.trim().parse::<usize>() {
                    Ok(n) if n > 0 => n,
                    _ => return Err(ConfigError::InvalidConcurrency(raw)),
                },
                _ => num_cpus::get(),
            },
        };

        Ok(BatchSettings {
            quiet,
            concurrency,
            dry_run: self.dry_run,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let resolved = ConvertOptions::default().resolve_with(env_of(&[])).unwrap();
        assert_eq!(resolved.source_version, SourceVersion::Py312);
        assert!(resolved.linesep.is_none());
        assert!(resolved.indentation.is_none());
        assert!(resolved.pep8);
        assert_eq!(resolved.decorator, DecoratorName::default());
        assert_eq!(
            resolved.provenance.get_source("pep8"),
            Some(&ConfigSource::Default)
        );
    }

    #[test]
    fn test_env_layer() {
        let env = env_of(&[
            (ENV_LINESEP, "CRLF"),
            (ENV_INDENTATION, "tab"),
            (ENV_PEP8, "off"),
            (ENV_DECORATOR, "_from_env"),
            (ENV_SOURCE_VERSION, "3.10"),
        ]);
        let resolved = ConvertOptions::default().resolve_with(env).unwrap();
        assert_eq!(resolved.linesep, Some(Linesep::CrLf));
        assert_eq!(resolved.indentation, Some(Indentation::tab()));
        assert!(!resolved.pep8);
        assert_eq!(resolved.decorator.as_str(), "_from_env");
        assert_eq!(resolved.source_version, SourceVersion::Py310);
        assert_eq!(
            resolved.provenance.get_source("linesep"),
            Some(&ConfigSource::Env(ENV_LINESEP.to_string()))
        );
    }

    #[test]
    fn test_explicit_beats_env() {
        let options = ConvertOptions {
            linesep: Some(Linesep::Cr),
            pep8: Some(true),
            decorator: Some("_explicit".to_string()),
            ..Default::default()
        };
        let env = env_of(&[
            (ENV_LINESEP, "LF"),
            (ENV_PEP8, "no"),
            (ENV_DECORATOR, "_from_env"),
        ]);
        let resolved = options.resolve_with(env).unwrap();
        assert_eq!(resolved.linesep, Some(Linesep::Cr));
        assert!(resolved.pep8);
        assert_eq!(resolved.decorator.as_str(), "_explicit");
        assert_eq!(
            resolved.provenance.get_source("decorator"),
            Some(&ConfigSource::Explicit)
        );
    }

    #[test]
    fn test_invalid_env_values() {
        let err = ConvertOptions::default()
            .resolve_with(env_of(&[(ENV_PEP8, "sometimes")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidBoolean {
                var: ENV_PEP8.to_string(),
                value: "sometimes".to_string(),
            }
        );

        let err = ConvertOptions::default()
            .resolve_with(env_of(&[(ENV_DECORATOR, "not valid")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDecoratorName(_)));
    }

    #[test]
    fn test_to_config_detects_only_missing_settings() {
        let options = ConvertOptions {
            linesep: Some(Linesep::CrLf),
            ..Default::default()
        };
        let resolved = options.resolve_with(env_of(&[])).unwrap();
        let config = resolved.to_config(
            || panic!("linesep was given explicitly"),
            || Indentation::spaces(2).unwrap(),
        );
        assert_eq!(config.linesep(), Linesep::CrLf);
        assert_eq!(config.indentation().as_str(), "  ");
    }

    #[test]
    fn test_batch_options() {
        let settings = BatchOptions {
            concurrency: Some(3),
            ..Default::default()
        }
        .resolve_with(env_of(&[(ENV_QUIET, "yes"), (ENV_CONCURRENCY, "8")]))
        .unwrap();
        assert_eq!(
            settings,
            BatchSettings {
                quiet: true,
                concurrency: 3,
                dry_run: false,
            }
        );

        let settings = BatchOptions::default()
            .resolve_with(env_of(&[(ENV_CONCURRENCY, "5")]))
            .unwrap();
        assert_eq!(settings.concurrency, 5);
        assert!(!settings.quiet);

        let err = BatchOptions::default()
            .resolve_with(env_of(&[(ENV_CONCURRENCY, "zero")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidConcurrency("zero".to_string()));

        let err = BatchOptions {
            concurrency: Some(0),
            ..Default::default()
        }
        .resolve_with(env_of(&[]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConcurrency(_)));
    }
}
