//! Typed option values: line separator, indentation unit, source version

use std::fmt;
use std::str::FromStr;

use super::error::{ConfigError, ConfigResult};

/// Line separator written into converted code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Linesep {
    #[default]
    Lf,
    CrLf,
    Cr,
}

impl Linesep {
    /// Literal separator characters
    pub fn as_str(&self) -> &'static str {
        match self {
            Linesep::Lf => "\n",
            Linesep::CrLf => "\r\n",
            Linesep::Cr => "\r",
        }
    }

    /// Conventional name (`LF`, `CRLF`, `CR`)
    pub fn name(&self) -> &'static str {
        match self {
            Linesep::Lf => "LF",
            Linesep::CrLf => "CRLF",
            Linesep::Cr => "CR",
        }
    }
}

impl FromStr for Linesep {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s {
            "\n" => return Ok(Linesep::Lf),
            "\r\n" => return Ok(Linesep::CrLf),
            "\r" => return Ok(Linesep::Cr),
            _ => {}
        }
        match s.trim().to_ascii_uppercase().as_str() {
            "LF" => Ok(Linesep::Lf),
            "CRLF" => Ok(Linesep::CrLf),
            "CR" => Ok(Linesep::Cr),
            _ => Err(ConfigError::UnknownLinesep(s.to_string())),
        }
    }
}

impl fmt::Display for Linesep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One level of indentation (a run of spaces or a single tab)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Indentation(String);

impl Indentation {
    /// `count` spaces per level
    pub fn spaces(count: usize) -> ConfigResult<Self> {
        if count == 0 {
            return Err(ConfigError::InvalidIndentation(count.to_string()));
        }
        Ok(Self(" ".repeat(count)))
    }

    /// A tab per level
    pub fn tab() -> Self {
        Self("\t".to_string())
    }

    /// Normalize an indentation run seen in source code
    ///
    /// Any tab makes the unit a tab; otherwise the unit is that many spaces.
    pub fn from_observed(run: &str) -> Option<Self> {
        if run.contains('\t') {
            Some(Self::tab())
        } else {
            Self::spaces(run.chars().filter(|c| *c == ' ').count()).ok()
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The unit repeated `level` times
    pub fn at_level(&self, level: usize) -> String {
        self.0.repeat(level)
    }

    /// Human-readable description (`4 spaces`, `tab`)
    pub fn describe(&self) -> String {
        if self.0 == "\t" {
            "tab".to_string()
        } else {
            format!("{} spaces", self.0.len())
        }
    }
}

impl Default for Indentation {
    fn default() -> Self {
        Self("    ".to_string())
    }
}

impl FromStr for Indentation {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("t") || trimmed.eq_ignore_ascii_case("tab") {
            return Ok(Self::tab());
        }
        trimmed
            .parse::<usize>()
            .ok()
            .and_then(|count| Self::spaces(count).ok())
            .ok_or_else(|| ConfigError::InvalidIndentation(s.to_string()))
    }
}

/// Python grammar version tag the source is parsed as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceVersion {
    Py39,
    Py310,
    Py311,
    Py312,
}

impl SourceVersion {
    /// Supported versions, oldest first
    pub const ALL: [SourceVersion; 4] = [
        SourceVersion::Py39,
        SourceVersion::Py310,
        SourceVersion::Py311,
        SourceVersion::Py312,
    ];

    pub fn latest() -> Self {
        SourceVersion::Py312
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceVersion::Py39 => "3.9",
            SourceVersion::Py310 => "3.10",
            SourceVersion::Py311 => "3.11",
            SourceVersion::Py312 => "3.12",
        }
    }

    pub fn supported() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.as_str()).collect()
    }
}

impl Default for SourceVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl FromStr for SourceVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s.trim())
            .ok_or_else(|| ConfigError::UnsupportedVersion {
                found: s.to_string(),
                supported: Self::supported(),
            })
    }
}

impl fmt::Display for SourceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
