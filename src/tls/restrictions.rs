//! Subject-name allow-lists narrowing a trust configuration.
//!
//! A restrictions file names the certificate subjects that may be trusted:
//!
//! ```toml
//! [trust]
//! subject_name = ["*.nodes.example.com", "admin.example.com"]
//! ```
//!
//! `*` matches any run of characters; everything else is literal and the
//! whole name must match.

use std::fmt;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::config::ConfigError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RestrictionsFile {
    #[serde(default)]
    trust: TrustSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TrustSection {
    #[serde(default)]
    subject_name: Vec<String>,
}

/// An immutable snapshot of a trust restrictions file.
#[derive(Clone)]
pub struct TrustRestrictions {
    patterns: Vec<String>,
    compiled: Vec<Regex>,
}

impl TrustRestrictions {
    /// Builds restrictions from subject-name patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if a pattern cannot be compiled.
    pub fn new(patterns: Vec<String>) -> Result<Self, ConfigError> {
        let compiled = patterns
            .iter()
            .map(|pattern| compile_wildcard(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns, compiled })
    }

    /// Reads restrictions from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or compiled.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses restrictions from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a pattern cannot be compiled.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: RestrictionsFile = toml::from_str(content)?;
        Self::new(file.trust.subject_name)
    }

    /// The patterns as written.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Returns true if `subject_name` is allowed by any pattern.
    #[must_use]
    pub fn matches(&self, subject_name: &str) -> bool {
        self.compiled.iter().any(|re| re.is_match(subject_name))
    }
}

impl PartialEq for TrustRestrictions {
    fn eq(&self, other: &Self) -> bool {
        self.patterns == other.patterns
    }
}

impl Eq for TrustRestrictions {}

impl fmt::Debug for TrustRestrictions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrustRestrictions")
            .field("patterns", &self.patterns)
            .finish()
    }
}

fn compile_wildcard(pattern: &str) -> Result<Regex, ConfigError> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");

    Regex::new(&format!("^{body}$")).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source: e,
    })
}

#[cfg(test)]
#[path = "restrictions_tests.rs"]
mod tests;
