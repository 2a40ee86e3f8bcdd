//! Error types for settings parsing and resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Every resolution failure names the offending setting(s). Nothing is
/// arbitrated silently: a configuration either fully resolves or fails with
/// one of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a settings or restrictions file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Two mutually exclusive settings were both given.
    #[error("Conflicting settings: cannot specify both [{first}] and [{second}]")]
    Conflicting {
        /// The first setting
        first: &'static str,
        /// The setting it conflicts with
        second: &'static str,
    },

    /// A setting was given without another setting it depends on.
    #[error("Missing required setting [{setting}] when [{required_by}] is set")]
    MissingRequired {
        /// The missing setting
        setting: &'static str,
        /// The setting that requires it
        required_by: &'static str,
    },

    /// A setting has a value outside its accepted domain.
    #[error("Invalid value '{value}' for [{setting}]: expected {expected}")]
    InvalidValue {
        /// Name of the setting
        setting: &'static str,
        /// The rejected value
        value: String,
        /// Description of the accepted values
        expected: &'static str,
    },

    /// A trust restriction pattern could not be compiled.
    #[error("Invalid trust restriction pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as written in the restrictions file
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// A named context failed to resolve.
    #[error("Invalid SSL context [{name}]: {source}")]
    Context {
        /// Name of the context
        name: String,
        /// The underlying resolution failure
        #[source]
        source: Box<Self>,
    },
}

/// Well-known setting names used in error reports.
///
/// Use these constants for compile-time safety when matching settings.
pub mod setting {
    /// Keystore file path.
    pub const KEYSTORE_PATH: &str = "keystore.path";
    /// PEM private key path.
    pub const KEY: &str = "key";
    /// PEM certificate chain path.
    pub const CERTIFICATE: &str = "certificate";
    /// Truststore file path.
    pub const TRUSTSTORE_PATH: &str = "truststore.path";
    /// PEM certificate authority paths.
    pub const CERTIFICATE_AUTHORITIES: &str = "certificate_authorities";
    /// Trust restrictions file path.
    pub const TRUST_RESTRICTIONS_PATH: &str = "trust_restrictions.path";
    /// Verification mode.
    pub const VERIFICATION_MODE: &str = "verification_mode";
    /// Client authentication mode.
    pub const CLIENT_AUTHENTICATION: &str = "client_authentication";
}

impl ConfigError {
    /// Creates a `Conflicting` error for two mutually exclusive settings.
    #[must_use]
    pub const fn conflicting(first: &'static str, second: &'static str) -> Self {
        Self::Conflicting { first, second }
    }

    /// Creates a `MissingRequired` error.
    #[must_use]
    pub const fn missing(setting: &'static str, required_by: &'static str) -> Self {
        Self::MissingRequired {
            setting,
            required_by,
        }
    }

    /// Wraps this error with the name of the context it occurred in.
    #[must_use]
    pub fn in_context(self, name: impl Into<String>) -> Self {
        Self::Context {
            name: name.into(),
            source: Box::new(self),
        }
    }
}
