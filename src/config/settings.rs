//! TOML settings parsing.
//!
//! Defines the structure of one SSL settings view and of the settings file
//! that holds the global view plus any number of named contexts.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::secret::Password;

use super::ConfigError;

/// Settings for a single SSL configuration namespace.
///
/// All fields are optional: `None` means "not set here", which lets the
/// resolver fall back to the global configuration or to built-in defaults.
/// An explicitly empty list is *set* and is not the same as `None`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SslSettings {
    /// Keystore holding the identity key pair
    #[serde(default)]
    pub keystore: KeystoreSection,

    /// Truststore holding the trust anchors
    #[serde(default)]
    pub truststore: TruststoreSection,

    /// Path to a PEM private key
    pub key: Option<PathBuf>,

    /// Passphrase protecting the PEM private key
    pub key_passphrase: Option<Password>,

    /// Path to the PEM certificate chain matching `key`
    pub certificate: Option<PathBuf>,

    /// Paths to PEM certificate authority files
    pub certificate_authorities: Option<Vec<PathBuf>>,

    /// Trust restrictions (subject allow-list)
    #[serde(default)]
    pub trust_restrictions: TrustRestrictionsSection,

    /// Ordered cipher suite names
    pub cipher_suites: Option<Vec<String>>,

    /// Ordered protocol names
    pub supported_protocols: Option<Vec<String>>,

    /// Client authentication: "none", "optional" or "required"
    pub client_authentication: Option<String>,

    /// Verification mode: "full", "certificate" or "none"
    pub verification_mode: Option<String>,
}

/// Keystore section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeystoreSection {
    /// Keystore file path
    pub path: Option<PathBuf>,

    /// Keystore type; inferred from the file extension when absent
    #[serde(rename = "type")]
    pub store_type: Option<String>,

    /// Keystore password (default: empty)
    pub password: Option<Password>,

    /// Private key password (default: the keystore password)
    pub key_password: Option<Password>,

    /// Key manager algorithm
    pub algorithm: Option<String>,
}

/// Truststore section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TruststoreSection {
    /// Truststore file path
    pub path: Option<PathBuf>,

    /// Truststore type; inferred from the file extension when absent
    #[serde(rename = "type")]
    pub store_type: Option<String>,

    /// Truststore password (default: empty)
    pub password: Option<Password>,

    /// Trust manager algorithm
    pub algorithm: Option<String>,
}

/// Trust restrictions section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrustRestrictionsSection {
    /// Path to the restrictions file
    pub path: Option<PathBuf>,
}

/// Root structure of a settings file.
///
/// ```toml
/// [ssl]
/// verification_mode = "certificate"
///
/// [contexts.http]
/// client_authentication = "optional"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    /// The global view every context falls back to
    #[serde(default)]
    pub ssl: SslSettings,

    /// Named views layered over `ssl`
    #[serde(default)]
    pub contexts: BTreeMap<String, SslSettings>,
}

impl SslSettings {
    /// Parses a single settings view from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or contains unknown keys.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

impl SettingsFile {
    /// Loads a settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses a settings file from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}
