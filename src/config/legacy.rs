//! Deprecated process-wide keystore and truststore defaults.
//!
//! Older deployments configured TLS through process-wide properties rather
//! than per-namespace settings. The resolver still honours them as a last
//! resort for a standalone configuration, but only through the
//! [`LegacyDefaults`] trait so they can be stubbed out or dropped without
//! touching resolution itself.

use std::collections::HashMap;

/// A process-wide property consulted by the legacy fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyProperty {
    /// Path of the process-wide keystore.
    KeystorePath,
    /// Password of the process-wide keystore.
    KeystorePassword,
    /// Path of the process-wide truststore.
    TruststorePath,
    /// Password of the process-wide truststore.
    TruststorePassword,
    /// Key manager algorithm override.
    KeyManagerAlgorithm,
    /// Trust manager algorithm override.
    TrustManagerAlgorithm,
}

impl LegacyProperty {
    /// Name of the environment variable backing this property.
    #[must_use]
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::KeystorePath => "SSL_KEYSTORE",
            Self::KeystorePassword => "SSL_KEYSTORE_PASSWORD",
            Self::TruststorePath => "SSL_TRUSTSTORE",
            Self::TruststorePassword => "SSL_TRUSTSTORE_PASSWORD",
            Self::KeyManagerAlgorithm => "SSL_KEY_MANAGER_ALGORITHM",
            Self::TrustManagerAlgorithm => "SSL_TRUST_MANAGER_ALGORITHM",
        }
    }
}

/// Source of legacy process-wide TLS properties.
///
/// # Testing
///
/// Use [`NoLegacyDefaults`] to disable the fallback, or
/// [`LegacyProperties`] to supply fixed values.
pub trait LegacyDefaults: Send + Sync {
    /// Returns the value of a property, or `None` if it is not set.
    fn property(&self, property: LegacyProperty) -> Option<String>;
}

/// Reads legacy properties from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl LegacyDefaults for ProcessEnvironment {
    fn property(&self, property: LegacyProperty) -> Option<String> {
        std::env::var(property.env_var()).ok()
    }
}

/// Disables the legacy fallback entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLegacyDefaults;

impl LegacyDefaults for NoLegacyDefaults {
    fn property(&self, _property: LegacyProperty) -> Option<String> {
        None
    }
}

/// Fixed, in-memory legacy properties.
///
/// # Examples
///
/// ```
/// use tlsconf::config::{LegacyDefaults, LegacyProperties, LegacyProperty};
///
/// let legacy = LegacyProperties::new().with(LegacyProperty::KeystorePath, "/etc/node.jks");
///
/// assert_eq!(legacy.property(LegacyProperty::KeystorePath).as_deref(), Some("/etc/node.jks"));
/// assert_eq!(legacy.property(LegacyProperty::TruststorePath), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LegacyProperties {
    values: HashMap<LegacyProperty, String>,
}

impl LegacyProperties {
    /// Creates an empty property set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property (builder pattern).
    #[must_use]
    pub fn with(mut self, property: LegacyProperty, value: impl Into<String>) -> Self {
        self.values.insert(property, value.into());
        self
    }
}

impl LegacyDefaults for LegacyProperties {
    fn property(&self, property: LegacyProperty) -> Option<String> {
        self.values.get(&property).cloned()
    }
}
