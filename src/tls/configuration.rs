//! The resolved, immutable SSL configuration.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::certs::{self, CertificateError, CertificateMetadata, KeystoreLoader};
use crate::config::{ConfigError, LegacyDefaults, NoLegacyDefaults, SettingsResolver, SslSettings};

use super::environment::Environment;
use super::key::KeyConfig;
use super::mode::{ClientAuth, VerificationMode};
use super::trust::TrustConfig;

/// Fully resolved SSL configuration.
///
/// Built once by [`SettingsResolver`] and never mutated. Two configurations
/// are equal when all six axes are equal; key and trust material is compared
/// by value, even though a layered configuration usually shares it with its
/// global configuration by reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SslConfiguration {
    key_config: Arc<KeyConfig>,
    trust_config: Arc<TrustConfig>,
    ciphers: Vec<String>,
    supported_protocols: Vec<String>,
    client_auth: ClientAuth,
    verification_mode: VerificationMode,
}

impl SslConfiguration {
    pub(crate) const fn new(
        key_config: Arc<KeyConfig>,
        trust_config: Arc<TrustConfig>,
        ciphers: Vec<String>,
        supported_protocols: Vec<String>,
        client_auth: ClientAuth,
        verification_mode: VerificationMode,
    ) -> Self {
        Self {
            key_config,
            trust_config,
            ciphers,
            supported_protocols,
            client_auth,
            verification_mode,
        }
    }

    /// Resolves a standalone configuration: unset axes take the legacy
    /// process-wide values if any, then the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are conflicting, incomplete or invalid.
    pub fn from_settings(
        settings: &SslSettings,
        legacy: &dyn LegacyDefaults,
    ) -> Result<Self, ConfigError> {
        SettingsResolver::new(legacy).resolve(settings, None)
    }

    /// Resolves a configuration layered over `global`: unset axes take the
    /// global value. Legacy process-wide values are never consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are conflicting, incomplete or invalid.
    pub fn with_global(settings: &SslSettings, global: &Self) -> Result<Self, ConfigError> {
        SettingsResolver::new(&NoLegacyDefaults).resolve(settings, Some(global))
    }

    /// The identity presented to peers.
    #[must_use]
    pub const fn key_config(&self) -> &Arc<KeyConfig> {
        &self.key_config
    }

    /// The trust material used to validate peers.
    #[must_use]
    pub const fn trust_config(&self) -> &Arc<TrustConfig> {
        &self.trust_config
    }

    /// Enabled cipher suites, in preference order.
    #[must_use]
    pub fn cipher_suites(&self) -> &[String] {
        &self.ciphers
    }

    /// Enabled protocols, in preference order.
    #[must_use]
    pub fn supported_protocols(&self) -> &[String] {
        &self.supported_protocols
    }

    /// Client authentication policy.
    #[must_use]
    pub const fn client_auth(&self) -> ClientAuth {
        self.client_auth
    }

    /// Certificate and hostname verification policy.
    #[must_use]
    pub const fn verification_mode(&self) -> VerificationMode {
        self.verification_mode
    }

    /// Paths of the files backing this configuration, for a file watcher.
    ///
    /// Key files come first. When the trust is derived from this very key
    /// configuration its files are listed once; otherwise both lists are
    /// concatenated as is, duplicates included.
    #[must_use]
    pub fn files_to_monitor(&self, env: Option<&Environment>) -> Vec<PathBuf> {
        if self.trust_config.is_derived_from(&self.key_config) {
            return self.key_config.files_to_monitor(env);
        }

        let mut paths = self.key_config.files_to_monitor(env);
        paths.extend(self.trust_config.files_to_monitor(env));
        paths
    }

    /// Certificates this configuration defines, excluding platform anchors.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced file cannot be read or decoded.
    pub fn defined_certificates(
        &self,
        env: Option<&Environment>,
        keystores: &dyn KeystoreLoader,
    ) -> Result<Vec<CertificateMetadata>, CertificateError> {
        certs::certificates_of(self, env, keystores)
    }
}

impl fmt::Display for SslConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SslConfiguration {{ key_config: [{}], trust_config: [{}], cipher_suites: [{}], \
             supported_protocols: [{}], client_auth: {}, verification_mode: {} }}",
            self.key_config,
            self.trust_config,
            self.ciphers.join(","),
            self.supported_protocols.join(","),
            self.client_auth,
            self.verification_mode,
        )
    }
}

#[cfg(test)]
#[path = "configuration_tests.rs"]
mod tests;
