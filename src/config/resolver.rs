//! Resolution of settings into an [`SslConfiguration`].
//!
//! Each axis is resolved independently. Key and trust material are shared
//! with the global configuration by reference when inherited, never copied,
//! so callers can tell "inherited" from "configured identically" with
//! [`Arc::ptr_eq`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::secret::Password;
use crate::tls::key::{KeyConfig, PemKeyConfig, StoreKeyConfig, infer_store_type};
use crate::tls::trust::{
    DerivedTrust, PemTrustConfig, RestrictedTrustConfig, StoreTrustConfig, TrustConfig,
};
use crate::tls::{ClientAuth, SslConfiguration, VerificationMode};

use super::defaults;
use super::error::{ConfigError, setting};
use super::legacy::{LegacyDefaults, LegacyProperty};
use super::settings::{SslSettings, TruststoreSection};

/// Resolves settings views, optionally layered over a global configuration.
///
/// The legacy process-wide properties are only consulted when no global
/// configuration is given.
pub struct SettingsResolver<'a> {
    legacy: &'a dyn LegacyDefaults,
}

impl<'a> SettingsResolver<'a> {
    /// Creates a resolver using `legacy` as the last-resort key/trust source.
    #[must_use]
    pub const fn new(legacy: &'a dyn LegacyDefaults) -> Self {
        Self { legacy }
    }

    /// Resolves every axis of `settings`.
    ///
    /// Priority per axis: explicit setting > `global` > legacy properties
    /// (key and trust only, standalone only) > built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Mutually exclusive settings are combined
    /// - A setting required by another one is missing
    /// - An enumerated setting has an unknown value
    pub fn resolve(
        &self,
        settings: &SslSettings,
        global: Option<&SslConfiguration>,
    ) -> Result<SslConfiguration, ConfigError> {
        let key_config = self.resolve_key_config(settings, global)?;
        let trust_config = self.resolve_trust_config(settings, &key_config, global)?;

        let ciphers = resolve_list(
            settings.cipher_suites.as_deref(),
            global.map(SslConfiguration::cipher_suites),
            defaults::ciphers,
        );
        let supported_protocols = resolve_list(
            settings.supported_protocols.as_deref(),
            global.map(SslConfiguration::supported_protocols),
            defaults::supported_protocols,
        );

        let client_auth = Self::resolve_client_auth(settings, global)?;
        let verification_mode = Self::resolve_verification_mode(settings, global)?;

        let config = SslConfiguration::new(
            key_config,
            trust_config,
            ciphers,
            supported_protocols,
            client_auth,
            verification_mode,
        );
        tracing::debug!("Resolved {config}");

        Ok(config)
    }

    /// Resolves the identity.
    ///
    /// Explicit keystore or PEM settings always win. Otherwise the global
    /// key configuration is inherited by reference, then the legacy keystore
    /// is tried, then [`KeyConfig::None`].
    ///
    /// # Errors
    ///
    /// Returns an error if explicit key settings conflict or are incomplete.
    pub fn resolve_key_config(
        &self,
        settings: &SslSettings,
        global: Option<&SslConfiguration>,
    ) -> Result<Arc<KeyConfig>, ConfigError> {
        if let Some(key) = explicit_key_config(settings)? {
            return Ok(Arc::new(key));
        }

        if let Some(global) = global {
            return Ok(Arc::clone(global.key_config()));
        }

        if let Some(key) = self.legacy_key_config() {
            return Ok(Arc::new(key));
        }

        Ok(Arc::new(KeyConfig::None))
    }

    /// Resolves the trust configuration for an already resolved identity.
    ///
    /// The result is wrapped in [`TrustConfig::Restricted`] when a trust
    /// restrictions path is set.
    ///
    /// # Errors
    ///
    /// Returns an error if both a truststore and CA files are given, or if
    /// the verification mode or restrictions path is invalid.
    pub fn resolve_trust_config(
        &self,
        settings: &SslSettings,
        key_config: &Arc<KeyConfig>,
        global: Option<&SslConfiguration>,
    ) -> Result<Arc<TrustConfig>, ConfigError> {
        let trust = self.resolve_chain_trust(settings, key_config, global)?;

        match settings.trust_restrictions.path {
            Some(ref path) => {
                let restricted = RestrictedTrustConfig::new(trust, path.clone())?;
                Ok(Arc::new(TrustConfig::Restricted(restricted)))
            }
            None => Ok(trust),
        }
    }

    /// Resolves the verification mode: explicit > global > default.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit value is not a known mode.
    pub fn resolve_verification_mode(
        settings: &SslSettings,
        global: Option<&SslConfiguration>,
    ) -> Result<VerificationMode, ConfigError> {
        let explicit = settings
            .verification_mode
            .as_deref()
            .map(str::parse::<VerificationMode>)
            .transpose()?;

        Ok(explicit
            .or_else(|| global.map(SslConfiguration::verification_mode))
            .unwrap_or(defaults::VERIFICATION_MODE))
    }

    /// Resolves client authentication: explicit > global > default.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit value is not a known policy.
    pub fn resolve_client_auth(
        settings: &SslSettings,
        global: Option<&SslConfiguration>,
    ) -> Result<ClientAuth, ConfigError> {
        let explicit = settings
            .client_authentication
            .as_deref()
            .map(str::parse::<ClientAuth>)
            .transpose()?;

        Ok(explicit
            .or_else(|| global.map(SslConfiguration::client_auth))
            .unwrap_or(defaults::CLIENT_AUTH))
    }

    fn resolve_chain_trust(
        &self,
        settings: &SslSettings,
        key_config: &Arc<KeyConfig>,
        global: Option<&SslConfiguration>,
    ) -> Result<Arc<TrustConfig>, ConfigError> {
        let truststore = &settings.truststore;

        // Checked before the mode is read so the error is independent of it.
        if truststore.path.is_some() && settings.certificate_authorities.is_some() {
            return Err(ConfigError::conflicting(
                setting::TRUSTSTORE_PATH,
                setting::CERTIFICATE_AUTHORITIES,
            ));
        }

        let verification_mode = Self::resolve_verification_mode(settings, global)?;
        if !verification_mode.is_certificate_verification_enabled() {
            tracing::debug!("Verification mode is {verification_mode}, trusting all certificates");
            return Ok(trust_all(global));
        }

        if let Some(ref ca_paths) = settings.certificate_authorities {
            return Ok(Arc::new(TrustConfig::PemList(PemTrustConfig {
                ca_paths: ca_paths.clone(),
            })));
        }

        if let Some(ref path) = truststore.path {
            return Ok(Arc::new(TrustConfig::Store(store_trust_config(
                path, truststore,
            ))));
        }

        match global {
            None => {
                if let Some(trust) = self.legacy_trust_config() {
                    return Ok(Arc::new(trust));
                }
            }
            Some(global) => {
                // Same identity object: the global trust was derived from it already.
                // Inherited "trust all" is not reused once verification is back on.
                if Arc::ptr_eq(global.key_config(), key_config)
                    && !trusts_everything(global.trust_config())
                {
                    return Ok(Arc::clone(global.trust_config()));
                }
            }
        }

        Ok(Arc::new(
            DerivedTrust::new(key_config)
                .map_or(TrustConfig::DefaultPlatform, TrustConfig::DeriveFromKey),
        ))
    }

    fn legacy_key_config(&self) -> Option<KeyConfig> {
        let path = self.legacy.property(LegacyProperty::KeystorePath)?;
        tracing::warn!(
            "Using deprecated process-wide keystore {path}; set keystore.path or key/certificate instead"
        );

        let password = Password::new(
            self.legacy
                .property(LegacyProperty::KeystorePassword)
                .unwrap_or_default(),
        );

        Some(KeyConfig::Store(StoreKeyConfig {
            path: PathBuf::from(path),
            store_type: defaults::LEGACY_STORE_TYPE.to_string(),
            key_password: password.clone(),
            password,
            key_algorithm: self.legacy_algorithm(
                LegacyProperty::KeyManagerAlgorithm,
                defaults::KEY_MANAGER_ALGORITHM,
            ),
            trust_algorithm: self.legacy_algorithm(
                LegacyProperty::TrustManagerAlgorithm,
                defaults::TRUST_MANAGER_ALGORITHM,
            ),
        }))
    }

    fn legacy_trust_config(&self) -> Option<TrustConfig> {
        let path = self.legacy.property(LegacyProperty::TruststorePath)?;
        tracing::warn!(
            "Using deprecated process-wide truststore {path}; set truststore.path or certificate_authorities instead"
        );

        Some(TrustConfig::Store(StoreTrustConfig {
            path: PathBuf::from(path),
            store_type: defaults::LEGACY_STORE_TYPE.to_string(),
            password: Password::new(
                self.legacy
                    .property(LegacyProperty::TruststorePassword)
                    .unwrap_or_default(),
            ),
            algorithm: self.legacy_algorithm(
                LegacyProperty::TrustManagerAlgorithm,
                defaults::TRUST_MANAGER_ALGORITHM,
            ),
        }))
    }

    fn legacy_algorithm(&self, property: LegacyProperty, default: &str) -> String {
        self.legacy
            .property(property)
            .unwrap_or_else(|| default.to_string())
    }
}

// Helper functions

fn explicit_key_config(settings: &SslSettings) -> Result<Option<KeyConfig>, ConfigError> {
    let keystore = &settings.keystore;

    match (&keystore.path, &settings.key, &settings.certificate) {
        (Some(_), Some(_), _) => Err(ConfigError::conflicting(
            setting::KEYSTORE_PATH,
            setting::KEY,
        )),
        (Some(_), None, Some(_)) => Err(ConfigError::conflicting(
            setting::KEYSTORE_PATH,
            setting::CERTIFICATE,
        )),
        (None, Some(_), None) => Err(ConfigError::missing(setting::CERTIFICATE, setting::KEY)),
        (None, None, Some(_)) => Err(ConfigError::missing(setting::KEY, setting::CERTIFICATE)),
        (None, Some(key), Some(certificate)) => Ok(Some(KeyConfig::Pem(PemKeyConfig {
            certificate: certificate.clone(),
            key: key.clone(),
            key_password: settings.key_passphrase.clone().unwrap_or_default(),
        }))),
        (Some(path), None, None) => {
            let password = keystore.password.clone().unwrap_or_default();
            let key_password = keystore
                .key_password
                .clone()
                .unwrap_or_else(|| password.clone());

            Ok(Some(KeyConfig::Store(StoreKeyConfig {
                path: path.clone(),
                store_type: keystore
                    .store_type
                    .clone()
                    .unwrap_or_else(|| infer_store_type(path)),
                password,
                key_password,
                key_algorithm: keystore
                    .algorithm
                    .clone()
                    .unwrap_or_else(|| defaults::KEY_MANAGER_ALGORITHM.to_string()),
                trust_algorithm: settings
                    .truststore
                    .algorithm
                    .clone()
                    .unwrap_or_else(|| defaults::TRUST_MANAGER_ALGORITHM.to_string()),
            })))
        }
        (None, None, None) => Ok(None),
    }
}

fn store_trust_config(path: &Path, truststore: &TruststoreSection) -> StoreTrustConfig {
    StoreTrustConfig {
        path: path.to_path_buf(),
        store_type: truststore
            .store_type
            .clone()
            .unwrap_or_else(|| infer_store_type(path)),
        password: truststore.password.clone().unwrap_or_default(),
        algorithm: truststore
            .algorithm
            .clone()
            .unwrap_or_else(|| defaults::TRUST_MANAGER_ALGORITHM.to_string()),
    }
}

/// There is a single "trust all" configuration: an inherited one is shared.
fn trust_all(global: Option<&SslConfiguration>) -> Arc<TrustConfig> {
    match global {
        Some(global) if matches!(global.trust_config().as_ref(), TrustConfig::TrustAll) => {
            Arc::clone(global.trust_config())
        }
        _ => Arc::new(TrustConfig::TrustAll),
    }
}

fn trusts_everything(trust: &TrustConfig) -> bool {
    match trust {
        TrustConfig::TrustAll => true,
        TrustConfig::Restricted(restricted) => trusts_everything(restricted.inner()),
        TrustConfig::Store(_)
        | TrustConfig::PemList(_)
        | TrustConfig::DeriveFromKey(_)
        | TrustConfig::DefaultPlatform => false,
    }
}

fn resolve_list(
    explicit: Option<&[String]>,
    inherited: Option<&[String]>,
    default: fn() -> Vec<String>,
) -> Vec<String> {
    explicit
        .or(inherited)
        .map_or_else(default, <[String]>::to_vec)
}
