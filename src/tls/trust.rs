//! Trust (peer certificate validation) configuration.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{ConfigError, setting};
use crate::secret::Password;

use super::environment::{Environment, resolve_path};
use super::key::KeyConfig;
use super::restrictions::TrustRestrictions;

/// Where the certificates used to validate peers come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrustConfig {
    /// Every peer certificate is accepted. Only produced when the
    /// verification mode disables certificate verification.
    TrustAll,
    /// A truststore file.
    Store(StoreTrustConfig),
    /// A list of PEM certificate authority files.
    PemList(PemTrustConfig),
    /// Trust derived from an identity's own certificate chain, in addition
    /// to the platform's anchors.
    DeriveFromKey(DerivedTrust),
    /// The platform's built-in trust anchors.
    DefaultPlatform,
    /// Another trust configuration narrowed by a subject allow-list.
    Restricted(RestrictedTrustConfig),
}

/// Truststore-backed trust.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreTrustConfig {
    /// Truststore file path
    pub path: PathBuf,
    /// Truststore type, e.g. `jks` or `PKCS12`
    pub store_type: String,
    /// Truststore password
    pub password: Password,
    /// Trust manager algorithm
    pub algorithm: String,
}

/// PEM certificate authorities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PemTrustConfig {
    /// CA certificate files, in configuration order
    pub ca_paths: Vec<PathBuf>,
}

/// Trust derived from an identity configuration.
///
/// Holds the key configuration by reference so that the derived trust and the
/// identity it came from remain the same object. Never wraps
/// [`KeyConfig::None`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivedTrust(Arc<KeyConfig>);

impl DerivedTrust {
    /// Derives trust from `key`, or returns `None` if there is no identity.
    #[must_use]
    pub fn new(key: &Arc<KeyConfig>) -> Option<Self> {
        if key.is_none() {
            None
        } else {
            Some(Self(Arc::clone(key)))
        }
    }

    /// The identity this trust is derived from.
    #[must_use]
    pub const fn key(&self) -> &Arc<KeyConfig> {
        &self.0
    }
}

/// A trust configuration narrowed by a restrictions file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RestrictedTrustConfig {
    inner: Arc<TrustConfig>,
    restrictions_path: PathBuf,
}

impl RestrictedTrustConfig {
    /// Wraps `inner` with the restrictions file at `restrictions_path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the path is empty.
    pub fn new(inner: Arc<TrustConfig>, restrictions_path: PathBuf) -> Result<Self, ConfigError> {
        if restrictions_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                setting: setting::TRUST_RESTRICTIONS_PATH,
                value: String::new(),
                expected: "a non-empty path",
            });
        }

        Ok(Self {
            inner,
            restrictions_path,
        })
    }

    /// The wrapped trust configuration.
    #[must_use]
    pub const fn inner(&self) -> &Arc<TrustConfig> {
        &self.inner
    }

    /// Path of the restrictions file, as configured.
    #[must_use]
    pub const fn restrictions_path(&self) -> &PathBuf {
        &self.restrictions_path
    }

    /// Reads the restrictions file, returning a fresh snapshot.
    ///
    /// Call again after the file changes to pick up the new allow-list.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or compiled.
    pub fn load_restrictions(
        &self,
        env: Option<&Environment>,
    ) -> Result<TrustRestrictions, ConfigError> {
        TrustRestrictions::load(&resolve_path(&self.restrictions_path, env))
    }
}

impl TrustConfig {
    /// Returns true if this is trust derived from exactly the given key
    /// configuration object (not merely an equal one).
    #[must_use]
    pub fn is_derived_from(&self, key: &Arc<KeyConfig>) -> bool {
        matches!(self, Self::DeriveFromKey(derived) if Arc::ptr_eq(derived.key(), key))
    }

    /// Files whose contents back this configuration.
    #[must_use]
    pub fn files_to_monitor(&self, env: Option<&Environment>) -> Vec<PathBuf> {
        match self {
            Self::TrustAll | Self::DefaultPlatform => Vec::new(),
            Self::Store(store) => vec![resolve_path(&store.path, env)],
            Self::PemList(pem) => pem
                .ca_paths
                .iter()
                .map(|path| resolve_path(path, env))
                .collect(),
            Self::DeriveFromKey(derived) => derived.key().files_to_monitor(env),
            Self::Restricted(restricted) => {
                let mut paths = restricted.inner.files_to_monitor(env);
                paths.push(resolve_path(&restricted.restrictions_path, env));
                paths
            }
        }
    }
}

impl fmt::Display for TrustConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TrustAll => write!(f, "trust all"),
            Self::Store(store) => write!(
                f,
                "truststore=[{}], type=[{}], algorithm=[{}]",
                store.path.display(),
                store.store_type,
                store.algorithm,
            ),
            Self::PemList(pem) => {
                let paths = pem
                    .ca_paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>();
                write!(f, "certificate_authorities=[{}]", paths.join(","))
            }
            Self::DeriveFromKey(derived) => {
                write!(f, "platform trust anchors + [{}]", derived.key())
            }
            Self::DefaultPlatform => write!(f, "platform trust anchors"),
            Self::Restricted(restricted) => write!(
                f,
                "{} restricted by [{}]",
                restricted.inner,
                restricted.restrictions_path.display(),
            ),
        }
    }
}

#[cfg(test)]
#[path = "trust_tests.rs"]
mod tests;
