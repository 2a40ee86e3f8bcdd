//! Identity (key pair) configuration.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::secret::Password;

use super::environment::{Environment, resolve_path};

/// Where the private key and certificate chain presented to peers come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyConfig {
    /// No identity is configured.
    None,
    /// A keystore file holding the key pair.
    Store(StoreKeyConfig),
    /// A PEM private key plus a PEM certificate chain.
    Pem(PemKeyConfig),
}

/// Keystore-backed identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreKeyConfig {
    /// Keystore file path
    pub path: PathBuf,
    /// Keystore type, e.g. `jks` or `PKCS12`
    pub store_type: String,
    /// Keystore password
    pub password: Password,
    /// Password of the private key entry
    pub key_password: Password,
    /// Key manager algorithm
    pub key_algorithm: String,
    /// Trust manager algorithm used when this keystore also serves as trust
    pub trust_algorithm: String,
}

/// PEM-file-backed identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PemKeyConfig {
    /// PEM certificate chain, leaf first
    pub certificate: PathBuf,
    /// PEM private key
    pub key: PathBuf,
    /// Passphrase protecting the private key
    pub key_password: Password,
}

impl KeyConfig {
    /// Returns `true` for [`KeyConfig::None`].
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Files whose contents back this configuration.
    #[must_use]
    pub fn files_to_monitor(&self, env: Option<&Environment>) -> Vec<PathBuf> {
        match self {
            Self::None => Vec::new(),
            Self::Store(store) => vec![resolve_path(&store.path, env)],
            Self::Pem(pem) => vec![
                resolve_path(&pem.key, env),
                resolve_path(&pem.certificate, env),
            ],
        }
    }
}

impl fmt::Display for KeyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Store(store) => write!(
                f,
                "keystore=[{}], type=[{}], key_algorithm=[{}], trust_algorithm=[{}]",
                store.path.display(),
                store.store_type,
                store.key_algorithm,
                store.trust_algorithm,
            ),
            Self::Pem(pem) => write!(
                f,
                "key=[{}], certificate=[{}]",
                pem.key.display(),
                pem.certificate.display(),
            ),
        }
    }
}

/// Infers a keystore type from its file name.
///
/// PKCS#12 extensions map to `PKCS12`; anything else is assumed to be `jks`.
#[must_use]
pub fn infer_store_type(path: &Path) -> String {
    let is_pkcs12 = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            defaults::PKCS12_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        });

    if is_pkcs12 {
        defaults::PKCS12_STORE_TYPE.to_string()
    } else {
        defaults::STORE_TYPE.to_string()
    }
}
