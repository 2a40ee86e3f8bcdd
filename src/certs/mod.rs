//! Inventory of the certificates a configuration defines.
//!
//! Walks the key and trust configurations of an [`SslConfiguration`] and
//! describes every certificate they reference. Certificates that come from
//! the platform's built-in trust anchors are not part of the configuration
//! and are never listed.
//!
//! PEM files are read directly. Binary keystore formats are delegated to a
//! [`KeystoreLoader`].

mod pem;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

use std::path::{Path, PathBuf};

use thiserror::Error;
use time::OffsetDateTime;

use crate::secret::Password;
use crate::tls::environment::resolve_path;
use crate::tls::key::KeyConfig;
use crate::tls::trust::TrustConfig;
use crate::tls::{Environment, SslConfiguration};

use pem::Origin;

/// Format label of certificates read from PEM files.
pub const PEM_FORMAT: &str = "PEM";

/// Description of one certificate referenced by a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CertificateMetadata {
    /// File the certificate was read from
    pub path: PathBuf,
    /// `PEM` or the keystore type
    pub format: String,
    /// Keystore alias; `None` for PEM files
    pub alias: Option<String>,
    /// Whether the matching private key is available
    pub has_private_key: bool,
    /// Subject distinguished name
    pub subject_dn: String,
    /// Issuer distinguished name
    pub issuer_dn: String,
    /// Serial number, lower-case hex
    pub serial_number: String,
    /// Start of validity
    pub not_before: OffsetDateTime,
    /// End of validity
    pub not_after: OffsetDateTime,
}

/// One entry of a keystore, as produced by a [`KeystoreLoader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeystoreEntry {
    /// Entry alias
    pub alias: String,
    /// DER-encoded certificate
    pub certificate: Vec<u8>,
    /// Whether the entry holds a private key for this certificate
    pub has_private_key: bool,
}

/// Errors that can occur while enumerating certificates.
#[derive(Debug, Error)]
pub enum CertificateError {
    /// A referenced file is missing or unreadable.
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        /// The offending file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A certificate could not be decoded.
    #[error("Failed to parse certificate in '{}': {reason}", path.display())]
    Parse {
        /// The offending file
        path: PathBuf,
        /// Decoder message
        reason: String,
    },

    /// No loader is available for this keystore type.
    #[error("Unsupported keystore type '{store_type}' for '{}'", path.display())]
    UnsupportedStoreType {
        /// The keystore file
        path: PathBuf,
        /// The requested type
        store_type: String,
    },

    /// A keystore loader failed, e.g. because of a wrong password.
    #[error("Failed to load keystore '{}': {reason}", path.display())]
    Keystore {
        /// The keystore file
        path: PathBuf,
        /// Loader message
        reason: String,
    },
}

impl CertificateError {
    fn read(path: &Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Reads certificate entries out of keystore files.
///
/// Keystore formats are provided by the embedding application; the
/// inventory only needs the certificates and whether each has a key.
pub trait KeystoreLoader: Send + Sync {
    /// Loads all certificate entries of the store at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read, unlocked, or decoded,
    /// or if `store_type` is not supported.
    fn load(
        &self,
        path: &Path,
        store_type: &str,
        password: &Password,
    ) -> Result<Vec<KeystoreEntry>, CertificateError>;
}

/// A [`KeystoreLoader`] that supports no keystore type at all.
///
/// Suitable for PEM-only deployments.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoKeystoreSupport;

impl KeystoreLoader for NoKeystoreSupport {
    fn load(
        &self,
        path: &Path,
        store_type: &str,
        _password: &Password,
    ) -> Result<Vec<KeystoreEntry>, CertificateError> {
        Err(CertificateError::UnsupportedStoreType {
            path: path.to_path_buf(),
            store_type: store_type.to_string(),
        })
    }
}

/// Lists the certificates defined by `config`: identity first, then trust.
///
/// A certificate reachable through both is listed once.
///
/// # Errors
///
/// Returns an error if any referenced file cannot be read or decoded.
pub fn certificates_of(
    config: &SslConfiguration,
    env: Option<&Environment>,
    keystores: &dyn KeystoreLoader,
) -> Result<Vec<CertificateMetadata>, CertificateError> {
    let mut certificates = key_certificates(config.key_config(), env, keystores)?;

    for cert in trust_certificates(config.trust_config(), env, keystores)? {
        if !certificates.contains(&cert) {
            certificates.push(cert);
        }
    }

    Ok(certificates)
}

fn key_certificates(
    key: &KeyConfig,
    env: Option<&Environment>,
    keystores: &dyn KeystoreLoader,
) -> Result<Vec<CertificateMetadata>, CertificateError> {
    match key {
        KeyConfig::None => Ok(Vec::new()),
        KeyConfig::Store(store) => {
            store_certificates(&store.path, &store.store_type, &store.password, env, keystores)
        }
        KeyConfig::Pem(pem) => {
            let path = resolve_path(&pem.certificate, env);
            pem::read_certificates(&path)?
                .iter()
                .enumerate()
                .map(|(i, der)| {
                    // Only the leaf of the chain pairs with the private key.
                    let origin = Origin {
                        path: &path,
                        format: PEM_FORMAT,
                        alias: None,
                        has_private_key: i == 0,
                    };
                    pem::describe(&origin, der)
                })
                .collect()
        }
    }
}

fn trust_certificates(
    trust: &TrustConfig,
    env: Option<&Environment>,
    keystores: &dyn KeystoreLoader,
) -> Result<Vec<CertificateMetadata>, CertificateError> {
    match trust {
        TrustConfig::TrustAll | TrustConfig::DefaultPlatform => Ok(Vec::new()),
        TrustConfig::Store(store) => {
            store_certificates(&store.path, &store.store_type, &store.password, env, keystores)
        }
        TrustConfig::PemList(pem) => {
            let mut certificates = Vec::new();
            for ca_path in &pem.ca_paths {
                let path = resolve_path(ca_path, env);
                let origin = Origin {
                    path: &path,
                    format: PEM_FORMAT,
                    alias: None,
                    has_private_key: false,
                };
                for der in pem::read_certificates(&path)? {
                    certificates.push(pem::describe(&origin, &der)?);
                }
            }
            Ok(certificates)
        }
        TrustConfig::DeriveFromKey(derived) => key_certificates(derived.key(), env, keystores),
        TrustConfig::Restricted(restricted) => {
            trust_certificates(restricted.inner(), env, keystores)
        }
    }
}

fn store_certificates(
    path: &Path,
    store_type: &str,
    password: &Password,
    env: Option<&Environment>,
    keystores: &dyn KeystoreLoader,
) -> Result<Vec<CertificateMetadata>, CertificateError> {
    let path = resolve_path(path, env);

    keystores
        .load(&path, store_type, password)?
        .iter()
        .map(|entry| {
            let origin = Origin {
                path: &path,
                format: store_type,
                alias: Some(&entry.alias),
                has_private_key: entry.has_private_key,
            };
            pem::describe(&origin, &entry.certificate)
        })
        .collect()
}
