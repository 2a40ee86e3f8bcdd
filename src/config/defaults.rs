//! Default values for configuration options.
//!
//! Centralized constants to avoid magic values scattered across the codebase.
//! These are the last tier of every precedence chain.

use crate::tls::{ClientAuth, VerificationMode};

/// Cipher suites used when neither the settings nor a global configuration
/// name any. Strongest first.
pub const CIPHERS: &[&str] = &[
    "TLS_AES_256_GCM_SHA384",
    "TLS_AES_128_GCM_SHA256",
    "TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384",
    "TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384",
    "TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256",
    "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256",
    "TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA384",
    "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA384",
    "TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA256",
    "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256",
    "TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA",
    "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA",
    "TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA",
    "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA",
    "TLS_RSA_WITH_AES_256_GCM_SHA384",
    "TLS_RSA_WITH_AES_128_GCM_SHA256",
    "TLS_RSA_WITH_AES_256_CBC_SHA256",
    "TLS_RSA_WITH_AES_128_CBC_SHA256",
    "TLS_RSA_WITH_AES_256_CBC_SHA",
    "TLS_RSA_WITH_AES_128_CBC_SHA",
];

/// Protocols enabled when neither the settings nor a global configuration
/// name any.
pub const SUPPORTED_PROTOCOLS: &[&str] = &["TLSv1.3", "TLSv1.2", "TLSv1.1"];

/// Default verification mode: verify both the chain and the hostname.
pub const VERIFICATION_MODE: VerificationMode = VerificationMode::Full;

/// Default client authentication policy.
pub const CLIENT_AUTH: ClientAuth = ClientAuth::Required;

/// Default key manager algorithm for store-backed identities.
pub const KEY_MANAGER_ALGORITHM: &str = "SunX509";

/// Default trust manager algorithm for store-backed trust.
pub const TRUST_MANAGER_ALGORITHM: &str = "PKIX";

/// Store type assumed when it cannot be inferred from the file name.
pub const STORE_TYPE: &str = "jks";

/// Store type inferred for PKCS#12 file extensions.
pub const PKCS12_STORE_TYPE: &str = "PKCS12";

/// Store type of the legacy process-wide keystore and truststore.
pub const LEGACY_STORE_TYPE: &str = "jks";

/// File extensions (lower-case, without the dot) that denote a PKCS#12 store.
pub const PKCS12_EXTENSIONS: &[&str] = &["p12", "pfx", "pkcs12"];

/// Default cipher suites as owned strings.
#[must_use]
pub fn ciphers() -> Vec<String> {
    CIPHERS.iter().map(ToString::to_string).collect()
}

/// Default supported protocols as owned strings.
#[must_use]
pub fn supported_protocols() -> Vec<String> {
    SUPPORTED_PROTOCOLS.iter().map(ToString::to_string).collect()
}
