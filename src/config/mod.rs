//! Settings layer for SSL configuration.
//!
//! This module provides:
//! - TOML settings parsing ([`SslSettings`], [`SettingsFile`])
//! - Resolution into an [`SslConfiguration`](crate::tls::SslConfiguration) ([`SettingsResolver`])
//! - Deprecated process-wide keystore/truststore properties ([`LegacyDefaults`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Every axis of a configuration is resolved independently, with the following
//! priority (highest to lowest):
//!
//! 1. **Explicit settings** - Values set in the settings view being resolved
//! 2. **Global configuration** - Values of the configuration a context is layered over
//! 3. **Legacy properties** - Process-wide keystore/truststore (standalone only)
//! 4. **Built-in defaults** - Hardcoded default values
//!
//! Legacy properties only ever supply key and trust material, and only when no
//! global configuration is given. A layered context never reads them.
//!
//! Lists (`cipher_suites`, `supported_protocols`) **replace** inherited lists
//! entirely; they are never merged. An explicitly empty list is kept as is.
//!
//! # Key and Trust Material
//!
//! An identity is either a keystore (`keystore.path`) or a PEM pair (`key` plus
//! `certificate`). Mixing the two, or giving half a PEM pair, is an error.
//!
//! Trust is either a truststore (`truststore.path`) or a list of PEM
//! `certificate_authorities`; both at once is an error even when verification
//! is disabled. With `verification_mode = "none"` everything is trusted. With
//! no trust material at all, trust is derived from the identity if there is
//! one, and from the platform's trust anchors otherwise.

pub mod defaults;
mod error;
mod legacy;
mod resolver;
mod settings;

#[cfg(test)]
mod settings_tests;

pub use error::{ConfigError, setting};
pub use legacy::{
    LegacyDefaults, LegacyProperties, LegacyProperty, NoLegacyDefaults, ProcessEnvironment,
};
pub use resolver::SettingsResolver;
pub use settings::{
    KeystoreSection, SettingsFile, SslSettings, TrustRestrictionsSection, TruststoreSection,
};
