//! A global configuration plus named contexts layered over it.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::certs::{CertificateError, CertificateMetadata, KeystoreLoader};
use crate::config::{ConfigError, LegacyDefaults, SettingsFile};

use super::configuration::SslConfiguration;
use super::environment::Environment;

/// Name under which the global configuration is reported.
pub const GLOBAL_CONTEXT: &str = "ssl";

/// All configurations defined by one settings file.
#[derive(Debug, Clone)]
pub struct SslContexts {
    global: SslConfiguration,
    contexts: BTreeMap<String, SslConfiguration>,
}

impl SslContexts {
    /// Resolves the `[ssl]` table standalone and every `[contexts.*]` table
    /// layered over it.
    ///
    /// # Errors
    ///
    /// Returns the first resolution error. Errors inside a named context are
    /// wrapped with [`ConfigError::Context`].
    pub fn resolve(file: &SettingsFile, legacy: &dyn LegacyDefaults) -> Result<Self, ConfigError> {
        let global = SslConfiguration::from_settings(&file.ssl, legacy)
            .map_err(|e| e.in_context(GLOBAL_CONTEXT))?;

        let contexts = file
            .contexts
            .iter()
            .map(|(name, settings)| {
                SslConfiguration::with_global(settings, &global)
                    .map(|config| (name.clone(), config))
                    .map_err(|e| e.in_context(name.as_str()))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        tracing::info!(
            "Resolved global SSL configuration and {} context(s)",
            contexts.len()
        );

        Ok(Self { global, contexts })
    }

    /// The global configuration.
    #[must_use]
    pub const fn global(&self) -> &SslConfiguration {
        &self.global
    }

    /// The configuration of context `name`, or the global configuration if
    /// no such context is defined.
    #[must_use]
    pub fn get(&self, name: &str) -> &SslConfiguration {
        self.contexts.get(name).unwrap_or(&self.global)
    }

    /// Names of the explicitly defined contexts, sorted.
    #[must_use]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.contexts.keys().map(String::as_str)
    }

    /// Maps every monitored file to the sorted names of the contexts that
    /// depend on it. The global configuration is named [`GLOBAL_CONTEXT`].
    #[must_use]
    pub fn monitored_files(&self, env: Option<&Environment>) -> BTreeMap<PathBuf, Vec<String>> {
        let mut files: BTreeMap<PathBuf, Vec<String>> = BTreeMap::new();

        for (name, config) in self.all() {
            for path in config.files_to_monitor(env) {
                let dependents = files.entry(path).or_default();
                if !dependents.iter().any(|n| n == name) {
                    dependents.push(name.to_string());
                }
            }
        }

        for dependents in files.values_mut() {
            dependents.sort();
        }

        files
    }

    /// Union of the certificates defined by all configurations, sorted and
    /// without duplicates.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while reading certificates.
    pub fn defined_certificates(
        &self,
        env: Option<&Environment>,
        keystores: &dyn KeystoreLoader,
    ) -> Result<Vec<CertificateMetadata>, CertificateError> {
        let mut certificates = Vec::new();
        for (_, config) in self.all() {
            certificates.extend(config.defined_certificates(env, keystores)?);
        }

        certificates.sort();
        certificates.dedup();
        Ok(certificates)
    }

    fn all(&self) -> impl Iterator<Item = (&str, &SslConfiguration)> {
        std::iter::once((GLOBAL_CONTEXT, &self.global))
            .chain(self.contexts.iter().map(|(name, config)| (name.as_str(), config)))
    }
}

#[cfg(test)]
#[path = "contexts_tests.rs"]
mod tests;
