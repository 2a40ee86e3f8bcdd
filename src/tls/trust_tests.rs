//! Tests for trust configuration.

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use crate::config::ConfigError;
use crate::secret::Password;
use crate::tls::environment::Environment;
use crate::tls::key::{KeyConfig, StoreKeyConfig};

use super::{
    DerivedTrust, PemTrustConfig, RestrictedTrustConfig, StoreTrustConfig, TrustConfig,
};

fn store_key(path: &str) -> Arc<KeyConfig> {
    Arc::new(KeyConfig::Store(StoreKeyConfig {
        path: PathBuf::from(path),
        store_type: "jks".to_string(),
        password: Password::new("pw"),
        key_password: Password::new("pw"),
        key_algorithm: "SunX509".to_string(),
        trust_algorithm: "PKIX".to_string(),
    }))
}

fn store_trust(path: &str) -> TrustConfig {
    TrustConfig::Store(StoreTrustConfig {
        path: PathBuf::from(path),
        store_type: "jks".to_string(),
        password: Password::empty(),
        algorithm: "PKIX".to_string(),
    })
}

mod derived_trust {
    use super::*;

    #[test]
    fn none_key_cannot_be_derived_from() {
        assert!(DerivedTrust::new(&Arc::new(KeyConfig::None)).is_none());
    }

    #[test]
    fn derived_trust_shares_the_key() {
        let key = store_key("/node.jks");
        let derived = DerivedTrust::new(&key).unwrap();

        assert!(Arc::ptr_eq(derived.key(), &key));
    }

    #[test]
    fn is_derived_from_requires_identity_not_equality() {
        let key = store_key("/node.jks");
        let equal_key = store_key("/node.jks");
        let trust = TrustConfig::DeriveFromKey(DerivedTrust::new(&key).unwrap());

        assert_eq!(key, equal_key);
        assert!(trust.is_derived_from(&key));
        assert!(!trust.is_derived_from(&equal_key));
    }

    #[test]
    fn other_variants_are_not_derived() {
        let key = store_key("/node.jks");

        assert!(!TrustConfig::DefaultPlatform.is_derived_from(&key));
        assert!(!store_trust("/node.jks").is_derived_from(&key));
    }
}

mod restricted {
    use super::*;

    #[test]
    fn empty_path_rejected() {
        let result =
            RestrictedTrustConfig::new(Arc::new(TrustConfig::DefaultPlatform), PathBuf::new());

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                setting: "trust_restrictions.path",
                ..
            })
        ));
    }

    #[test]
    fn load_restrictions_resolves_against_environment() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("restrict.toml"),
            "[trust]\nsubject_name = [\"*.example.com\"]\n",
        )
        .unwrap();
        let restricted = RestrictedTrustConfig::new(
            Arc::new(TrustConfig::DefaultPlatform),
            PathBuf::from("restrict.toml"),
        )
        .unwrap();
        let env = Environment::new(dir.path());

        let snapshot = restricted.load_restrictions(Some(&env)).unwrap();

        assert!(snapshot.matches("a.example.com"));
    }

    #[test]
    fn reload_picks_up_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("restrict.toml");
        std::fs::write(&path, "[trust]\nsubject_name = [\"a\"]\n").unwrap();
        let restricted =
            RestrictedTrustConfig::new(Arc::new(TrustConfig::DefaultPlatform), path.clone())
                .unwrap();

        let before = restricted.load_restrictions(None).unwrap();
        std::fs::write(&path, "[trust]\nsubject_name = [\"b\"]\n").unwrap();
        let after = restricted.load_restrictions(None).unwrap();

        assert!(before.matches("a"));
        assert!(!after.matches("a"));
        assert!(after.matches("b"));
    }
}

mod files_to_monitor {
    use super::*;

    #[test]
    fn trust_all_and_platform_monitor_nothing() {
        assert!(TrustConfig::TrustAll.files_to_monitor(None).is_empty());
        assert!(TrustConfig::DefaultPlatform.files_to_monitor(None).is_empty());
    }

    #[test]
    fn store_monitors_its_file() {
        assert_eq!(
            store_trust("/ca.jks").files_to_monitor(None),
            vec![PathBuf::from("/ca.jks")]
        );
    }

    #[test]
    fn pem_list_monitors_in_order() {
        let trust = TrustConfig::PemList(PemTrustConfig {
            ca_paths: vec![PathBuf::from("ca2.pem"), PathBuf::from("ca1.pem")],
        });
        let env = Environment::new("/cfg");

        assert_eq!(
            trust.files_to_monitor(Some(&env)),
            vec![PathBuf::from("/cfg/ca2.pem"), PathBuf::from("/cfg/ca1.pem")]
        );
    }

    #[test]
    fn derived_monitors_key_files() {
        let key = store_key("/node.jks");
        let trust = TrustConfig::DeriveFromKey(DerivedTrust::new(&key).unwrap());

        assert_eq!(trust.files_to_monitor(None), vec![PathBuf::from("/node.jks")]);
    }

    #[test]
    fn restricted_appends_restrictions_file() {
        let restricted = RestrictedTrustConfig::new(
            Arc::new(store_trust("/ca.jks")),
            PathBuf::from("/restrict.toml"),
        )
        .unwrap();

        assert_eq!(
            TrustConfig::Restricted(restricted).files_to_monitor(None),
            vec![PathBuf::from("/ca.jks"), PathBuf::from("/restrict.toml")]
        );
    }
}

mod display {
    use super::*;

    #[test]
    fn store_display_hides_password() {
        let trust = TrustConfig::Store(StoreTrustConfig {
            path: PathBuf::from("/ca.jks"),
            store_type: "jks".to_string(),
            password: Password::new("topsecret"),
            algorithm: "PKIX".to_string(),
        });

        assert!(trust.to_string().contains("/ca.jks"));
        assert!(!trust.to_string().contains("topsecret"));
    }
}
