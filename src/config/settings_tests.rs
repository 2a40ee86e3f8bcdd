//! Tests for TOML settings parsing.

use std::path::PathBuf;

use tempfile::TempDir;

use super::{ConfigError, SettingsFile, SslSettings};
use crate::secret::Password;

mod ssl_settings {
    use super::*;

    #[test]
    fn empty_is_all_unset() {
        let settings = SslSettings::parse("").unwrap();

        assert!(settings.keystore.path.is_none());
        assert!(settings.key.is_none());
        assert!(settings.cipher_suites.is_none());
        assert!(settings.verification_mode.is_none());
        assert!(settings.trust_restrictions.path.is_none());
    }

    #[test]
    fn full_view() {
        let settings = SslSettings::parse(
            r#"
            certificate_authorities = ["ca.pem"]
            cipher_suites = ["TLS_AES_256_GCM_SHA384"]
            supported_protocols = ["TLSv1.3"]
            client_authentication = "optional"
            verification_mode = "certificate"

            [keystore]
            path = "node.p12"
            type = "PKCS12"
            password = "secret"
            key_password = "key-secret"
            algorithm = "PKIX"

            [truststore]
            algorithm = "PKIX"

            [trust_restrictions]
            path = "restrict.toml"
            "#,
        )
        .unwrap();

        assert_eq!(settings.keystore.path, Some(PathBuf::from("node.p12")));
        assert_eq!(settings.keystore.store_type.as_deref(), Some("PKCS12"));
        assert_eq!(settings.keystore.password, Some(Password::new("secret")));
        assert_eq!(
            settings.keystore.key_password,
            Some(Password::new("key-secret"))
        );
        assert_eq!(
            settings.certificate_authorities,
            Some(vec![PathBuf::from("ca.pem")])
        );
        assert_eq!(
            settings.trust_restrictions.path,
            Some(PathBuf::from("restrict.toml"))
        );
        assert_eq!(settings.client_authentication.as_deref(), Some("optional"));
    }

    #[test]
    fn empty_list_is_set() {
        let settings = SslSettings::parse("cipher_suites = []").unwrap();

        assert_eq!(settings.cipher_suites, Some(Vec::new()));
    }

    #[test]
    fn unknown_key_rejected() {
        let result = SslSettings::parse("keystore_path = \"node.jks\"");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let result = SslSettings::parse("[keystore]\nfile = \"node.jks\"");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn password_is_redacted_in_debug() {
        let settings = SslSettings::parse("key_passphrase = \"hunter2\"").unwrap();

        assert!(!format!("{settings:?}").contains("hunter2"));
    }
}

mod settings_file {
    use super::*;

    #[test]
    fn global_and_contexts() {
        let file = SettingsFile::parse(
            r#"
            [ssl]
            verification_mode = "certificate"

            [contexts.http]
            client_authentication = "optional"

            [contexts.transport.keystore]
            path = "transport.jks"
            "#,
        )
        .unwrap();

        assert_eq!(file.ssl.verification_mode.as_deref(), Some("certificate"));
        assert_eq!(
            file.contexts.keys().collect::<Vec<_>>(),
            vec!["http", "transport"]
        );
        assert_eq!(
            file.contexts["transport"].keystore.path,
            Some(PathBuf::from("transport.jks"))
        );
    }

    #[test]
    fn empty_file_uses_defaults() {
        let file = SettingsFile::parse("").unwrap();

        assert!(file.contexts.is_empty());
        assert!(file.ssl.certificate_authorities.is_none());
    }

    #[test]
    fn load_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ssl.toml");
        std::fs::write(&path, "[ssl]\nkey = \"a.key\"\ncertificate = \"a.crt\"\n").unwrap();

        let file = SettingsFile::load(&path).unwrap();

        assert_eq!(file.ssl.key, Some(PathBuf::from("a.key")));
    }

    #[test]
    fn load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");

        let result = SettingsFile::load(&path);

        assert!(matches!(result, Err(ConfigError::FileRead { path: p, .. }) if p == path));
    }
}
