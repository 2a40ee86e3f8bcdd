//! Tests for trust restrictions.

use tempfile::TempDir;

use crate::config::ConfigError;

use super::TrustRestrictions;

fn restrictions(patterns: &[&str]) -> TrustRestrictions {
    TrustRestrictions::new(patterns.iter().map(ToString::to_string).collect()).unwrap()
}

mod matching {
    use super::*;

    #[test]
    fn literal_pattern_matches_exactly() {
        let r = restrictions(&["admin.example.com"]);

        assert!(r.matches("admin.example.com"));
        assert!(!r.matches("xadmin.example.com"));
        assert!(!r.matches("admin.example.com.evil"));
    }

    #[test]
    fn wildcard_matches_any_run() {
        let r = restrictions(&["*.nodes.example.com"]);

        assert!(r.matches("a.nodes.example.com"));
        assert!(r.matches("a.b.nodes.example.com"));
        assert!(!r.matches("nodes.example.com"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let r = restrictions(&["node(1).example.com"]);

        assert!(r.matches("node(1).example.com"));
        assert!(!r.matches("node1xexample.com"));
    }

    #[test]
    fn any_pattern_suffices() {
        let r = restrictions(&["a.example.com", "b.example.com"]);

        assert!(r.matches("b.example.com"));
    }

    #[test]
    fn empty_list_matches_nothing() {
        let r = restrictions(&[]);

        assert!(!r.matches("anything"));
    }
}

mod parsing {
    use super::*;

    #[test]
    fn parse_subject_names() {
        let r = TrustRestrictions::parse(
            r#"
            [trust]
            subject_name = ["*.example.com", "root"]
        "#,
        )
        .unwrap();

        assert_eq!(r.patterns(), ["*.example.com", "root"]);
    }

    #[test]
    fn missing_section_is_empty() {
        let r = TrustRestrictions::parse("").unwrap();

        assert!(r.patterns().is_empty());
    }

    #[test]
    fn unknown_keys_rejected() {
        let result = TrustRestrictions::parse(
            r#"
            [trust]
            issuer = ["x"]
        "#,
        );

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn equality_is_by_pattern() {
        assert_eq!(restrictions(&["a", "b"]), restrictions(&["a", "b"]));
        assert_ne!(restrictions(&["a", "b"]), restrictions(&["b", "a"]));
    }
}

mod loading {
    use super::*;

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("restrictions.toml");
        std::fs::write(&path, "[trust]\nsubject_name = [\"*.example.com\"]\n").unwrap();

        let r = TrustRestrictions::load(&path).unwrap();

        assert!(r.matches("node.example.com"));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");

        let result = TrustRestrictions::load(&path);

        assert!(matches!(result, Err(ConfigError::FileRead { path: p, .. }) if p == path));
    }
}
