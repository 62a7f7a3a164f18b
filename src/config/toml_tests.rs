//! Tests for TOML configuration parsing.

use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.resolve.strategy.is_none());
        assert!(!config.resolve.host_fallback);
        assert!(config.ifconfig.program.is_none());
        assert!(config.ifconfig.args.is_empty());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn parse_resolve_section() {
        let toml = r#"
            [resolve]
            strategy = "ifconfig"
            host_fallback = true
            hostname = "web01.example.com"
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        let resolve = &config.resolve;

        assert_eq!(resolve.strategy.as_deref(), Some("ifconfig"));
        assert!(resolve.host_fallback);
        assert_eq!(resolve.hostname.as_deref(), Some("web01.example.com"));
    }

    #[test]
    fn parse_ifconfig_section() {
        let toml = r#"
            [ifconfig]
            program = "/usr/sbin/ifconfig"
            args = ["-a"]
            input = "~/ifconfig.txt"
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        let ifconfig = &config.ifconfig;

        assert_eq!(ifconfig.program.as_deref(), Some("/usr/sbin/ifconfig"));
        assert_eq!(ifconfig.args, vec!["-a"]);
        assert_eq!(ifconfig.input.as_deref(), Some("~/ifconfig.txt"));
    }

    #[test]
    fn parse_output_section() {
        let toml = r#"
            [output]
            format = "json"
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        assert_eq!(config.output.format.as_deref(), Some("json"));
    }

    #[test]
    fn values_are_kept_verbatim_for_validation() {
        // Unknown enum values are rejected later, with a clearer error
        let toml = r#"
            [resolve]
            strategy = "wmi"
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        assert_eq!(config.resolve.strategy.as_deref(), Some("wmi"));
    }
}

mod errors {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn unknown_section_is_rejected() {
        let toml = r#"
            [webhook]
            url = "https://example.com"
        "#;

        assert!(matches!(
            TomlConfig::parse(toml),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let toml = r#"
            [ifconfig]
            programme = "/sbin/ifconfig"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn wrong_type_is_rejected() {
        let toml = r#"
            [resolve]
            host_fallback = "yes"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn invalid_syntax_is_rejected() {
        assert!(TomlConfig::parse("[resolve").is_err());
    }

    #[test]
    fn load_missing_file_is_file_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        assert!(matches!(
            TomlConfig::load(&path),
            Err(ConfigError::FileRead { .. })
        ));
    }
}

mod loading {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nformat = \"json\"").unwrap();

        let config = TomlConfig::load(file.path()).unwrap();
        assert_eq!(config.output.format.as_deref(), Some("json"));
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses() {
        let template = default_config_template();
        let config = TomlConfig::parse(&template).unwrap();

        // Everything is commented out, so built-in defaults apply
        assert!(config.resolve.strategy.is_none());
        assert!(!config.resolve.host_fallback);
        assert!(config.output.format.is_none());
    }

    #[test]
    fn default_template_documents_every_section() {
        let template = default_config_template();

        assert!(template.contains("[resolve]"));
        assert!(template.contains("[ifconfig]"));
        assert!(template.contains("[output]"));
        assert!(template.contains("host_fallback"));
    }
}
