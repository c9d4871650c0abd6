//! Configuration loading from files and the environment

use std::io::Write;

use paygate_core::{GatewayConfig, GatewayError};
use pretty_assertions::assert_eq;

const PAYGATE_VARS: [&str; 4] = [
    "PAYGATE_API_SECRET",
    "PAYGATE_API_VERSION",
    "PAYGATE_ACCOUNT",
    "PAYGATE_EXTRA__STATEMENT_DESCRIPTOR",
];

fn toml_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes()).expect("Failed to write config");
    file
}

#[test]
fn test_load_from_file() {
    let file = toml_file(
        r#"
api_secret = "sk_test_file"
api_version = "2020-08-27"

[extra]
statement_descriptor = "PAYGATE"
"#,
    );

    temp_env::with_vars_unset(PAYGATE_VARS, || {
        let config = GatewayConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.api_secret(), Some("sk_test_file"));
        assert_eq!(config.api_version.as_deref(), Some("2020-08-27"));
        assert_eq!(config.api_base, None);
        assert_eq!(
            config.extra.get("statement_descriptor").map(String::as_str),
            Some("PAYGATE")
        );
    });
}

#[test]
fn test_environment_overrides_file() {
    let file = toml_file("api_secret = \"sk_test_file\"\naccount = \"acct_file\"\n");

    temp_env::with_vars(
        [
            ("PAYGATE_API_SECRET", Some("sk_test_env")),
            ("PAYGATE_API_VERSION", None),
            ("PAYGATE_ACCOUNT", None),
            ("PAYGATE_EXTRA__STATEMENT_DESCRIPTOR", Some("FROM ENV")),
        ],
        || {
            let config = GatewayConfig::load(Some(file.path())).unwrap();

            assert_eq!(config.api_secret(), Some("sk_test_env"));
            assert_eq!(config.account.as_deref(), Some("acct_file"));
            assert_eq!(
                config.extra.get("statement_descriptor").map(String::as_str),
                Some("FROM ENV")
            );
        },
    );
}

#[test]
fn test_empty_environment_yields_defaults() {
    temp_env::with_vars_unset(PAYGATE_VARS, || {
        let config = GatewayConfig::from_env().unwrap();
        assert_eq!(config, GatewayConfig::default());
        assert!(config.api_secret().is_none());
    });
}

#[test]
fn test_missing_file_is_a_configuration_error() {
    let missing = std::env::temp_dir().join("paygate-does-not-exist.toml");

    let err = GatewayConfig::load(Some(&missing)).unwrap_err();
    assert!(matches!(err, GatewayError::Configuration { .. }));
}
