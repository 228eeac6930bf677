#![cfg(test)]

use crate::config::config::{Config, ConfigError};
use chrono::NaiveDate;

#[test]
fn test_basic_config() {
    let toml = r#"
        [mapping]
        organization_system = "http://example.sl/organizations"
        identifier_system = "http://example.sl/national-patient-id"
        organization_code_prefix = "OU_"
        given_delimiter = " "
        line_delimiter = ", "
        reference_date = "2024-06-01"

        [organization_units]
        "OU_PHL-D-1" = "ldXIdLNUNEn"

        [logging]
        log_to_file = false
        log_level = "debug"
    "#;

    let result = Config::from_toml_str(toml);
    assert!(result.is_ok(), "Configuration should parse and validate");
    let config = result.unwrap();

    assert_eq!(config.mapping.organization_system, "http://example.sl/organizations");
    assert_eq!(config.mapping.organization_code_prefix, "OU_");
    assert_eq!(config.mapping.line_delimiter, ", ");
    assert_eq!(
        config.mapping.reference_date,
        NaiveDate::from_ymd_opt(2024, 6, 1)
    );
    assert_eq!(config.organization_units["OU_PHL-D-1"], "ldXIdLNUNEn");
    assert_eq!(config.logging.log_level, "debug");
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config.mapping.organization_system, "http://example.ph/organizations");
    assert_eq!(
        config.mapping.identifier_system,
        "http://example.ph/national-patient-id"
    );
    assert_eq!(config.mapping.given_delimiter, " ");
    assert!(config.mapping.reference_date.is_none());
    assert!(config.organization_units.is_empty());
    assert_eq!(config.logging.log_level, "info");
    assert!(!config.logging.log_to_file);
}

#[test]
fn test_blank_system_uri_fails() {
    let toml = r#"
        [mapping]
        identifier_system = "  "
    "#;
    match Config::from_toml_str(toml) {
        Err(ConfigError::InvalidSystemUri { name, .. }) => assert_eq!(name, "identifier_system"),
        other => panic!("expected InvalidSystemUri, got {:?}", other),
    }
}

#[test]
fn test_system_uri_without_scheme_fails() {
    let toml = r#"
        [mapping]
        organization_system = "organizations"
    "#;
    assert!(matches!(
        Config::from_toml_str(toml),
        Err(ConfigError::InvalidSystemUri { .. })
    ));
}

#[test]
fn test_empty_delimiter_fails() {
    let toml = r#"
        [mapping]
        line_delimiter = ""
    "#;
    match Config::from_toml_str(toml) {
        Err(ConfigError::EmptyDelimiter(name)) => assert_eq!(name, "line_delimiter"),
        other => panic!("expected EmptyDelimiter, got {:?}", other),
    }
}

#[test]
fn test_blank_organization_unit_fails() {
    let toml = r#"
        [organization_units]
        "PHL-D-1" = ""
    "#;
    match Config::from_toml_str(toml) {
        Err(ConfigError::InvalidOrganizationUnit { code }) => assert_eq!(code, "PHL-D-1"),
        other => panic!("expected InvalidOrganizationUnit, got {:?}", other),
    }
}

#[test]
fn test_toml_syntax_error_is_parse_error() {
    assert!(matches!(
        Config::from_toml_str("[mapping"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_log_to_file_without_path_fails() {
    let toml = r#"
        [logging]
        log_to_file = true
    "#;
    assert!(matches!(
        Config::from_toml_str(toml),
        Err(ConfigError::MissingLogFilePath)
    ));

    let toml = r#"
        [logging]
        log_to_file = true
        log_file_path = "/var/log/patient-map.log"
    "#;
    let config = Config::from_toml_str(toml).unwrap();
    assert_eq!(config.logging.log_file_path, "/var/log/patient-map.log");
}
