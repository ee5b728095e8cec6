//! Integration tests for lingo-config

use lingo_common::LingoError;
use lingo_config::{ConfigLoader, I18nConfig};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_from_file_round_trips_through_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("lingo.yaml");

    let config = I18nConfig::default()
        .with_default_language("fr")
        .with_default_language_on_missing(true)
        .with_directory("locales");
    fs::write(&path, serde_yaml::to_string(&config).unwrap()).unwrap();

    let loaded = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(loaded.default_language, "fr");
    assert!(loaded.default_language_on_missing);
    assert_eq!(loaded.directory.as_deref(), Some("locales"));
}

#[test]
fn test_load_from_file_reports_lingo_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("lingo.yaml");
    fs::write(&path, "default_language: \"not valid!\"\n").unwrap();

    let err = ConfigLoader::load_from_file(&path).unwrap_err();
    assert!(matches!(err, LingoError::Config { .. }));
}
