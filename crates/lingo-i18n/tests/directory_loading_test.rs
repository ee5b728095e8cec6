//! Tests for loading locale directories from disk

use lingo_common::test_utils::init_test_logging;
use lingo_i18n::{params, I18n, I18nConfig, I18nError};
use std::fs;
use tempfile::TempDir;

fn locales_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("en.yaml"),
        "greeting: Hello ${name}!\nmenu:\n  start: Start\n  help: Help\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("ru.json"),
        r#"{ "greeting": "Привет, ${name}!", "menu": { "start": "Старт" } }"#,
    )
    .unwrap();
    fs::write(dir.path().join("README.md"), "# Locales").unwrap();
    dir
}

#[test]
fn test_directory_from_config() {
    init_test_logging();
    let dir = locales_dir();
    let config = I18nConfig::default().with_directory(dir.path().to_string_lossy());

    let i18n = I18n::new(config).unwrap();
    assert_eq!(i18n.available_locales(), vec!["en", "ru"]);
    assert_eq!(i18n.resource_keys("en"), vec!["greeting", "menu.help", "menu.start"]);
    assert_eq!(i18n.missing_keys("ru", None), vec!["menu.help"]);

    let ctx = i18n.create_context("ru", params! {});
    assert_eq!(ctx.t("menu.start").unwrap(), "Старт");
}

#[test]
fn test_missing_directory_is_an_error() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let config =
        I18nConfig::default().with_directory(dir.path().join("nope").to_string_lossy());

    let err = I18n::new(config).unwrap_err();
    assert!(matches!(err, I18nError::RepositoryLoad { .. }));
}

#[test]
fn test_reload_merges_with_existing_entries() {
    init_test_logging();
    let dir = locales_dir();
    let mut i18n = I18n::new(I18nConfig::default()).unwrap();
    i18n.load_locale("en", &serde_json::json!({ "only_here": "Kept" }))
        .unwrap();

    let loaded = i18n.load_locales(dir.path()).unwrap();
    assert_eq!(loaded, 2);

    let ctx = i18n.create_context("en", params! {});
    assert_eq!(ctx.t("only_here").unwrap(), "Kept");
    assert_eq!(ctx.t_with("greeting", &params! { "name" => "Ann" }).unwrap(), "Hello Ann!");
}

#[test]
fn test_syntax_error_keeps_prior_language_state() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("en.yaml"), "greeting: Hi\nbroken: Hello ${name\n").unwrap();

    let mut i18n = I18n::new(I18nConfig::default()).unwrap();
    i18n.load_locale("en", &serde_json::json!({ "greeting": "Hello" }))
        .unwrap();

    let err = i18n.load_locales(dir.path()).unwrap_err();
    assert!(matches!(err, I18nError::RepositoryLoad { .. }));

    assert_eq!(i18n.resource_keys("en"), vec!["greeting"]);
    let ctx = i18n.create_context("en", params! {});
    assert_eq!(ctx.t("greeting").unwrap(), "Hello");
}

#[test]
fn test_failing_file_leaves_every_language_untouched() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("en.json"), r#"{ "greeting": "Hi", "new_key": "New" }"#).unwrap();
    fs::write(dir.path().join("en.yaml"), "farewell: Bye ${name\n").unwrap();
    fs::write(dir.path().join("ru.json"), r#"{ "greeting": "Привет" }"#).unwrap();

    let mut i18n = I18n::new(I18nConfig::default()).unwrap();
    i18n.load_locale("en", &serde_json::json!({ "greeting": "Hello" }))
        .unwrap();
    let ctx = i18n.create_context("en", params! {});

    assert!(i18n.load_locales(dir.path()).is_err());

    assert_eq!(i18n.available_locales(), vec!["en"]);
    assert_eq!(i18n.resource_keys("en"), vec!["greeting"]);
    assert_eq!(ctx.t("greeting").unwrap(), "Hello");
}
