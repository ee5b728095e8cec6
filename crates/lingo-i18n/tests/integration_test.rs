//! Integration tests for lingo-i18n.
//!
//! These exercise the manager, contexts and fallback chain end to end.

use lingo_common::test_utils::init_test_logging;
use lingo_i18n::{params, I18n, I18nConfig, I18nError};
use proptest::prelude::*;
use serde_json::json;
use std::collections::BTreeMap;

fn manager(config: I18nConfig) -> I18n {
    init_test_logging();
    let mut i18n = I18n::new(config).unwrap();
    i18n.load_locale(
        "en",
        &json!({
            "greeting": "Hello ${name}!",
            "farewell": "Goodbye",
            "profile": { "title": "${user.first_name}'s profile" },
        }),
    )
    .unwrap();
    i18n.load_locale("ru", &json!({ "greeting": "Привет, ${name}!" }))
        .unwrap();
    i18n
}

#[test]
fn test_render_with_params() {
    let i18n = manager(I18nConfig::default());
    let ctx = i18n.create_context("en", params! {});

    assert_eq!(
        ctx.t_with("greeting", &params! { "name" => "Ann" }).unwrap(),
        "Hello Ann!"
    );
    assert_eq!(
        ctx.t_with(
            "profile.title",
            &params! { "user" => params! { "first_name" => "Ann" } }
        )
        .unwrap(),
        "Ann's profile"
    );
}

#[test]
fn test_short_form_fallback() {
    let i18n = manager(I18nConfig::default());
    let ctx = i18n.create_context("en-US", params! {});

    assert_eq!(ctx.language().as_str(), "en-us");
    assert_eq!(ctx.t("farewell").unwrap(), "Goodbye");
}

#[test]
fn test_unknown_language_uses_default() {
    let i18n = manager(I18nConfig::default());
    let ctx = i18n.create_context("fr", params! {});

    assert_eq!(ctx.language().as_str(), "en");
    assert_eq!(ctx.short_language(), "en");
    assert_eq!(ctx.t("farewell").unwrap(), "Goodbye");
}

#[test]
fn test_missing_key_renders_key() {
    let i18n = manager(I18nConfig::default());
    let ctx = i18n.create_context("ru", params! {});
    assert_eq!(ctx.t("checkout").unwrap(), "checkout");
}

#[test]
fn test_default_language_fallback_enabled() {
    let config = I18nConfig::default()
        .with_allow_missing(false)
        .with_default_language_on_missing(true);
    let i18n = manager(config);
    let ctx = i18n.create_context("ru", params! {});

    assert_eq!(ctx.t("farewell").unwrap(), "Goodbye");
}

#[test]
fn test_default_language_fallback_disabled() {
    let config = I18nConfig::default()
        .with_allow_missing(false)
        .with_default_language_on_missing(false);
    let i18n = manager(config);
    let ctx = i18n.create_context("ru", params! {});

    let err = ctx.t("farewell").unwrap_err();
    assert!(matches!(err, I18nError::KeyNotFound { .. }));
    assert_eq!(err.to_string(), "'ru.farewell' not found");
}

#[test]
fn test_both_flags_prefer_default_language() {
    let config = I18nConfig::default()
        .with_allow_missing(true)
        .with_default_language_on_missing(true);
    let i18n = manager(config);
    let ctx = i18n.create_context("ru", params! {});

    assert_eq!(ctx.t("farewell").unwrap(), "Goodbye");
    assert_eq!(ctx.t("checkout").unwrap(), "checkout");
}

#[test]
fn test_render_error_leaves_template_usable() {
    let i18n = manager(I18nConfig::default());
    let ctx = i18n.create_context("en", params! {});

    let err = ctx.t("greeting").unwrap_err();
    assert!(matches!(err, I18nError::TemplateEvaluation { .. }));
    assert_eq!(
        ctx.t_with("greeting", &params! { "name" => "Bo" }).unwrap(),
        "Hello Bo!"
    );
}

#[test]
fn test_completeness_report() {
    init_test_logging();
    let mut i18n = I18n::new(I18nConfig::default()).unwrap();

    let en: BTreeMap<String, String> = (0..10)
        .map(|i| (format!("key{i}"), format!("English {i}")))
        .collect();
    let ru: BTreeMap<String, String> = (0..7)
        .map(|i| (format!("key{i}"), format!("Русский {i}")))
        .collect();
    i18n.load_flat("en", &en).unwrap();
    i18n.load_flat("ru", &ru).unwrap();

    assert_eq!(i18n.missing_keys("ru", None), vec!["key7", "key8", "key9"]);
    assert!(i18n.overspecified_keys("ru", None).is_empty());
    assert!((i18n.translation_progress("ru", None) - 0.7).abs() < 1e-9);
}

#[test]
fn test_one_shot_render_and_matching() {
    let i18n = manager(I18nConfig::default());

    assert_eq!(
        i18n.t("ru-RU", "greeting", &params! { "name" => "Аня" }).unwrap(),
        "Привет, Аня!"
    );

    let ctx = i18n.create_context("en", params! {});
    assert!(ctx.matches("Goodbye", "farewell", None));
    assert!(!ctx.matches("Hello!", "farewell", None));
}

#[test]
fn test_ambient_request_data() {
    let mut i18n = manager(I18nConfig::default());
    i18n.load_locale("en", &json!({ "whoami": "You are ${from.username}" }))
        .unwrap();

    let ctx = i18n.context_for_request::<serde_json::Map<String, serde_json::Value>>(
        None,
        Some("en-GB"),
        params! { "from" => json!({ "username": "ann42" }) },
    );
    assert_eq!(ctx.t("whoami").unwrap(), "You are ann42");
}

#[test]
fn test_pluralize_by_language() {
    init_test_logging();
    let mut i18n = I18n::new(I18nConfig::default()).unwrap();
    i18n.load_locale(
        "en",
        &json!({ "files": "${n} ${pluralize(n, 'file', 'files')}" }),
    )
    .unwrap();
    i18n.load_locale(
        "ru",
        &json!({ "files": "${n} ${pluralize(n, 'файл', 'файла', 'файлов')}" }),
    )
    .unwrap();

    let render = |lang: &str, n: i64| i18n.t(lang, "files", &params! { "n" => n }).unwrap();
    assert_eq!(render("en", 1), "1 file");
    assert_eq!(render("en", 2), "2 files");
    assert_eq!(render("ru", 1), "1 файл");
    assert_eq!(render("ru", 3), "3 файла");
    assert_eq!(render("ru", 11), "11 файлов");
}

proptest! {
    #[test]
    fn test_literal_templates_pass_through(
        entries in prop::collection::btree_map("[a-z]{1,8}", "[^$]{0,40}", 1..8)
    ) {
        let mut i18n = I18n::new(I18nConfig::default()).unwrap();
        i18n.load_flat("en", &entries).unwrap();
        let ctx = i18n.create_context("en", params! {});

        for (key, text) in &entries {
            prop_assert_eq!(&ctx.t(key).unwrap(), text);
            prop_assert_eq!(&ctx.t_with(key, &params! { "name" => "x" }).unwrap(), text);
        }
    }
}
