//! Demonstration of per-request contexts and language fallback
//!
//! Run with `RUST_LOG=debug` to see the fallback decisions being logged.

use anyhow::Context as _;
use lingo_i18n::{params, I18n, I18nConfig, LanguageSession};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    lingo_common::init_dev_logging()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    let config = I18nConfig::default()
        .with_session(true)
        .with_default_language_on_missing(true);
    let mut i18n = I18n::new(config).context("creating i18n manager")?;

    i18n.load_locale(
        "en",
        &json!({
            "greeting": "Hello ${from.first_name}!",
            "cart": {
                "items": "You have ${count} ${pluralize(count, 'item', 'items')}",
                "checkout": "Checkout",
            },
        }),
    )?;
    i18n.load_locale(
        "ru",
        &json!({
            "greeting": "Привет, ${from.first_name}!",
            "cart": {
                "items": "У вас ${count} ${pluralize(count, 'товар', 'товара', 'товаров')}",
            },
        }),
    )?;

    println!("=== Context-Aware Rendering Demo ===\n");

    let mut session = serde_json::Map::new();
    let from = json!({ "first_name": "Anna", "language_code": "ru-RU" });

    let mut ctx = i18n.context_for_request(
        Some(&session),
        from["language_code"].as_str(),
        params! { "from" => from.clone() },
    );
    println!("Language: {} (short: {})", ctx.language(), ctx.short_language());
    println!("  {}", ctx.t("greeting")?);
    for count in [1, 3, 11] {
        println!("  {}", ctx.t_with("cart.items", &params! { "count" => count })?);
    }
    println!("  {}", ctx.t("cart.checkout")?);

    ctx.set_language("en");
    i18n.store_language(&ctx, &mut session);
    println!(
        "\nStored language in session: {:?}",
        session.language_code(&i18n.config().session_field)
    );

    let ctx = i18n.context_for_request(Some(&session), Some("ru"), params! { "from" => from });
    println!("Language: {}", ctx.language());
    println!("  {}", ctx.t("greeting")?);
    println!("  {}", ctx.t_with("cart.items", &params! { "count" => 1 })?);

    println!(
        "\nTranslation progress of 'ru': {:.0}%",
        i18n.translation_progress("ru", None) * 100.0
    );
    println!("Missing in 'ru': {:?}", i18n.missing_keys("ru", None));

    Ok(())
}
