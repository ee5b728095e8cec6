//! Localized text resolution for conversational bots
//!
//! This crate stores compiled `${...}` interpolation templates per language and
//! resolves them through a fallback chain. It includes:
//!
//! - Language code normalization and short forms (`en-us` -> `en`)
//! - A small template compiler and interpreter (identifiers, property access, calls)
//! - The locale repository and its fallback resolution engine
//! - Per-request rendering contexts with ambient parameters and helpers
//! - Directory loading of YAML/JSON locale files and session glue
//!
//! # Example
//!
//! ```rust
//! use lingo_i18n::{params, I18n, I18nConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut i18n = I18n::new(I18nConfig::default())?;
//! i18n.load_locale("en", &serde_json::json!({ "greeting": "Hello ${name}!" }))?;
//!
//! let ctx = i18n.create_context("en-US", params! {});
//! assert_eq!(ctx.t_with("greeting", &params! { "name" => "Ann" })?, "Hello Ann!");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod context;
pub mod error;
pub mod flatten;
pub mod language;
pub mod manager;
pub mod pluralization;
pub mod repository;
pub mod resolve;
pub mod resource;
pub mod session;
pub mod template;
pub mod value;

pub use context::I18nContext;
pub use error::{I18nError, I18nResult};
pub use flatten::flatten_definitions;
pub use language::LanguageCode;
pub use manager::I18n;
pub use pluralization::PluralRule;
pub use repository::{Repository, SharedRepository};
pub use resolve::{resolve, select_language, FallbackPolicy, Origin, Resolved};
pub use resource::ResourceLoader;
pub use session::LanguageSession;
pub use template::{compile, EvalError, RenderScope, SyntaxError, Template};
pub use value::{Helper, Params, Value};

// Re-export the configuration type the manager is built from
pub use lingo_config::I18nConfig;
