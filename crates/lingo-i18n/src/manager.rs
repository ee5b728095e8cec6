//! Internationalization manager

use crate::context::I18nContext;
use crate::error::I18nResult;
use crate::flatten::flatten_definitions;
use crate::language::LanguageCode;
use crate::pluralization::{pluralize_helper, PLURALIZE_HELPER};
use crate::repository::{Repository, SharedRepository};
use crate::resolve::FallbackPolicy;
use crate::resource::ResourceLoader;
use crate::session::LanguageSession;
use crate::value::{Params, Value};
use lingo_config::validation::normalize_language_code;
use lingo_config::I18nConfig;
use parking_lot::RwLockReadGuard;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Owns the locale repository and hands out rendering contexts.
///
/// Loading and resetting go through `&mut self` and update the repository
/// in place: contexts already handed out see the change on their next
/// render or language switch. Clones of a manager share one repository.
#[derive(Debug, Clone)]
pub struct I18n {
    config: I18nConfig,
    policy: Arc<FallbackPolicy>,
    repository: SharedRepository,
    /// Ambient parameters bound into every context (the built-in helpers)
    template_data: Params,
}

impl I18n {
    /// Create a manager, loading `config.directory` when set
    pub fn new(mut config: I18nConfig) -> I18nResult<Self> {
        config.normalize();
        let policy = FallbackPolicy::from_config(&config)?;

        let mut template_data = Params::new();
        template_data.insert(PLURALIZE_HELPER.to_string(), pluralize_helper().into());

        let mut manager = Self {
            config,
            policy: Arc::new(policy),
            repository: Repository::new().into_shared(),
            template_data,
        };

        if let Some(directory) = manager.config.directory.clone() {
            manager.load_locales(directory)?;
        }

        info!(
            "I18n initialized with default language: {}",
            manager.policy.default_language
        );
        Ok(manager)
    }

    pub fn config(&self) -> &I18nConfig {
        &self.config
    }

    pub fn policy(&self) -> &FallbackPolicy {
        &self.policy
    }

    /// Read access to the shared repository
    pub fn repository(&self) -> RwLockReadGuard<'_, Repository> {
        self.repository.read()
    }

    /// Add or replace an ambient parameter bound into every new context
    pub fn set_template_data(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.template_data.insert(name.into(), value.into());
    }

    /// Load nested definitions for a language, merging with what is stored
    pub fn load_locale(&mut self, language: &str, definitions: &serde_json::Value) -> I18nResult<usize> {
        self.load_flat(language, &flatten_definitions(definitions))
    }

    /// Load already flattened definitions for a language
    pub fn load_flat(
        &mut self,
        language: &str,
        definitions: &BTreeMap<String, String>,
    ) -> I18nResult<usize> {
        let code = LanguageCode::parse(language)?;
        debug!("Loading locale: {}", code);
        self.repository.write().load(&code, definitions)
    }

    /// Load every `<language>.yaml|yml|json` file of a directory.
    ///
    /// All files are compiled before anything is stored: if one of them
    /// fails, no language is changed. Returns the number of files loaded.
    pub fn load_locales<P: AsRef<Path>>(&mut self, directory: P) -> I18nResult<usize> {
        let files = ResourceLoader::new(directory.as_ref()).load_all()?;

        let mut repository = self.repository.write();
        let mut staged = repository.clone();
        for file in &files {
            staged.load_definitions(&file.language, &file.definitions)?;
        }
        *repository = staged;
        drop(repository);

        info!(
            "Loaded {} locale files from {:?}",
            files.len(),
            directory.as_ref()
        );
        Ok(files.len())
    }

    /// Drop one language, or all of them when `language` is `None`
    pub fn reset_locale(&mut self, language: Option<&str>) -> I18nResult<()> {
        let code = language.map(LanguageCode::parse).transpose()?;
        self.repository.write().reset(code.as_ref());
        Ok(())
    }

    /// Create a context for a requested language with extra ambient parameters
    pub fn create_context(&self, language: &str, template_data: Params) -> I18nContext {
        let mut data = self.template_data.clone();
        data.extend(template_data);
        I18nContext::new(
            Arc::clone(&self.repository),
            Arc::clone(&self.policy),
            language,
            data,
        )
    }

    /// Create a context for an incoming request.
    ///
    /// The language comes from the session field (when sessions are
    /// enabled), else the user's reported language, else the default.
    pub fn context_for_request<S: LanguageSession + ?Sized>(
        &self,
        session: Option<&S>,
        user_language: Option<&str>,
        template_data: Params,
    ) -> I18nContext {
        let from_session = session
            .filter(|_| self.config.use_session)
            .and_then(|s| s.language_code(&self.config.session_field));

        let language = from_session
            .as_deref()
            .or(user_language)
            .unwrap_or(self.policy.default_language.as_str())
            .to_string();

        self.create_context(&language, template_data)
    }

    /// Remember a context's final language in the session (when enabled)
    pub fn store_language<S: LanguageSession + ?Sized>(&self, context: &I18nContext, session: &mut S) {
        if self.config.use_session {
            context.store_in_session(session, &self.config.session_field);
        }
    }

    /// Render a key in a language; `params` double as ambient data
    pub fn t(&self, language: &str, key: &str, params: &Params) -> I18nResult<String> {
        self.create_context(language, params.clone()).t_with(key, params)
    }

    /// Loaded language codes in sorted order
    pub fn available_locales(&self) -> Vec<String> {
        self.repository.read().languages().map(ToString::to_string).collect()
    }

    /// Resource keys of a language in sorted order
    pub fn resource_keys(&self, language: &str) -> Vec<String> {
        self.repository
            .read()
            .resource_keys(&normalize_language_code(language))
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Keys present in the reference language but absent from `language`.
    ///
    /// The reference defaults to the configured default language.
    pub fn missing_keys(&self, language: &str, reference: Option<&str>) -> Vec<String> {
        let interest = self.resource_keys(language);
        self.resource_keys(self.reference_language(reference))
            .into_iter()
            .filter(|key| interest.binary_search(key).is_err())
            .collect()
    }

    /// Keys present in `language` but absent from the reference language
    pub fn overspecified_keys(&self, language: &str, reference: Option<&str>) -> Vec<String> {
        self.missing_keys(self.reference_language(reference), Some(language))
    }

    /// Share of reference keys that `language` covers, in `0.0..=1.0`.
    ///
    /// An empty reference language yields `0.0`.
    pub fn translation_progress(&self, language: &str, reference: Option<&str>) -> f64 {
        let reference_count = self.resource_keys(self.reference_language(reference)).len();
        if reference_count == 0 {
            return 0.0;
        }
        let missing = self.missing_keys(language, reference).len();
        (reference_count - missing) as f64 / reference_count as f64
    }

    fn reference_language<'a>(&'a self, reference: Option<&'a str>) -> &'a str {
        reference.unwrap_or(self.policy.default_language.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;
    use serde_json::json;

    fn manager() -> I18n {
        let mut i18n = I18n::new(I18nConfig::default()).unwrap();
        i18n.load_locale("en", &json!({ "a": "A", "b": "B", "c": { "d": "D" } }))
            .unwrap();
        i18n.load_locale("RU", &json!({ "a": "А", "extra": "Лишнее" }))
            .unwrap();
        i18n
    }

    #[test]
    fn test_available_locales_and_keys() {
        let i18n = manager();
        assert_eq!(i18n.available_locales(), vec!["en", "ru"]);
        assert_eq!(i18n.resource_keys("EN"), vec!["a", "b", "c.d"]);
        assert!(i18n.resource_keys("de").is_empty());
    }

    #[test]
    fn test_missing_and_overspecified() {
        let i18n = manager();
        assert_eq!(i18n.missing_keys("ru", None), vec!["b", "c.d"]);
        assert_eq!(i18n.overspecified_keys("ru", None), vec!["extra"]);
        assert_eq!(i18n.missing_keys("en", Some("ru")), vec!["extra"]);
    }

    #[test]
    fn test_translation_progress() {
        let i18n = manager();
        assert!((i18n.translation_progress("ru", None) - 1.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(i18n.translation_progress("en", None), 1.0);
        assert_eq!(i18n.translation_progress("ru", Some("de")), 0.0);
    }

    #[test]
    fn test_reset_locale() {
        let mut i18n = manager();
        i18n.reset_locale(Some("RU")).unwrap();
        assert_eq!(i18n.available_locales(), vec!["en"]);

        i18n.reset_locale(None).unwrap();
        assert!(i18n.available_locales().is_empty());
    }

    #[test]
    fn test_contexts_see_later_loads() {
        let mut i18n = manager();
        let mut ctx = i18n.create_context("en", params! {});

        i18n.load_locale("en", &json!({ "a": "changed" })).unwrap();
        assert_eq!(ctx.t("a").unwrap(), "changed");

        i18n.load_locale("fr", &json!({ "hi": "Bonjour" })).unwrap();
        ctx.set_language("fr");
        assert_eq!(ctx.language().as_str(), "fr");
        assert_eq!(ctx.t("hi").unwrap(), "Bonjour");

        i18n.reset_locale(Some("fr")).unwrap();
        ctx.set_language("fr");
        assert_eq!(ctx.language().as_str(), "en");
    }

    #[test]
    fn test_pluralize_is_ambient() {
        let mut i18n = I18n::new(I18nConfig::default()).unwrap();
        i18n.load_locale(
            "en",
            &json!({ "apples": "${count} ${pluralize(count, 'apple', 'apples')}" }),
        )
        .unwrap();

        assert_eq!(i18n.t("en", "apples", &params! { "count" => 1 }).unwrap(), "1 apple");
        assert_eq!(i18n.t("en", "apples", &params! { "count" => 4 }).unwrap(), "4 apples");
    }

    #[test]
    fn test_context_for_request() {
        let mut i18n = I18n::new(I18nConfig::default().with_session(true)).unwrap();
        i18n.load_locale("en", &json!({ "a": "A" })).unwrap();
        i18n.load_locale("ru", &json!({ "a": "А" })).unwrap();

        let mut session = serde_json::Map::new();
        let ctx = i18n.context_for_request(Some(&session), Some("ru"), params! {});
        assert_eq!(ctx.language().as_str(), "ru");

        session.set_language_code("__language_code", "en");
        let mut ctx = i18n.context_for_request(Some(&session), Some("ru"), params! {});
        assert_eq!(ctx.language().as_str(), "en");

        ctx.set_language("ru");
        i18n.store_language(&ctx, &mut session);
        assert_eq!(session.language_code("__language_code").as_deref(), Some("ru"));

        let ctx = i18n.context_for_request::<serde_json::Map<String, serde_json::Value>>(None, None, params! {});
        assert_eq!(ctx.language().as_str(), "en");
    }

    #[test]
    fn test_session_ignored_when_disabled() {
        let mut i18n = manager();
        let mut session = serde_json::Map::new();
        session.set_language_code("__language_code", "en");

        let ctx = i18n.context_for_request(Some(&session), Some("ru"), params! {});
        assert_eq!(ctx.language().as_str(), "ru");

        i18n.store_language(&ctx, &mut session);
        assert_eq!(session.language_code("__language_code").as_deref(), Some("en"));

        i18n.set_template_data("bot", "lingo");
        assert!(i18n.create_context("en", params! {}).template_data().contains_key("bot"));
    }

    #[test]
    fn test_invalid_language_rejected() {
        let mut i18n = manager();
        assert!(i18n.load_locale("not a code", &json!({ "a": "A" })).is_err());
        assert!(I18n::new(I18nConfig::default().with_default_language("???")).is_err());
    }
}
