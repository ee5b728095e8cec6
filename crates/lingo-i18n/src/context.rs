//! Per-request rendering contexts
//!
//! A context binds a language and a set of ambient parameters (the built-in
//! helpers plus whatever the request supplies, e.g. the sender and chat) to
//! the repository shared with its manager, so languages loaded later are
//! visible to it. Rendering merges the ambient parameters with the call-site
//! parameters, call-site values winning on name clashes.

use crate::error::{I18nError, I18nResult};
use crate::language::LanguageCode;
use crate::repository::{Repository, SharedRepository};
use crate::resolve::{resolve, select_language, FallbackPolicy};
use crate::session::LanguageSession;
use crate::template::RenderScope;
use crate::value::{Params, Value};
use parking_lot::RwLockReadGuard;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::debug;

/// Rendering context for one request
#[derive(Debug, Clone)]
pub struct I18nContext {
    repository: SharedRepository,
    policy: Arc<FallbackPolicy>,
    language: LanguageCode,
    template_data: Params,
}

impl I18nContext {
    /// Create a context, selecting the language against the repository
    pub fn new(
        repository: SharedRepository,
        policy: Arc<FallbackPolicy>,
        requested_language: &str,
        template_data: Params,
    ) -> Self {
        let language = select_language(
            &repository.read(),
            requested_language,
            &policy.default_language,
        );
        debug!(
            "Created context for '{}' (requested '{}')",
            language, requested_language
        );

        Self {
            repository,
            policy,
            language,
            template_data,
        }
    }

    /// Current language code
    pub fn language(&self) -> &LanguageCode {
        &self.language
    }

    /// Short form of the current language code
    pub fn short_language(&self) -> &str {
        self.language.short()
    }

    /// Switch language, selecting against the repository as it is now
    pub fn set_language(&mut self, requested_language: &str) {
        self.language = select_language(
            &self.repository.read(),
            requested_language,
            &self.policy.default_language,
        );
        debug!("Context language set to '{}'", self.language);
    }

    /// Ambient parameters available to every render
    pub fn template_data(&self) -> &Params {
        &self.template_data
    }

    /// Add or replace an ambient parameter
    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.template_data.insert(name.into(), value.into());
    }

    /// Read access to the shared repository
    pub fn repository(&self) -> RwLockReadGuard<'_, Repository> {
        self.repository.read()
    }

    /// Render a resource key in the current language.
    ///
    /// The repository lock is released before evaluation, so helpers may
    /// render other keys through [`RenderScope::context`].
    pub fn render(&self, key: &str, params: Option<&Params>) -> I18nResult<String> {
        let template = {
            let repository = self.repository.read();
            let resolved = resolve(&repository, &self.language, key, &self.policy)?;
            resolved.template.into_owned()
        };

        let data: Cow<'_, Params> = match params {
            Some(params) if !params.is_empty() => {
                let mut merged = self.template_data.clone();
                merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
                Cow::Owned(merged)
            }
            _ => Cow::Borrowed(&self.template_data),
        };

        template
            .render(&data, &RenderScope::for_context(self))
            .map_err(|source| I18nError::TemplateEvaluation {
                language: self.language.to_string(),
                key: key.to_string(),
                source,
            })
    }

    /// Render a key without call-site parameters
    pub fn t(&self, key: &str) -> I18nResult<String> {
        self.render(key, None)
    }

    /// Render a key with call-site parameters
    pub fn t_with(&self, key: &str, params: &Params) -> I18nResult<String> {
        self.render(key, Some(params))
    }

    /// Whether `text` equals the rendered key; render failures never match
    pub fn matches(&self, text: &str, key: &str, params: Option<&Params>) -> bool {
        !text.is_empty() && self.render(key, params).is_ok_and(|rendered| rendered == text)
    }

    /// Write the current language into a session field
    pub fn store_in_session<S: LanguageSession + ?Sized>(&self, session: &mut S, field: &str) {
        session.set_language_code(field, self.language.as_str());
    }
}
