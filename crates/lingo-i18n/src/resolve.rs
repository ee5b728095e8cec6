//! Fallback resolution of resource keys to templates

use crate::error::{I18nError, I18nResult};
use crate::language::LanguageCode;
use crate::repository::Repository;
use crate::template::Template;
use lingo_config::I18nConfig;
use std::borrow::Cow;
use tracing::{debug, warn};

/// How lookups behave when the requested language lacks a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackPolicy {
    /// Language used for selection fallback and, optionally, missing keys
    pub default_language: LanguageCode,
    /// Try the default language's entry before giving up on a key
    pub default_language_on_missing: bool,
    /// Render the key itself instead of failing
    pub allow_missing: bool,
}

impl FallbackPolicy {
    /// Build the policy from configuration
    pub fn from_config(config: &I18nConfig) -> I18nResult<Self> {
        Ok(Self {
            default_language: LanguageCode::parse(&config.default_language)?,
            default_language_on_missing: config.default_language_on_missing,
            allow_missing: config.allow_missing,
        })
    }
}

/// Which step of the fallback chain produced a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Entry of the requested language
    Exact,
    /// Entry of the requested language's short form
    ShortForm,
    /// Entry of the configured default language
    DefaultLanguage,
    /// Synthesized template rendering the key itself
    Placeholder,
}

/// Result of a successful lookup
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    pub template: Cow<'a, Template>,
    pub origin: Origin,
}

impl Resolved<'_> {
    pub fn is_placeholder(&self) -> bool {
        self.origin == Origin::Placeholder
    }
}

/// Find the template for `key`.
///
/// Tries the exact language, then its short form, then (if enabled) the
/// default language, then (if allowed) a placeholder rendering the key.
pub fn resolve<'a>(
    repository: &'a Repository,
    language: &LanguageCode,
    key: &str,
    policy: &FallbackPolicy,
) -> I18nResult<Resolved<'a>> {
    if let Some(template) = repository.get(language.as_str(), key) {
        return Ok(Resolved {
            template: Cow::Borrowed(template),
            origin: Origin::Exact,
        });
    }

    if let Some(template) = repository.get(language.short(), key) {
        debug!("'{}' resolved via short language '{}'", key, language.short());
        return Ok(Resolved {
            template: Cow::Borrowed(template),
            origin: Origin::ShortForm,
        });
    }

    if policy.default_language_on_missing {
        if let Some(template) = repository.get(policy.default_language.as_str(), key) {
            warn!(
                "'{}' not found for language '{}', falling back to default language '{}'",
                key, language, policy.default_language
            );
            return Ok(Resolved {
                template: Cow::Borrowed(template),
                origin: Origin::DefaultLanguage,
            });
        }
    }

    if policy.allow_missing {
        warn!("'{}.{}' not found, rendering the key instead", language, key);
        return Ok(Resolved {
            template: Cow::Owned(Template::constant(key)),
            origin: Origin::Placeholder,
        });
    }

    Err(I18nError::KeyNotFound {
        language: language.to_string(),
        key: key.to_string(),
    })
}

/// Pick the language a context should use.
///
/// Keeps the requested code when it or its short form is loaded, otherwise
/// substitutes the default. Unparseable codes count as absent.
pub fn select_language(
    repository: &Repository,
    requested: &str,
    default_language: &LanguageCode,
) -> LanguageCode {
    match LanguageCode::parse(requested) {
        Ok(code)
            if repository.has_language(code.as_str()) || repository.has_language(code.short()) =>
        {
            code
        }
        Ok(code) => {
            debug!(
                "Language '{}' is not loaded, using default '{}'",
                code, default_language
            );
            default_language.clone()
        }
        Err(_) => {
            debug!(
                "Unparseable language '{}', using default '{}'",
                requested, default_language
            );
            default_language.clone()
        }
    }
}
