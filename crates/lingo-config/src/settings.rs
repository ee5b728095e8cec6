//! Localization configuration structures

use crate::validation::normalize_language_code;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Field written into a caller's session to remember the chosen language
pub const DEFAULT_SESSION_FIELD: &str = "__language_code";

/// Localization settings shared by the repository, rendering contexts and
/// the parameter analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct I18nConfig {
    /// Language substituted when a requested language is unknown, and the
    /// reference language for completeness reports
    #[validate(regex(
        path = "crate::validation::LANGUAGE_CODE_REGEX",
        message = "Default language must be a lowercase language code such as 'en' or 'en-us'"
    ))]
    pub default_language: String,

    /// Render the bare resource key instead of failing when it is missing everywhere
    pub allow_missing: bool,

    /// Try the default language before giving up on a missing key
    pub default_language_on_missing: bool,

    /// Directory of `<language>.yaml|yml|json` files loaded at construction
    #[validate(custom(
        function = "crate::validation::validate_directory",
        message = "Locales directory contains invalid characters"
    ))]
    pub directory: Option<String>,

    /// Whether the language stored in the caller's session takes precedence
    pub use_session: bool,

    /// Session field holding the last known language code
    #[validate(length(min = 1, message = "Session field cannot be empty"))]
    pub session_field: String,

    /// Parameter names that are always supplied ambiently (e.g. helpers) and
    /// therefore never reported by the analyzer
    #[validate(custom(
        function = "crate::validation::validate_param_names",
        message = "Global parameter names must be identifiers"
    ))]
    pub global_params: Vec<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            allow_missing: true,
            default_language_on_missing: false,
            directory: None,
            use_session: false,
            session_field: DEFAULT_SESSION_FIELD.to_string(),
            global_params: vec!["pluralize".to_string()],
        }
    }
}

impl I18nConfig {
    /// Normalize free-form values (language code casing, separators)
    pub fn normalize(&mut self) {
        self.default_language = normalize_language_code(&self.default_language);
    }

    /// Normalize and validate all configuration sections
    pub fn validate_all(&mut self) -> Result<(), validator::ValidationErrors> {
        self.normalize();
        self.validate()
    }

    /// Builder-style override of the default language
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = normalize_language_code(&language.into());
        self
    }

    /// Builder-style override of the missing-key placeholder policy
    pub fn with_allow_missing(mut self, allow_missing: bool) -> Self {
        self.allow_missing = allow_missing;
        self
    }

    /// Builder-style override of the default-language key fallback
    pub fn with_default_language_on_missing(mut self, enabled: bool) -> Self {
        self.default_language_on_missing = enabled;
        self
    }

    /// Builder-style override of the locales directory
    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Builder-style override of session usage
    pub fn with_session(mut self, use_session: bool) -> Self {
        self.use_session = use_session;
        self
    }
}
