//! Error types for localization operations

use crate::template::EvalError;
use lingo_common::LingoError;
use thiserror::Error;

/// Errors that can occur while loading, resolving or rendering localized text
#[derive(Error, Debug)]
pub enum I18nError {
    /// Failed to parse a language code
    #[error("Invalid language code: {0}")]
    InvalidLanguageCode(String),

    /// A locale source was absent or malformed; the repository keeps its
    /// previous state for the affected language
    #[error("Failed to load locale resources from {source_name}: {reason}")]
    RepositoryLoad {
        source_name: String,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The fallback chain was exhausted and missing keys are not allowed
    #[error("'{language}.{key}' not found")]
    KeyNotFound { language: String, key: String },

    /// A template failed while evaluating against the supplied parameters
    #[error("'{language}.{key}' failed to render: {source}")]
    TemplateEvaluation {
        language: String,
        key: String,
        #[source]
        source: EvalError,
    },

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl I18nError {
    /// Create a load error without an underlying cause
    pub fn load(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RepositoryLoad {
            source_name: source_name.into(),
            reason: reason.into(),
            source: None,
        }
    }

    /// Create a load error wrapping an underlying cause
    pub fn load_with_source(
        source_name: impl Into<String>,
        reason: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::RepositoryLoad {
            source_name: source_name.into(),
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Language the error refers to, when there is one
    pub fn language(&self) -> Option<&str> {
        match self {
            Self::KeyNotFound { language, .. } | Self::TemplateEvaluation { language, .. } => {
                Some(language)
            }
            _ => None,
        }
    }
}

impl From<I18nError> for LingoError {
    fn from(err: I18nError) -> Self {
        let locale = err.language().map(str::to_string);
        LingoError::localization_with_source(err.to_string(), locale, err)
    }
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_key_not_found_names_language_and_key() {
        let err = I18nError::KeyNotFound {
            language: "ru".to_string(),
            key: "menu.title".to_string(),
        };
        assert_eq!(err.to_string(), "'ru.menu.title' not found");
        assert_eq!(err.language(), Some("ru"));
    }

    #[test]
    fn test_evaluation_error_keeps_source() {
        let err = I18nError::TemplateEvaluation {
            language: "en".to_string(),
            key: "greeting".to_string(),
            source: EvalError::MissingParameter {
                name: "name".to_string(),
            },
        };
        assert!(err.to_string().starts_with("'en.greeting' failed to render"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_conversion_to_lingo_error() {
        let err: LingoError = I18nError::KeyNotFound {
            language: "de".to_string(),
            key: "hello".to_string(),
        }
        .into();

        match err {
            LingoError::Localization { locale, .. } => assert_eq!(locale.as_deref(), Some("de")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
