//! Error types and utilities for lingo

use thiserror::Error;

/// Result type alias for lingo operations
pub type Result<T> = std::result::Result<T, LingoError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Workspace-wide error type.
///
/// Each crate keeps its own precise error enum; this type is what an
/// application sees when it mixes configuration, rendering and analysis.
#[derive(Error, Debug)]
pub enum LingoError {
    /// Configuration could not be read, parsed or validated
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Loading, resolving or rendering localized text
    #[error("Localization error: {message}")]
    Localization {
        message: String,
        locale: Option<String>,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Static template analysis failed
    #[error("Analysis error: {message}")]
    Analysis {
        message: String,
        key: Option<String>,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl LingoError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Localization error, tagged with the language it concerns when known
    pub fn localization_with_source(
        msg: impl Into<String>,
        locale: Option<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Localization {
            message: msg.into(),
            locale,
            source: Some(Box::new(source)),
        }
    }

    /// Analysis error, tagged with the resource key it concerns when known
    pub fn analysis(
        msg: impl Into<String>,
        key: Option<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Analysis {
            message: msg.into(),
            key,
            source: Some(Box::new(source)),
        }
    }

    /// Language code attached to a localization error
    pub fn locale(&self) -> Option<&str> {
        match self {
            Self::Localization { locale, .. } => locale.as_deref(),
            _ => None,
        }
    }

    /// Resource key attached to an analysis error
    pub fn resource_key(&self) -> Option<&str> {
        match self {
            Self::Analysis { key, .. } => key.as_deref(),
            _ => None,
        }
    }
}
