//! Error types for parameter analysis

use lingo_common::LingoError;
use lingo_i18n::SyntaxError;
use thiserror::Error;

/// Errors that can occur while analyzing templates or writing contracts
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A template could not be parsed; the whole batch is aborted
    #[error("parsing of the key '{key}' failed ({source}), template:\n{template}")]
    Parse {
        key: String,
        template: String,
        #[source]
        source: SyntaxError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Resource key the error refers to, when there is one
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Parse { key, .. } => Some(key),
            _ => None,
        }
    }
}

impl From<AnalysisError> for LingoError {
    fn from(err: AnalysisError) -> Self {
        let key = err.key().map(str::to_string);
        LingoError::analysis(err.to_string(), key, err)
    }
}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
