//! Locale repository: compiled templates per language and resource key

use crate::error::{I18nError, I18nResult};
use crate::flatten::flatten_definitions;
use crate::language::LanguageCode;
use crate::template::Template;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Compiled templates of one language, keyed by resource key
pub type LanguageEntries = BTreeMap<String, Template>;

/// Repository handle shared by a manager and every context it creates
pub type SharedRepository = Arc<RwLock<Repository>>;

/// Two-level mapping: language code -> resource key -> template.
///
/// Loading a language merges into what is already stored: new keys
/// overwrite same-named keys and untouched keys persist. A load either
/// succeeds completely or leaves the language as it was.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    languages: BTreeMap<LanguageCode, LanguageEntries>,
}

impl Repository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile and merge flattened definitions for a language.
    ///
    /// Returns the number of templates stored.
    pub fn load(
        &mut self,
        language: &LanguageCode,
        definitions: &BTreeMap<String, String>,
    ) -> I18nResult<usize> {
        debug!(
            "Compiling {} templates for language '{}'",
            definitions.len(),
            language
        );

        let mut compiled = LanguageEntries::new();
        for (key, source) in definitions {
            let template = Template::compile(source).map_err(|err| {
                I18nError::load_with_source(
                    format!("{}.{}", language, key),
                    format!("template syntax error in {:?}", source),
                    err,
                )
            })?;
            compiled.insert(key.clone(), template);
        }

        let count = compiled.len();
        self.languages
            .entry(language.clone())
            .or_default()
            .extend(compiled);

        info!("Loaded {} templates for language '{}'", count, language);
        Ok(count)
    }

    /// Flatten, compile and merge nested definitions for a language
    pub fn load_definitions(
        &mut self,
        language: &LanguageCode,
        definitions: &serde_json::Value,
    ) -> I18nResult<usize> {
        self.load(language, &flatten_definitions(definitions))
    }

    /// Template stored for exactly this language and key
    pub fn get(&self, language: &str, key: &str) -> Option<&Template> {
        self.languages.get(language)?.get(key)
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    /// Loaded language codes in sorted order
    pub fn languages(&self) -> impl Iterator<Item = &LanguageCode> {
        self.languages.keys()
    }

    /// Entries of one language
    pub fn entries(&self, language: &str) -> Option<&LanguageEntries> {
        self.languages.get(language)
    }

    /// Resource keys of one language in sorted order (empty if not loaded)
    pub fn resource_keys(&self, language: &str) -> Vec<&str> {
        self.languages
            .get(language)
            .map(|entries| entries.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Drop one language, or everything when `language` is `None`
    pub fn reset(&mut self, language: Option<&LanguageCode>) {
        match language {
            Some(code) => {
                if self.languages.remove(code).is_some() {
                    info!("Reset language '{}'", code);
                }
            }
            None => {
                self.languages.clear();
                info!("Reset all languages");
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Wrap into a handle that contexts and the manager share
    pub fn into_shared(self) -> SharedRepository {
        Arc::new(RwLock::new(self))
    }
}
