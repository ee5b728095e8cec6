//! Loading of locale files from a directory

use crate::error::{I18nError, I18nResult};
use crate::language::LanguageCode;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Supported locale file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFormat {
    Yaml,
    Json,
}

impl ResourceFormat {
    /// Format for a file extension, if supported
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Decode file content into a generic tree
    pub fn decode(&self, path: &Path, content: &str) -> I18nResult<serde_json::Value> {
        if content.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }

        let source_name = path.to_string_lossy();
        match self {
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| {
                I18nError::load_with_source(source_name, "invalid YAML", e)
            }),
            Self::Json => serde_json::from_str(content).map_err(|e| {
                I18nError::load_with_source(source_name, "invalid JSON", e)
            }),
        }
    }
}

/// One decoded locale file
#[derive(Debug, Clone)]
pub struct LocaleFile {
    pub language: LanguageCode,
    pub path: PathBuf,
    pub definitions: serde_json::Value,
}

/// Reads `<language>.yaml|yml|json` files from a locales directory
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    /// Base directory for locale files
    base_dir: PathBuf,
}

impl ResourceLoader {
    /// Create a new ResourceLoader
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Get the base directory for resources
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Decode every supported file in the directory, sorted by file name.
    ///
    /// The file stem (lowercased) is the language code. Files with other
    /// extensions or stems that are not language codes are skipped; empty
    /// documents yield no entry.
    pub fn load_all(&self) -> I18nResult<Vec<LocaleFile>> {
        if !self.base_dir.is_dir() {
            warn!("Locales directory does not exist: {:?}", self.base_dir);
            return Err(I18nError::load(
                self.base_dir.to_string_lossy(),
                "locales directory not found",
            ));
        }

        let mut paths = fs::read_dir(&self.base_dir)
            .map_err(|e| {
                I18nError::load_with_source(
                    self.base_dir.to_string_lossy(),
                    "cannot read locales directory",
                    e,
                )
            })?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        paths.sort();

        let mut files = Vec::new();
        for path in paths {
            if let Some(file) = self.load_file(&path)? {
                files.push(file);
            }
        }

        info!(
            "Read {} locale files from {:?}",
            files.len(),
            self.base_dir
        );
        Ok(files)
    }

    /// Decode a single locale file; `None` when it is skipped
    pub fn load_file(&self, path: &Path) -> I18nResult<Option<LocaleFile>> {
        if !path.is_file() {
            return Ok(None);
        }

        let Some(format) = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ResourceFormat::from_extension)
        else {
            debug!("Skipping unsupported locale file: {:?}", path);
            return Ok(None);
        };

        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let language = match LanguageCode::parse(stem) {
            Ok(language) => language,
            Err(_) => {
                warn!("Skipping locale file with invalid language code: {:?}", path);
                return Ok(None);
            }
        };

        debug!("Loading locale file: {:?}", path);
        let content = fs::read_to_string(path).map_err(|e| {
            I18nError::load_with_source(path.to_string_lossy(), "cannot read file", e)
        })?;

        let definitions = format.decode(path, &content)?;
        if definitions.is_null() {
            debug!("Locale file is empty: {:?}", path);
            return Ok(None);
        }

        Ok(Some(LocaleFile {
            language,
            path: path.to_path_buf(),
            definitions,
        }))
    }
}

impl Default for ResourceLoader {
    fn default() -> Self {
        Self::new("locales")
    }
}
