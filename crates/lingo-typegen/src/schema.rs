//! Parameter schema and its TypeScript/JSON forms

use crate::error::AnalysisResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

/// Shape a template requires of a parameter.
///
/// Ordered from least to most specific; when a name is seen in several
/// roles the most specific kind is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// Used bare: interpolated, or passed to a helper, which may accept
    /// an object as well as a scalar
    Value,
    /// Has properties read from it
    Object,
    /// Invoked as a helper
    Function,
}

impl ParamKind {
    /// TypeScript type used in the emitted contract
    pub fn typescript_type(&self) -> &'static str {
        match self {
            Self::Value => "string | number | Record<string, unknown>",
            Self::Object => "Record<string, unknown>",
            Self::Function => "(...args: unknown[]) => string | number",
        }
    }

    /// Combine two observations of the same name
    pub fn merge(self, other: Self) -> Self {
        self.max(other)
    }
}

/// Requirements of one resource key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyParams {
    NoParameters,
    Params(BTreeMap<String, ParamKind>),
}

impl KeyParams {
    /// Build from collected names; an empty set means no parameters
    pub fn from_names(names: BTreeMap<String, ParamKind>) -> Self {
        if names.is_empty() {
            Self::NoParameters
        } else {
            Self::Params(names)
        }
    }

    pub fn params(&self) -> Option<&BTreeMap<String, ParamKind>> {
        match self {
            Self::NoParameters => None,
            Self::Params(params) => Some(params),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoParameters)
    }
}

/// Parameter requirements of every resource key, in key order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSchema(BTreeMap<String, KeyParams>);

impl ParameterSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, params: KeyParams) {
        self.0.insert(key.into(), params);
    }

    pub fn get(&self, key: &str) -> Option<&KeyParams> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeyParams)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the `I18nResourceParams` interface and `I18nResourceKey` alias
    pub fn to_typescript(&self) -> String {
        let mut out = String::from("export interface I18nResourceParams {\n");
        for (key, params) in &self.0 {
            let key = escape_key(key);
            match params {
                KeyParams::NoParameters => {
                    let _ = writeln!(out, "  '{}': never", key);
                }
                KeyParams::Params(params) => {
                    let _ = writeln!(out, "  '{}': {{", key);
                    for (name, kind) in params {
                        let _ = writeln!(out, "    {}: {}", name, kind.typescript_type());
                    }
                    out.push_str("  }\n");
                }
            }
        }
        out.push_str("}\n\nexport type I18nResourceKey = keyof I18nResourceParams\n");
        out
    }

    /// Serialize the schema as pretty-printed JSON
    pub fn to_json(&self) -> AnalysisResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the TypeScript contract to `path`
    pub fn write_contract<P: AsRef<Path>>(&self, path: P) -> AnalysisResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_typescript())?;
        info!("Wrote parameter contract for {} keys to {:?}", self.len(), path);
        Ok(())
    }
}

fn escape_key(key: &str) -> String {
    key.replace('\\', "\\\\").replace('\'', "\\'")
}

impl FromIterator<(String, KeyParams)> for ParameterSchema {
    fn from_iter<I: IntoIterator<Item = (String, KeyParams)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
