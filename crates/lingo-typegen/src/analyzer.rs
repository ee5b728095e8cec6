//! Walks template expression trees to collect required parameters

use crate::error::{AnalysisError, AnalysisResult};
use crate::schema::{KeyParams, ParamKind, ParameterSchema};
use lingo_config::I18nConfig;
use lingo_i18n::flatten_definitions;
use lingo_i18n::template::{parse, Expr, Segment, INTERPOLATION_MARKER};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, error};

/// Derives parameter schemas from raw template source.
///
/// Names in the globals set are supplied ambiently (helpers such as
/// `pluralize`) and never reported.
#[derive(Debug, Clone, Default)]
pub struct ParameterAnalyzer {
    globals: BTreeSet<String>,
}

impl ParameterAnalyzer {
    pub fn new<I, S>(globals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            globals: globals.into_iter().map(Into::into).collect(),
        }
    }

    /// Analyzer excluding the configured global parameters
    pub fn from_config(config: &I18nConfig) -> Self {
        Self::new(config.global_params.iter().cloned())
    }

    pub fn globals(&self) -> &BTreeSet<String> {
        &self.globals
    }

    /// Analyze nested definitions, flattened the same way as for loading
    pub fn analyze(&self, definitions: &serde_json::Value) -> AnalysisResult<ParameterSchema> {
        self.analyze_flat(&flatten_definitions(definitions))
    }

    /// Analyze an already flattened key -> template mapping.
    ///
    /// Stops at the first template that fails to parse.
    pub fn analyze_flat(
        &self,
        templates: &BTreeMap<String, String>,
    ) -> AnalysisResult<ParameterSchema> {
        let mut schema = ParameterSchema::new();
        for (key, template) in templates {
            let params = self.analyze_template(key, template).inspect_err(|_| {
                error!(
                    "parsing of the key '{}' failed, template:\n{}",
                    key, template
                );
            })?;
            schema.insert(key.clone(), params);
        }

        debug!("Analyzed {} templates", schema.len());
        Ok(schema)
    }

    /// Requirements of a single template
    pub fn analyze_template(&self, key: &str, template: &str) -> AnalysisResult<KeyParams> {
        if !template.contains(INTERPOLATION_MARKER) {
            return Ok(KeyParams::NoParameters);
        }

        let segments = parse(template).map_err(|source| AnalysisError::Parse {
            key: key.to_string(),
            template: template.to_string(),
            source,
        })?;

        let mut collector = Collector {
            globals: &self.globals,
            names: BTreeMap::new(),
        };
        for segment in &segments {
            if let Segment::Expr(expr) = segment {
                collector.visit(expr);
            }
        }

        Ok(KeyParams::from_names(collector.names))
    }
}

struct Collector<'a> {
    globals: &'a BTreeSet<String>,
    names: BTreeMap<String, ParamKind>,
}

impl Collector<'_> {
    fn require(&mut self, name: &str, kind: ParamKind) {
        if self.globals.contains(name) {
            return;
        }
        self.names
            .entry(name.to_string())
            .and_modify(|existing| *existing = existing.merge(kind))
            .or_insert(kind);
    }

    /// Classify one expression without revisiting already classified subtrees
    fn visit(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(_) => {}
            Expr::Identifier(name) => self.require(name, ParamKind::Value),
            Expr::PropertyAccess { object, .. } => match expr.root_identifier() {
                Some(root) => self.require(root, ParamKind::Object),
                // `f(x).y`: the call is what needs describing
                None => self.visit(object),
            },
            Expr::Call { callee, arguments } => {
                match callee.as_ref() {
                    Expr::Identifier(name) => self.require(name, ParamKind::Function),
                    other => self.visit(other),
                }
                for argument in arguments {
                    self.visit(argument);
                }
            }
        }
    }
}

/// Analyze nested definitions, excluding `globals`
pub fn analyze(definitions: &serde_json::Value, globals: &[String]) -> AnalysisResult<ParameterSchema> {
    ParameterAnalyzer::new(globals.iter().cloned()).analyze(definitions)
}

/// Analyze a flattened key -> template mapping, excluding `globals`
pub fn analyze_flat(
    templates: &BTreeMap<String, String>,
    globals: &[String],
) -> AnalysisResult<ParameterSchema> {
    ParameterAnalyzer::new(globals.iter().cloned()).analyze_flat(templates)
}
