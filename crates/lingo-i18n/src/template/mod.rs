//! Template compilation and rendering

pub mod eval;
pub mod syntax;

pub use eval::{evaluate, EvalError, RenderScope};
pub use syntax::{parse, Expr, Literal, Segment, SyntaxError, INTERPOLATION_MARKER};

use crate::value::Params;
use std::fmt;
use std::sync::Arc;

/// A compiled template: a pure function from parameters to text.
///
/// Cloning is cheap; the parsed body is shared.
#[derive(Clone)]
pub struct Template {
    source: Arc<str>,
    body: Body,
}

#[derive(Clone)]
enum Body {
    /// Source contained no placeholders and is returned verbatim
    Constant,
    Compiled(Arc<[Segment]>),
}

impl Template {
    /// Compile raw template source
    pub fn compile(source: &str) -> Result<Self, SyntaxError> {
        if !source.contains(INTERPOLATION_MARKER) {
            return Ok(Self::constant(source));
        }

        let segments = parse(source)?;
        Ok(Self {
            source: Arc::from(source),
            body: Body::Compiled(segments.into()),
        })
    }

    /// Template that ignores its parameters and always returns `text`
    pub fn constant(text: &str) -> Self {
        Self {
            source: Arc::from(text),
            body: Body::Constant,
        }
    }

    /// Raw source the template was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_constant(&self) -> bool {
        matches!(self.body, Body::Constant)
    }

    /// Render with the given parameters
    pub fn render(&self, params: &Params, scope: &RenderScope<'_>) -> Result<String, EvalError> {
        match &self.body {
            Body::Constant => Ok(self.source.to_string()),
            Body::Compiled(segments) => eval::render_segments(segments, params, scope),
        }
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("source", &self.source)
            .field("constant", &self.is_constant())
            .finish()
    }
}

/// Compile raw template source
pub fn compile(source: &str) -> Result<Template, SyntaxError> {
    Template::compile(source)
}
