//! Recursive interpreter for parsed templates

use super::syntax::{Expr, Literal, Segment};
use crate::context::I18nContext;
use crate::value::{Params, Value};
use thiserror::Error;

/// What a helper function can see of the context rendering it.
///
/// Inside a context render the scope carries the context itself, so a
/// helper can read ambient parameters or render other keys with it.
#[derive(Debug, Clone, Copy)]
pub struct RenderScope<'a> {
    pub language: &'a str,
    pub short_language: &'a str,
    context: Option<&'a I18nContext>,
}

impl<'a> RenderScope<'a> {
    /// Scope that is not tied to any context
    pub const fn new(language: &'a str, short_language: &'a str) -> Self {
        Self {
            language,
            short_language,
            context: None,
        }
    }

    /// Scope of a context rendering one of its templates
    pub fn for_context(context: &'a I18nContext) -> Self {
        Self {
            language: context.language().as_str(),
            short_language: context.short_language(),
            context: Some(context),
        }
    }

    /// Context the template is rendered by
    pub fn context(&self) -> Option<&'a I18nContext> {
        self.context
    }

    /// Ambient parameter of the rendering context
    pub fn ambient(&self, name: &str) -> Option<&'a Value> {
        self.context?.template_data().get(name)
    }
}

/// Failure while evaluating a template against parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("parameter '{name}' is not defined")]
    MissingParameter { name: String },

    #[error("'{object}' has no property '{property}'")]
    MissingProperty { object: String, property: String },

    #[error("cannot read property '{property}' of {kind} '{object}'")]
    NotAnObject {
        object: String,
        property: String,
        kind: &'static str,
    },

    #[error("'{callee}' is not a function")]
    NotCallable { callee: String },

    #[error("'{expr}' evaluates to a {kind} and cannot be rendered as text")]
    NotDisplayable { expr: String, kind: &'static str },

    #[error("helper '{callee}' failed: {message}")]
    Helper { callee: String, message: String },
}

pub(crate) fn render_segments(
    segments: &[Segment],
    params: &Params,
    scope: &RenderScope<'_>,
) -> Result<String, EvalError> {
    let mut output = String::new();
    for segment in segments {
        match segment {
            Segment::Text(text) => output.push_str(text),
            Segment::Expr(expr) => {
                let value = evaluate(expr, params, scope)?;
                let text = value.to_text().ok_or_else(|| EvalError::NotDisplayable {
                    expr: expr.to_string(),
                    kind: value.kind(),
                })?;
                output.push_str(&text);
            }
        }
    }
    Ok(output)
}

/// Evaluate one expression to a value
pub fn evaluate(expr: &Expr, params: &Params, scope: &RenderScope<'_>) -> Result<Value, EvalError> {
    match expr {
        Expr::Literal(literal) => Ok(match literal {
            Literal::String(s) => Value::String(s.clone()),
            Literal::Number(n) => Value::Number(*n),
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Null => Value::Null,
        }),
        Expr::Identifier(name) => {
            params
                .get(name)
                .cloned()
                .ok_or_else(|| EvalError::MissingParameter { name: name.clone() })
        }
        Expr::PropertyAccess { object, property } => {
            let target = evaluate(object, params, scope)?;
            match target {
                Value::Map(map) => {
                    map.get(property)
                        .cloned()
                        .ok_or_else(|| EvalError::MissingProperty {
                            object: object.to_string(),
                            property: property.clone(),
                        })
                }
                other => Err(EvalError::NotAnObject {
                    object: object.to_string(),
                    property: property.clone(),
                    kind: other.kind(),
                }),
            }
        }
        Expr::Call { callee, arguments } => {
            let helper = match evaluate(callee, params, scope)? {
                Value::Function(helper) => helper,
                _ => {
                    return Err(EvalError::NotCallable {
                        callee: callee.to_string(),
                    })
                }
            };
            let args = arguments
                .iter()
                .map(|argument| evaluate(argument, params, scope))
                .collect::<Result<Vec<_>, _>>()?;
            helper
                .call(scope, &args)
                .map_err(|message| EvalError::Helper {
                    callee: callee.to_string(),
                    message,
                })
        }
    }
}
