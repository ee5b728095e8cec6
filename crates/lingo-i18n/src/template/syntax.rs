//! Interpolation syntax: literal text with `${expression}` placeholders.
//!
//! The expression language is deliberately tiny:
//!
//! ```text
//! expr    := primary ( "." IDENT | "(" [ expr ( "," expr )* ] ")" )*
//! primary := IDENT | STRING | NUMBER | "true" | "false" | "null" | "(" expr ")"
//! ```
//!
//! Strings use single or double quotes with backslash escapes.

use std::fmt;
use thiserror::Error;

/// Marker that opens an embedded expression
pub const INTERPOLATION_MARKER: &str = "${";

/// Error produced when template source cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at offset {offset}")]
pub struct SyntaxError {
    pub message: String,
    /// Byte offset into the template source
    pub offset: usize,
}

impl SyntaxError {
    fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

/// Expression tree of one placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Identifier(String),
    PropertyAccess {
        object: Box<Expr>,
        property: String,
    },
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
}

impl Expr {
    /// Identifier at the bottom of a property-access chain (`user` in `user.name.first`)
    pub fn root_identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(name) => Some(name),
            Self::PropertyAccess { object, .. } => object.root_identifier(),
            _ => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(Literal::String(s)) => write!(f, "{:?}", s),
            Self::Literal(Literal::Number(n)) => write!(f, "{}", n),
            Self::Literal(Literal::Bool(b)) => write!(f, "{}", b),
            Self::Literal(Literal::Null) => f.write_str("null"),
            Self::Identifier(name) => f.write_str(name),
            Self::PropertyAccess { object, property } => write!(f, "{}.{}", object, property),
            Self::Call { callee, arguments } => {
                write!(f, "{}(", callee)?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// A piece of a parsed template, in source order
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Text(String),
    Expr(Expr),
}

/// Parse template source into literal and expression segments
pub fn parse(source: &str) -> Result<Vec<Segment>, SyntaxError> {
    let mut segments = Vec::new();
    let mut rest_start = 0;

    while let Some(found) = source[rest_start..].find(INTERPOLATION_MARKER) {
        let marker_at = rest_start + found;
        if marker_at > rest_start {
            segments.push(Segment::Text(source[rest_start..marker_at].to_string()));
        }

        let mut parser = Parser::new(source, marker_at + INTERPOLATION_MARKER.len());
        parser.skip_whitespace();
        if parser.peek() == Some('}') {
            return Err(SyntaxError::new("empty interpolation", parser.pos));
        }
        let expr = parser.parse_expr()?;
        parser.skip_whitespace();
        match parser.peek() {
            Some('}') => parser.bump(),
            Some(c) => {
                return Err(SyntaxError::new(
                    format!("unexpected '{}' in interpolation", c),
                    parser.pos,
                ))
            }
            None => return Err(SyntaxError::new("unterminated interpolation", marker_at)),
        }

        segments.push(Segment::Expr(expr));
        rest_start = parser.pos;
    }

    if rest_start < source.len() {
        segments.push(Segment::Text(source[rest_start..].to_string()));
    }

    Ok(segments)
}

struct Parser<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, pos: usize) -> Self {
        Self { source, pos }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.parse_primary()?;

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('.') => {
                    self.bump();
                    self.skip_whitespace();
                    let property = self.parse_identifier()?;
                    expr = Expr::PropertyAccess {
                        object: Box::new(expr),
                        property,
                    };
                }
                Some('(') => {
                    self.bump();
                    let arguments = self.parse_arguments()?;
                    expr = Expr::Call {
                        callee: Box::new(expr),
                        arguments,
                    };
                }
                _ => return Ok(expr),
            }
        }
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>, SyntaxError> {
        let mut arguments = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(')') {
            self.bump();
            return Ok(arguments);
        }

        loop {
            arguments.push(self.parse_expr()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                    self.skip_whitespace();
                }
                Some(')') => {
                    self.bump();
                    return Ok(arguments);
                }
                Some(c) => {
                    return Err(SyntaxError::new(
                        format!("expected ',' or ')' but found '{}'", c),
                        self.pos,
                    ))
                }
                None => return Err(SyntaxError::new("unterminated argument list", self.pos)),
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        self.skip_whitespace();
        match self.peek() {
            Some(quote @ ('\'' | '"')) => self.parse_string(quote),
            Some(c) if c.is_ascii_digit() => self.parse_number(),
            Some('(') => {
                self.bump();
                let expr = self.parse_expr()?;
                self.skip_whitespace();
                if self.peek() != Some(')') {
                    return Err(SyntaxError::new("expected ')'", self.pos));
                }
                self.bump();
                Ok(expr)
            }
            Some(c) if is_identifier_start(c) => {
                let name = self.parse_identifier()?;
                Ok(match name.as_str() {
                    "true" => Expr::Literal(Literal::Bool(true)),
                    "false" => Expr::Literal(Literal::Bool(false)),
                    "null" => Expr::Literal(Literal::Null),
                    _ => Expr::Identifier(name),
                })
            }
            Some(c) => Err(SyntaxError::new(
                format!("unexpected '{}' in expression", c),
                self.pos,
            )),
            None => Err(SyntaxError::new("unexpected end of template", self.pos)),
        }
    }

    fn parse_identifier(&mut self) -> Result<String, SyntaxError> {
        let start = self.pos;
        match self.peek() {
            Some(c) if is_identifier_start(c) => self.bump(),
            _ => return Err(SyntaxError::new("expected identifier", self.pos)),
        }
        while self.peek().is_some_and(is_identifier_continue) {
            self.bump();
        }
        Ok(self.source[start..self.pos].to_string())
    }

    fn parse_number(&mut self) -> Result<Expr, SyntaxError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        if self.peek() == Some('.') {
            // `1.toString` is not a number with a fraction
            let after_dot = self.source[self.pos + 1..].chars().next();
            if after_dot.is_some_and(|c| c.is_ascii_digit()) {
                self.bump();
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.bump();
                }
            }
        }
        self.source[start..self.pos]
            .parse::<f64>()
            .map(|n| Expr::Literal(Literal::Number(n)))
            .map_err(|_| SyntaxError::new("invalid number", start))
    }

    fn parse_string(&mut self, quote: char) -> Result<Expr, SyntaxError> {
        let start = self.pos;
        self.bump();
        let mut value = String::new();

        loop {
            match self.peek() {
                None => return Err(SyntaxError::new("unterminated string", start)),
                Some(c) if c == quote => {
                    self.bump();
                    return Ok(Expr::Literal(Literal::String(value)));
                }
                Some('\\') => {
                    self.bump();
                    let escaped = self
                        .peek()
                        .ok_or_else(|| SyntaxError::new("unterminated string", start))?;
                    value.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        other => other,
                    });
                    self.bump();
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
