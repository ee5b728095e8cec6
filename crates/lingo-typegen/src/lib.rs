//! Static parameter analysis for lingo templates
//!
//! Reads raw template source (never compiled templates) and derives, per
//! resource key, which named parameters a caller must supply and in what
//! shape. The result can be emitted as a TypeScript contract or as JSON.
//!
//! # Example
//!
//! ```rust
//! use lingo_typegen::{analyze, KeyParams, ParamKind};
//!
//! # fn example() -> Result<(), lingo_typegen::AnalysisError> {
//! let schema = analyze(
//!     &serde_json::json!({ "greeting": "`${foo(bar.baz)}`", "plain": "Hi" }),
//!     &[],
//! )?;
//!
//! let params = schema.get("greeting").and_then(KeyParams::params).unwrap();
//! assert_eq!(params.get("foo"), Some(&ParamKind::Function));
//! assert_eq!(params.get("bar"), Some(&ParamKind::Object));
//! assert!(!params.contains_key("baz"));
//! assert_eq!(schema.get("plain"), Some(&KeyParams::NoParameters));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod analyzer;
pub mod error;
pub mod schema;

pub use analyzer::{analyze, analyze_flat, ParameterAnalyzer};
pub use error::{AnalysisError, AnalysisResult};
pub use schema::{KeyParams, ParamKind, ParameterSchema};
