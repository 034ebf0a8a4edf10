//! This library implements the [JSON-LD compaction algorithm](https://www.w3.org/TR/json-ld-api/#compaction-algorithms)
//! over dynamic JSON documents.
//!
//! Compaction rewrites an already-expanded JSON-LD document into its most
//! compact form consistent with a given context: absolute IRIs become terms
//! and compact IRIs, expanded value objects become scalars, and container
//! mappings fold arrays of entities into language, index, id, type and graph
//! maps.
//!
//! Documents are [`json_syntax::Value`] trees. Contexts are processed from
//! their JSON form with [`Context::parse`]; remote contexts are not resolved.
//!
//! # Usage
//!
//! ```
//! use json_ld_compact::{Compact, Context};
//! use json_syntax::{Parse, Value};
//!
//! let local_context = Value::parse_str(
//! 	r#"{"ex": "http://example.org/", "ex:p": {}}"#
//! ).unwrap().0;
//! let context = Context::new(None).parse(&local_context).unwrap();
//!
//! let expanded = Value::parse_str(
//! 	r#"{"@id": "http://example.org/x", "http://example.org/p": [{"@value": "v"}]}"#
//! ).unwrap().0;
//!
//! let compacted = expanded.compact(&context).unwrap();
//! assert_eq!(
//! 	compacted,
//! 	Value::parse_str(r#"{"@id": "ex:x", "ex:p": "v"}"#).unwrap().0
//! );
//! ```

pub mod compaction;
pub mod context;
pub mod expanded;
mod mode;
pub mod syntax;
pub(crate) mod util;

pub use compaction::Compact;
pub use context::{Context, TermDefinition};
pub use mode::ProcessingMode;

/// Compaction error.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
	/// A term's `@nest` value does not resolve to `@nest`.
	#[error("Invalid `@nest` value")]
	InvalidNestValue,

	/// Error raised by a context collaborator: context processing, IRI
	/// compaction or value compaction.
	#[error("Context processing failed: {0}")]
	Context(#[from] context::Error),
}

impl Error {
	/// JSON-LD error code of this error.
	pub fn code(&self) -> &'static str {
		match self {
			Self::InvalidNestValue => "invalid @nest value",
			Self::Context(e) => e.code(),
		}
	}
}

/// Compaction options.
#[derive(Clone, Copy, Debug)]
pub struct Options {
	/// If set to `true`, arrays with just one element are replaced with that
	/// element during compaction. If set to `false`, all arrays will remain
	/// arrays even if they have just one element.
	pub compact_arrays: bool,
}

impl Default for Options {
	fn default() -> Options {
		Options {
			compact_arrays: true,
		}
	}
}
