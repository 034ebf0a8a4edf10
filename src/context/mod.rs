//! Active context and the algorithms operating on it: context processing,
//! inverse context creation, IRI expansion/compaction and value compaction.

mod definition;
pub(crate) mod inverse;
mod iri;
mod processing;
mod value;

use crate::syntax::{Container, ContainerKind, Direction};
use crate::ProcessingMode;
use indexmap::IndexMap;
use iref::IriBuf;
use once_cell::sync::OnceCell;

pub use definition::TermDefinition;
pub(crate) use inverse::InverseContext;

/// Context processing and IRI handling error.
///
/// Every variant corresponds to a JSON-LD error code, available through
/// [`Error::code`].
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
	#[error("Invalid context nullification")]
	InvalidContextNullification,

	#[error("Remote contexts are not supported")]
	RemoteContextLoading,

	#[error("Invalid `@context` entry")]
	InvalidContextEntry,

	#[error("Invalid local context")]
	InvalidLocalContext,

	#[error("Invalid base IRI")]
	InvalidBaseIri,

	#[error("Invalid vocabulary mapping")]
	InvalidVocabMapping,

	#[error("Invalid default language")]
	InvalidDefaultLanguage,

	#[error("Invalid base direction")]
	InvalidBaseDirection,

	#[error("Invalid `@version` value")]
	InvalidVersionValue,

	#[error("Processing mode conflict")]
	ProcessingModeConflict,

	#[error("Cyclic IRI mapping")]
	CyclicIriMapping,

	#[error("Keyword redefinition")]
	KeywordRedefinition,

	#[error("Invalid term definition")]
	InvalidTermDefinition,

	#[error("Invalid IRI mapping")]
	InvalidIriMapping,

	#[error("Invalid reverse property")]
	InvalidReverseProperty,

	#[error("Invalid container mapping")]
	InvalidContainerMapping,

	#[error("Invalid type mapping")]
	InvalidTypeMapping,

	#[error("Invalid language mapping")]
	InvalidLanguageMapping,

	#[error("Invalid `@nest` value")]
	InvalidNestValue,

	#[error("Invalid `@prefix` value")]
	InvalidPrefixValue,

	#[error("Invalid `@protected` value")]
	InvalidProtectedValue,

	#[error("Invalid `@propagate` value")]
	InvalidPropagateValue,

	#[error("Invalid keyword alias")]
	InvalidKeywordAlias,

	#[error("Protected term redefinition")]
	ProtectedTermRedefinition,

	#[error("IRI confused with prefix")]
	IriConfusedWithPrefix,
}

impl Error {
	/// JSON-LD error code of this error.
	pub fn code(&self) -> &'static str {
		match self {
			Self::InvalidContextNullification => "invalid context nullification",
			Self::RemoteContextLoading => "loading remote context failed",
			Self::InvalidContextEntry => "invalid context entry",
			Self::InvalidLocalContext => "invalid local context",
			Self::InvalidBaseIri => "invalid base IRI",
			Self::InvalidVocabMapping => "invalid vocab mapping",
			Self::InvalidDefaultLanguage => "invalid default language",
			Self::InvalidBaseDirection => "invalid base direction",
			Self::InvalidVersionValue => "invalid @version value",
			Self::ProcessingModeConflict => "processing mode conflict",
			Self::CyclicIriMapping => "cyclic IRI mapping",
			Self::KeywordRedefinition => "keyword redefinition",
			Self::InvalidTermDefinition => "invalid term definition",
			Self::InvalidIriMapping => "invalid IRI mapping",
			Self::InvalidReverseProperty => "invalid reverse property",
			Self::InvalidContainerMapping => "invalid container mapping",
			Self::InvalidTypeMapping => "invalid type mapping",
			Self::InvalidLanguageMapping => "invalid language mapping",
			Self::InvalidNestValue => "invalid @nest value",
			Self::InvalidPrefixValue => "invalid @prefix value",
			Self::InvalidProtectedValue => "invalid @protected value",
			Self::InvalidPropagateValue => "invalid @propagate value",
			Self::InvalidKeywordAlias => "invalid keyword alias",
			Self::ProtectedTermRedefinition => "protected term redefinition",
			Self::IriConfusedWithPrefix => "IRI confused with prefix",
		}
	}
}

/// Processed JSON-LD context.
///
/// Holds the term definitions, vocabulary mapping, base IRI, defaults and
/// processing mode in effect at a point of the compaction traversal. Contexts
/// are immutable once processed; overlaying a scoped context through
/// [`Context::parse`] produces a new derived context.
#[derive(Debug)]
pub struct Context {
	original_base_url: Option<IriBuf>,
	base_iri: Option<IriBuf>,
	vocabulary: Option<String>,
	default_language: Option<String>,
	default_base_direction: Option<Direction>,
	processing_mode: ProcessingMode,
	definitions: IndexMap<String, TermDefinition>,
	inverse: OnceCell<InverseContext>,
}

impl Context {
	/// Creates a new empty context with the given base IRI.
	pub fn new(base_iri: Option<IriBuf>) -> Self {
		Self {
			original_base_url: base_iri.clone(),
			base_iri,
			vocabulary: None,
			default_language: None,
			default_base_direction: None,
			processing_mode: ProcessingMode::default(),
			definitions: IndexMap::new(),
			inverse: OnceCell::new(),
		}
	}

	/// Sets the processing mode of the context.
	pub fn with_processing_mode(mut self, mode: ProcessingMode) -> Self {
		self.processing_mode = mode;
		self
	}

	/// Returns a reference to the given `term` definition, if any.
	pub fn get(&self, term: &str) -> Option<&TermDefinition> {
		self.definitions.get(term)
	}

	/// Checks if the given `term` is defined.
	pub fn contains_term(&self, term: &str) -> bool {
		self.definitions.contains_key(term)
	}

	/// Returns the original base URL of the context.
	pub fn original_base_url(&self) -> Option<&IriBuf> {
		self.original_base_url.as_ref()
	}

	/// Returns the base IRI of the context.
	pub fn base_iri(&self) -> Option<&IriBuf> {
		self.base_iri.as_ref()
	}

	/// Returns the `@vocab` value, if any.
	pub fn vocabulary(&self) -> Option<&str> {
		self.vocabulary.as_deref()
	}

	/// Returns the default language of the context.
	pub fn default_language(&self) -> Option<&str> {
		self.default_language.as_deref()
	}

	/// Returns the default base direction of the context.
	pub fn default_base_direction(&self) -> Option<Direction> {
		self.default_base_direction
	}

	/// Returns the processing mode in effect.
	pub fn processing_mode(&self) -> ProcessingMode {
		self.processing_mode
	}

	/// Iterates over the defined terms and their definitions.
	pub fn definitions(&self) -> impl Iterator<Item = (&String, &TermDefinition)> {
		self.definitions.iter()
	}

	/// Returns the container mapping of the given term, or the empty
	/// container if the term is undefined.
	pub fn container(&self, term: &str) -> &Container {
		static NONE: once_cell::sync::Lazy<Container> = once_cell::sync::Lazy::new(Container::new);
		self.get(term).map(|d| &d.container).unwrap_or(&NONE)
	}

	/// Checks if the container mapping of `term` includes the given kind.
	pub fn has_container_mapping(&self, term: &str, kind: ContainerKind) -> bool {
		self.container(term).contains(kind)
	}

	/// Checks if the given term is defined as a reverse property.
	pub fn is_reverse_property(&self, term: &str) -> bool {
		self.get(term).map(|d| d.reverse_property).unwrap_or(false)
	}

	/// Checks if any term definition is protected.
	pub fn has_protected_terms(&self) -> bool {
		self.definitions.values().any(|d| d.protected)
	}

	/// Returns the inverse context, creating it if necessary.
	pub(crate) fn inverse(&self) -> &InverseContext {
		self.inverse.get_or_init(|| InverseContext::from(self))
	}

	pub(crate) fn definitions_mut(&mut self) -> &mut IndexMap<String, TermDefinition> {
		&mut self.definitions
	}

	pub(crate) fn set_base_iri(&mut self, iri: Option<IriBuf>) {
		self.base_iri = iri
	}

	pub(crate) fn set_vocabulary(&mut self, vocab: Option<String>) {
		self.vocabulary = vocab
	}

	pub(crate) fn set_default_language(&mut self, language: Option<String>) {
		self.default_language = language
	}

	pub(crate) fn set_default_base_direction(&mut self, direction: Option<Direction>) {
		self.default_base_direction = direction
	}
}

impl Clone for Context {
	fn clone(&self) -> Self {
		// the inverse cache is not carried over: the clone is about to be
		// modified by context processing.
		Self {
			original_base_url: self.original_base_url.clone(),
			base_iri: self.base_iri.clone(),
			vocabulary: self.vocabulary.clone(),
			default_language: self.default_language.clone(),
			default_base_direction: self.default_base_direction,
			processing_mode: self.processing_mode,
			definitions: self.definitions.clone(),
			inverse: OnceCell::new(),
		}
	}
}
