use crate::syntax::{Container, Direction, Nullable};
use iref::IriBuf;
use json_syntax::Value;

/// Term definition.
///
/// Result of the create-term-definition part of context processing. The
/// `value` field holds the IRI mapping, which may be an IRI, a blank node
/// identifier or a keyword (keyword alias); `None` means the term is
/// explicitly mapped to `null` and protects its key from expansion.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct TermDefinition {
	/// IRI mapping.
	pub value: Option<String>,

	/// Prefix flag: the term may be used to build compact IRIs.
	pub prefix: bool,

	/// Protection flag.
	pub protected: bool,

	/// Reverse property flag.
	pub reverse_property: bool,

	/// Base URL of the term, used to resolve its scoped context.
	pub base_url: Option<IriBuf>,

	/// Type mapping (an IRI, `@id`, `@vocab`, `@json` or `@none`).
	pub typ: Option<String>,

	/// Language mapping.
	pub language: Option<Nullable<String>>,

	/// Direction mapping.
	pub direction: Option<Nullable<Direction>>,

	/// Container mapping.
	pub container: Container,

	/// Index mapping.
	pub index: Option<String>,

	/// Scoped context, kept unprocessed until the term is encountered.
	pub context: Option<Value>,

	/// Nest mapping.
	pub nest: Option<String>,
}

impl TermDefinition {
	/// Compares two definitions for the purpose of protected-term
	/// redefinition: everything but the protection flag itself must match.
	pub fn modulo_protected_eq(&self, other: &TermDefinition) -> bool {
		self.value == other.value
			&& self.prefix == other.prefix
			&& self.reverse_property == other.reverse_property
			&& self.typ == other.typ
			&& self.language == other.language
			&& self.direction == other.direction
			&& self.container == other.container
			&& self.index == other.index
			&& self.context == other.context
			&& self.nest == other.nest
	}
}
