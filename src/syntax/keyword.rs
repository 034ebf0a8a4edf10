use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug)]
pub struct NotAKeyword<T = String>(pub T);

impl<T: ?Sized + ToOwned> NotAKeyword<&T> {
	pub fn into_owned(self) -> NotAKeyword<T::Owned> {
		NotAKeyword(self.0.to_owned())
	}
}

macro_rules! keyword {
	{
		$(
			$(#[$meta:meta])*
			$ident:ident : $lit:literal
		),*
	} => {
		/// JSON-LD keywords.
		#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
		pub enum Keyword {
			$(
				$(#[$meta])*
				$ident
			),*
		}

		impl Keyword {
			pub fn into_str(self) -> &'static str {
				match self {
					$(
						Self::$ident => $lit
					),*
				}
			}

			pub fn as_str(&self) -> &'static str {
				self.into_str()
			}
		}

		impl<'a> TryFrom<&'a str> for Keyword {
			type Error = NotAKeyword<&'a str>;

			fn try_from(input: &'a str) -> Result<Keyword, NotAKeyword<&'a str>> {
				match input {
					$(
						$lit => Ok(Self::$ident),
					)*
					_ => Err(NotAKeyword(input))
				}
			}
		}
	};
}

keyword! {
	/// `@base`.
	/// Used to set the base IRI against which to resolve those relative IRI references
	/// which are otherwise interpreted relative to the document.
	Base : "@base",

	/// `@container`.
	/// Used to set the default container type for a term.
	Container : "@container",

	/// `@context`.
	/// Used to define the short-hand names that are used throughout a JSON-LD document.
	Context : "@context",

	/// `@direction`.
	/// Used to set the base direction of a JSON-LD value which is not a typed value
	/// (e.g. strings, or language-tagged strings).
	Direction : "@direction",

	/// `@graph`.
	/// Used to express a graph.
	Graph : "@graph",

	/// `@id`.
	/// Used to uniquely identify node objects that are being described in the document with IRIs
	/// or blank node identifiers.
	Id : "@id",

	/// `@import`.
	/// Used in a context definition to load an external context within which the containing
	/// context definition is merged.
	Import : "@import",

	/// `@included`.
	/// Used in a top-level node object to define an included block, for including secondary node
	/// objects within another node object.
	Included : "@included",

	/// `@index`.
	/// Used to specify that a container is used to index information and that processing should
	/// continue deeper into a JSON data structure.
	Index : "@index",

	/// `@json`.
	/// Used as the `@type` value of a JSON literal.
	Json : "@json",

	/// `@language`.
	/// Used to specify the language for a particular string value or the default language of a
	/// JSON-LD document.
	Language : "@language",

	/// `@list`.
	/// Used to express an ordered set of data.
	List : "@list",

	/// `@nest`.
	/// Used to define a property of a node object that groups together properties of that node,
	/// but is not an edge in the graph.
	Nest : "@nest",

	/// `@none`.
	/// Used as an index value in an index map, id map, language map, type map, or elsewhere where
	/// a map is used to index into other values, when the indexed node does not have the feature
	/// being indexed.
	None : "@none",

	/// `@prefix`.
	/// With the value `true`, allows this term to be used to construct a compact IRI when
	/// compacting.
	Prefix : "@prefix",

	/// `@preserve`.
	/// Used by the framing algorithm to mark values kept verbatim through compaction.
	Preserve : "@preserve",

	/// `@propagate`.
	/// Used in a context definition to change the scope of that context.
	Propagate : "@propagate",

	/// `@protected`.
	/// Used to prevent term definitions of a context to be overridden by other contexts.
	Protected : "@protected",

	/// `@reverse`.
	/// Used to express reverse properties.
	Reverse : "@reverse",

	/// `@set`.
	/// Used to express an unordered set of data and to ensure that values are always represented
	/// as arrays.
	Set : "@set",

	/// `@type`.
	/// Used to set the type of a node or the datatype of a typed value.
	Type : "@type",

	/// `@value`.
	/// Used to specify the data that is associated with a particular property in the graph.
	Value : "@value",

	/// `@version`.
	/// Used in a context definition to set the processing mode.
	Version : "@version",

	/// `@vocab`.
	/// Used to expand properties and values in `@type` with a common prefix IRI.
	Vocab : "@vocab"
}

impl Keyword {
	/// Position of the keyword in the canonical key ordering of expanded
	/// documents.
	///
	/// Reserved keywords come before regular properties, in this order.
	/// Keywords that cannot appear as keys of an expanded entity sort last.
	pub fn rank(&self) -> u8 {
		match self {
			Self::Id => 0,
			Self::Type => 1,
			Self::Value => 2,
			Self::Language => 3,
			Self::Direction => 4,
			Self::Index => 5,
			Self::List => 6,
			Self::Set => 7,
			Self::Graph => 8,
			Self::Reverse => 9,
			Self::Preserve => 10,
			Self::Nest => 11,
			Self::Context => 12,
			Self::Included => 13,
			Self::None => 14,
			_ => u8::MAX,
		}
	}
}

impl FromStr for Keyword {
	type Err = NotAKeyword<String>;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::try_from(s).map_err(NotAKeyword::into_owned)
	}
}

impl Borrow<str> for Keyword {
	fn borrow(&self) -> &str {
		self.as_str()
	}
}

impl fmt::Display for Keyword {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.as_str().fmt(f)
	}
}

/// Checks if the given string is a JSON-LD keyword.
pub fn is_keyword(s: &str) -> bool {
	Keyword::try_from(s).is_ok()
}

/// Checks if the given string has the form of a keyword: an `@` followed by
/// one or more letters. Terms and values of this form that are not actual
/// keywords are reserved for future use and ignored.
pub fn is_keyword_like(s: &str) -> bool {
	match s.strip_prefix('@') {
		Some(rest) => !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_alphabetic()),
		None => false,
	}
}
