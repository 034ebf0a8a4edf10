use super::Keyword;

/// Single container kind.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ContainerKind {
	Graph,
	Id,
	Index,
	Language,
	List,
	Set,
	Type,
}

impl ContainerKind {
	pub fn into_keyword(self) -> Keyword {
		self.into()
	}

	pub fn keyword(&self) -> Keyword {
		self.into_keyword()
	}

	pub fn as_str(&self) -> &'static str {
		self.into_keyword().into_str()
	}
}

impl<'a> TryFrom<&'a str> for ContainerKind {
	type Error = &'a str;

	fn try_from(str: &'a str) -> Result<ContainerKind, &'a str> {
		use ContainerKind::*;
		match str {
			"@graph" => Ok(Graph),
			"@id" => Ok(Id),
			"@index" => Ok(Index),
			"@language" => Ok(Language),
			"@list" => Ok(List),
			"@set" => Ok(Set),
			"@type" => Ok(Type),
			_ => Err(str),
		}
	}
}

impl From<ContainerKind> for Keyword {
	fn from(c: ContainerKind) -> Keyword {
		use ContainerKind::*;
		match c {
			Graph => Keyword::Graph,
			Id => Keyword::Id,
			Index => Keyword::Index,
			Language => Keyword::Language,
			List => Keyword::List,
			Set => Keyword::Set,
			Type => Keyword::Type,
		}
	}
}

/// Container mapping: a set of container kinds.
///
/// The inner list is kept sorted so that equal sets compare and hash equal
/// regardless of the order kinds were added in.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Container(Vec<ContainerKind>);

impl Container {
	/// The empty container mapping.
	pub const NONE: Container = Container(Vec::new());

	pub fn new() -> Container {
		Container(Vec::new())
	}

	/// Builds a container from the given kinds without checking validity.
	pub fn from_kinds<I: IntoIterator<Item = ContainerKind>>(kinds: I) -> Container {
		let mut result = Container::new();
		for kind in kinds {
			result.insert(kind)
		}
		result
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn contains(&self, c: ContainerKind) -> bool {
		self.0.contains(&c)
	}

	pub fn iter(&self) -> std::slice::Iter<ContainerKind> {
		self.0.iter()
	}

	fn insert(&mut self, c: ContainerKind) {
		if let Err(i) = self.0.binary_search(&c) {
			self.0.insert(i, c)
		}
	}

	/// Adds the given kind to the container, checking that the resulting
	/// combination is allowed by the grammar of `@container` values.
	///
	/// Returns `false` (leaving the container unchanged) on a forbidden
	/// combination.
	pub fn add(&mut self, c: ContainerKind) -> bool {
		if self.is_empty() || self.contains(c) {
			self.insert(c);
			return true;
		}

		use ContainerKind::*;
		let valid = if self.len() == 1 {
			let first = self.0[0];
			matches!(
				(first, c),
				(Set, Index)
					| (Set, Graph) | (Set, Id)
					| (Set, Type) | (Set, Language)
					| (Index, Set) | (Graph, Set)
					| (Id, Set) | (Type, Set)
					| (Language, Set)
					| (Graph, Id) | (Id, Graph)
					| (Graph, Index) | (Index, Graph)
			)
		} else if self.len() == 2 {
			match c {
				Set if self.contains(Graph) && (self.contains(Id) || self.contains(Index)) => true,
				Graph if self.contains(Set) && (self.contains(Id) || self.contains(Index)) => true,
				Id if self.contains(Graph) && self.contains(Set) => true,
				Index if self.contains(Graph) && self.contains(Set) => true,
				_ => false,
			}
		} else {
			false
		};

		if valid {
			self.insert(c);
		}
		valid
	}
}

impl Default for Container {
	fn default() -> Container {
		Container::new()
	}
}

impl From<ContainerKind> for Container {
	fn from(c: ContainerKind) -> Container {
		Container(vec![c])
	}
}
