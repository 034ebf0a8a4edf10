//! Inverse context creation and term selection.

use super::Context;
use crate::syntax::{Container, Direction};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Language and direction pair keying the language map of an inverse
/// container. `None` components stand for an explicitly null (or absent)
/// mapping.
type LangDir = (Option<String>, Option<Direction>);

/// Type selection, by preference order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) enum TypeSelection {
	Reverse,
	Any,
	None,
	Type(String),
}

/// Language selection, by preference order.
#[derive(Clone, Copy, Debug)]
pub(crate) enum LangSelection<'a> {
	Any,
	None,
	Lang(Option<&'a str>, Option<Direction>),
}

/// Term selection query.
pub(crate) enum Selection<'a> {
	Any,
	Type(Vec<TypeSelection>),
	Lang(Vec<LangSelection<'a>>),
}

#[derive(Debug)]
struct InverseType {
	reverse: Option<String>,
	any: Option<String>,
	none: Option<String>,
	map: HashMap<String, String>,
}

impl InverseType {
	fn select(&self, selection: &TypeSelection) -> Option<&str> {
		match selection {
			TypeSelection::Reverse => self.reverse.as_deref(),
			TypeSelection::Any => self.any.as_deref(),
			TypeSelection::None => self.none.as_deref(),
			TypeSelection::Type(t) => self.map.get(t).map(String::as_str),
		}
	}

	fn set_any(&mut self, term: &str) {
		if self.any.is_none() {
			self.any = Some(term.to_string())
		}
	}

	fn set_none(&mut self, term: &str) {
		if self.none.is_none() {
			self.none = Some(term.to_string())
		}
	}

	fn set(&mut self, ty: &str, term: &str) {
		if !self.map.contains_key(ty) {
			self.map.insert(ty.to_string(), term.to_string());
		}
	}
}

#[derive(Debug)]
struct InverseLang {
	any: Option<String>,
	none: Option<String>,
	map: HashMap<LangDir, String>,
}

impl InverseLang {
	fn select(&self, selection: LangSelection) -> Option<&str> {
		match selection {
			LangSelection::Any => self.any.as_deref(),
			LangSelection::None => self.none.as_deref(),
			LangSelection::Lang(lang, dir) => {
				let lang_dir = (lang.map(|l| l.to_lowercase()), dir);
				self.map.get(&lang_dir).map(String::as_str)
			}
		}
	}

	fn set_any(&mut self, term: &str) {
		if self.any.is_none() {
			self.any = Some(term.to_string())
		}
	}

	fn set_none(&mut self, term: &str) {
		if self.none.is_none() {
			self.none = Some(term.to_string())
		}
	}

	fn set(&mut self, lang: Option<&str>, dir: Option<Direction>, term: &str) {
		let lang_dir = (lang.map(|l| l.to_lowercase()), dir);
		if !self.map.contains_key(&lang_dir) {
			self.map.insert(lang_dir, term.to_string());
		}
	}
}

/// First term defined with a given container mapping.
#[derive(Debug)]
struct AnyEntry {
	none: String,
}

#[derive(Debug)]
struct InverseContainer {
	language: InverseLang,
	typ: InverseType,
	any: AnyEntry,
}

impl InverseContainer {
	fn new(term: &str) -> InverseContainer {
		InverseContainer {
			language: InverseLang {
				any: None,
				none: None,
				map: HashMap::new(),
			},
			typ: InverseType {
				reverse: None,
				any: None,
				none: None,
				map: HashMap::new(),
			},
			any: AnyEntry {
				none: term.to_string(),
			},
		}
	}
}

#[derive(Debug)]
struct InverseDefinition {
	map: HashMap<Container, InverseContainer>,
}

impl InverseDefinition {
	fn new() -> InverseDefinition {
		InverseDefinition {
			map: HashMap::new(),
		}
	}

	fn get(&self, container: &Container) -> Option<&InverseContainer> {
		self.map.get(container)
	}

	fn reference_mut<F: FnOnce() -> InverseContainer>(
		&mut self,
		container: &Container,
		insert: F,
	) -> &mut InverseContainer {
		if !self.map.contains_key(container) {
			self.map.insert(container.clone(), insert());
		}
		self.map.get_mut(container).unwrap()
	}
}

/// Inverse context.
///
/// Maps each IRI defined by the context to the terms that may represent it,
/// indexed by container mapping and type/language metadata. Derived once per
/// context and cached.
#[derive(Debug)]
pub(crate) struct InverseContext {
	map: HashMap<String, InverseDefinition>,
}

impl InverseContext {
	pub fn contains(&self, var: &str) -> bool {
		self.map.contains_key(var)
	}

	/// Selects the term representing `var` given the preferred containers and
	/// the type/language selection, both in preference order.
	pub fn select(
		&self,
		var: &str,
		containers: &[Container],
		selection: &Selection,
	) -> Option<&str> {
		let container_map = self.map.get(var)?;

		for container in containers {
			if let Some(type_lang_map) = container_map.get(container) {
				match selection {
					Selection::Any => return Some(&type_lang_map.any.none),
					Selection::Type(preferred_values) => {
						for item in preferred_values {
							if let Some(term) = type_lang_map.typ.select(item) {
								return Some(term);
							}
						}
					}
					Selection::Lang(preferred_values) => {
						for item in preferred_values {
							if let Some(term) = type_lang_map.language.select(*item) {
								return Some(term);
							}
						}
					}
				}
			}
		}

		None
	}
}

impl<'a> From<&'a Context> for InverseContext {
	fn from(context: &'a Context) -> InverseContext {
		let mut result = InverseContext {
			map: HashMap::new(),
		};

		let mut definitions: Vec<_> = context
			.definitions()
			.filter(|(_, d)| d.value.is_some())
			.collect();
		definitions.sort_by(|(a, _), (b, _)| {
			let ord = a.len().cmp(&b.len());
			if ord == Ordering::Equal {
				a.cmp(b)
			} else {
				ord
			}
		});

		for (term, term_definition) in definitions {
			let var = term_definition.value.as_ref().unwrap();
			let container = &term_definition.container;

			let container_map = result
				.map
				.entry(var.clone())
				.or_insert_with(InverseDefinition::new);
			let type_lang_map =
				container_map.reference_mut(container, || InverseContainer::new(term));

			let type_map = &mut type_lang_map.typ;
			let lang_map = &mut type_lang_map.language;

			if term_definition.reverse_property {
				// the term represents a reverse property.
				if type_map.reverse.is_none() {
					type_map.reverse = Some(term.to_string())
				}
			} else {
				match term_definition.typ.as_deref() {
					Some("@none") => {
						type_map.set_any(term);
						lang_map.set_any(term);
					}
					Some(typ) => type_map.set(typ, term),
					None => {
						match (&term_definition.language, &term_definition.direction) {
							(Some(language), Some(direction)) => lang_map.set(
								language.as_deref().option(),
								direction.option(),
								term,
							),
							(Some(language), None) => {
								lang_map.set(language.as_deref().option(), None, term)
							}
							(None, Some(direction)) => {
								lang_map.set(None, direction.option(), term)
							}
							(None, None) => {
								lang_map.set(
									context.default_language(),
									context.default_base_direction(),
									term,
								);
								lang_map.set_none(term);
								type_map.set_none(term);
							}
						}
					}
				}
			}
		}

		result
	}
}
