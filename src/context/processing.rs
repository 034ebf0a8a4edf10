//! Context processing: overlaying a local context over the active context.

use super::{Context, Error, TermDefinition};
use crate::syntax::{
	is_keyword, is_keyword_like, Container, ContainerKind, Direction, Nullable,
};
use crate::util::{as_array, entry};
use iref::{Iri, IriBuf, IriRef};
use json_syntax::{Object, Value};
use std::borrow::Cow;
use std::collections::HashMap;

/// Context entries handled before term definitions are created.
const CONTROL_ENTRIES: [&str; 8] = [
	"@version",
	"@import",
	"@base",
	"@vocab",
	"@language",
	"@direction",
	"@propagate",
	"@protected",
];

impl Context {
	/// Processes a local context value (`null`, a context definition object,
	/// or an array of those), returning the derived context.
	///
	/// Remote contexts are not resolved: a string entry or an `@import` fails
	/// with [`Error::RemoteContextLoading`].
	pub fn parse(&self, local_context: &Value) -> Result<Context, Error> {
		self.process_with(local_context, false)
	}

	/// Like [`Context::parse`], but allowing protected terms to be
	/// overridden. Used for property-scoped contexts.
	pub(crate) fn process_with(
		&self,
		local_context: &Value,
		override_protected: bool,
	) -> Result<Context, Error> {
		let mut result = self.clone();

		for context in as_array(local_context) {
			match context {
				Value::Null => {
					if !override_protected && result.has_protected_terms() {
						return Err(Error::InvalidContextNullification);
					}

					result = Context::new(self.original_base_url().cloned())
						.with_processing_mode(self.processing_mode());
				}
				Value::String(_) => return Err(Error::RemoteContextLoading),
				Value::Object(context) => {
					let mut defined = HashMap::new();

					if let Some(version) = entry(context, "@version") {
						let is_1_1 = matches!(version, Value::Number(n) if n.as_str() == "1.1");
						if !is_1_1 {
							return Err(Error::InvalidVersionValue);
						}
						if !result.processing_mode().is_1_1() {
							return Err(Error::ProcessingModeConflict);
						}
					}

					if entry(context, "@import").is_some() {
						if !result.processing_mode().is_1_1() {
							return Err(Error::InvalidContextEntry);
						}
						return Err(Error::RemoteContextLoading);
					}

					if let Some(base) = entry(context, "@base") {
						match base {
							Value::Null => result.set_base_iri(None),
							Value::String(s) => {
								let iri_ref = IriRef::new(s.as_str())
									.map_err(|_| Error::InvalidBaseIri)?;
								let resolved = match result.base_iri() {
									Some(base_iri) => iri_ref.resolved(base_iri),
									None => IriBuf::new(s.as_str().to_string())
										.map_err(|_| Error::InvalidBaseIri)?,
								};
								result.set_base_iri(Some(resolved))
							}
							_ => return Err(Error::InvalidBaseIri),
						}
					}

					if let Some(vocab) = entry(context, "@vocab") {
						match vocab {
							Value::Null => result.set_vocabulary(None),
							Value::String(s) => {
								let expanded = result
									.expand_iri(s.as_str(), true, true)
									.ok_or(Error::InvalidVocabMapping)?;
								if !expanded.starts_with("_:") && Iri::new(&expanded).is_err() {
									return Err(Error::InvalidVocabMapping);
								}
								result.set_vocabulary(Some(expanded))
							}
							_ => return Err(Error::InvalidVocabMapping),
						}
					}

					if let Some(language) = entry(context, "@language") {
						match language {
							Value::Null => result.set_default_language(None),
							Value::String(s) => {
								result.set_default_language(Some(s.to_lowercase()))
							}
							_ => return Err(Error::InvalidDefaultLanguage),
						}
					}

					if let Some(direction) = entry(context, "@direction") {
						if !result.processing_mode().is_1_1() {
							return Err(Error::InvalidContextEntry);
						}
						match direction {
							Value::Null => result.set_default_base_direction(None),
							Value::String(s) => {
								let dir = Direction::try_from(s.as_str())
									.map_err(|_| Error::InvalidBaseDirection)?;
								result.set_default_base_direction(Some(dir))
							}
							_ => return Err(Error::InvalidBaseDirection),
						}
					}

					if let Some(propagate) = entry(context, "@propagate") {
						if !result.processing_mode().is_1_1() {
							return Err(Error::InvalidContextEntry);
						}
						if !matches!(propagate, Value::Boolean(_)) {
							return Err(Error::InvalidPropagateValue);
						}
						if matches!(propagate, Value::Boolean(false)) {
							// previous-context tracking is not implemented.
							log::warn!("ignoring `@propagate: false` entry");
						}
					}

					let mut protected = false;
					if let Some(p) = entry(context, "@protected") {
						if !result.processing_mode().is_1_1() {
							return Err(Error::InvalidContextEntry);
						}
						match p {
							Value::Boolean(b) => protected = *b,
							_ => return Err(Error::InvalidProtectedValue),
						}
					}

					for context_entry in context.entries() {
						let term = context_entry.key.as_str();
						if CONTROL_ENTRIES.contains(&term) {
							continue;
						}

						create_term_definition(
							&mut result,
							context,
							term,
							&mut defined,
							protected,
							override_protected,
						)?
					}
				}
				_ => return Err(Error::InvalidLocalContext),
			}
		}

		Ok(result)
	}
}

/// IRI expansion against a context still being processed: terms used before
/// their definition is created trigger the creation first.
pub(super) fn expand_iri_with(
	result: &mut Context,
	value: &str,
	document_relative: bool,
	vocab: bool,
	local_context: &Object,
	defined: &mut HashMap<String, bool>,
) -> Result<Option<String>, Error> {
	if is_keyword(value) {
		return Ok(Some(value.to_string()));
	}

	if is_keyword_like(value) {
		log::warn!("ignoring keyword-like value `{}`", value);
		return Ok(None);
	}

	if entry(local_context, value).is_some() && defined.get(value) != Some(&true) {
		create_term_definition(result, local_context, value, defined, false, false)?
	}

	if let Some(i) = value.get(1..).and_then(|rest| rest.find(':')) {
		let prefix = &value[..i + 1];
		if entry(local_context, prefix).is_some() && defined.get(prefix) != Some(&true) {
			create_term_definition(result, local_context, prefix, defined, false, false)?
		}
	}

	Ok(result.expand_iri(value, document_relative, vocab))
}

/// Create term definition algorithm.
fn create_term_definition(
	result: &mut Context,
	local_context: &Object,
	term: &str,
	defined: &mut HashMap<String, bool>,
	protected: bool,
	override_protected: bool,
) -> Result<(), Error> {
	match defined.get(term) {
		Some(true) => return Ok(()),
		Some(false) => return Err(Error::CyclicIriMapping),
		None => (),
	}

	if term.is_empty() {
		return Err(Error::InvalidTermDefinition);
	}

	defined.insert(term.to_string(), false);

	let value = match entry(local_context, term) {
		Some(value) => value,
		None => {
			defined.insert(term.to_string(), true);
			return Ok(());
		}
	};

	// In JSON-LD 1.1, `@type` can be redefined to set its container to
	// `@set`.
	if term == "@type" {
		if !result.processing_mode().is_1_1() {
			return Err(Error::KeywordRedefinition);
		}

		let map = value.as_object().ok_or(Error::KeywordRedefinition)?;
		let mut definition = TermDefinition {
			value: Some("@type".to_string()),
			..Default::default()
		};

		for e in map.entries() {
			match e.key.as_str() {
				"@container" => {
					if e.value.as_str() != Some("@set") {
						return Err(Error::KeywordRedefinition);
					}
					definition.container = Container::from(ContainerKind::Set)
				}
				"@protected" => match &e.value {
					Value::Boolean(b) => definition.protected = *b,
					_ => return Err(Error::InvalidProtectedValue),
				},
				_ => return Err(Error::KeywordRedefinition),
			}
		}

		result.definitions_mut().insert(term.to_string(), definition);
		defined.insert(term.to_string(), true);
		return Ok(());
	}

	if is_keyword(term) {
		return Err(Error::KeywordRedefinition);
	}

	if is_keyword_like(term) {
		log::warn!("ignoring keyword-like term `{}`", term);
		defined.insert(term.to_string(), true);
		return Ok(());
	}

	let previous_definition = result.definitions_mut().shift_remove(term);

	let mut simple_term = false;
	let value_map: Cow<Object> = match value {
		Value::Null => {
			let mut map = Object::default();
			map.insert("@id".into(), Value::Null);
			Cow::Owned(map)
		}
		Value::String(s) => {
			simple_term = true;
			let mut map = Object::default();
			map.insert("@id".into(), Value::String(s.clone()));
			Cow::Owned(map)
		}
		Value::Object(map) => Cow::Borrowed(map),
		_ => return Err(Error::InvalidTermDefinition),
	};
	let value_map: &Object = value_map.as_ref();

	let mut definition = TermDefinition {
		protected,
		..Default::default()
	};

	if let Some(p) = entry(value_map, "@protected") {
		if !result.processing_mode().is_1_1() {
			return Err(Error::InvalidTermDefinition);
		}
		match p {
			Value::Boolean(b) => definition.protected = *b,
			_ => return Err(Error::InvalidProtectedValue),
		}
	}

	if let Some(t) = entry(value_map, "@type") {
		let t = t.as_str().ok_or(Error::InvalidTypeMapping)?;
		let expanded = expand_iri_with(result, t, false, true, local_context, defined)?
			.ok_or(Error::InvalidTypeMapping)?;

		match expanded.as_str() {
			"@json" | "@none" if !result.processing_mode().is_1_1() => {
				return Err(Error::InvalidTypeMapping)
			}
			"@id" | "@vocab" | "@json" | "@none" => (),
			e if Iri::new(e).is_ok() || e.starts_with("_:") => (),
			_ => return Err(Error::InvalidTypeMapping),
		}

		definition.typ = Some(expanded)
	}

	if let Some(reverse) = entry(value_map, "@reverse") {
		if entry(value_map, "@id").is_some() || entry(value_map, "@nest").is_some() {
			return Err(Error::InvalidReverseProperty);
		}

		let reverse = reverse.as_str().ok_or(Error::InvalidIriMapping)?;
		if is_keyword_like(reverse) {
			log::warn!("ignoring keyword-like reverse mapping `{}`", reverse);
			defined.insert(term.to_string(), true);
			return Ok(());
		}

		let expanded = expand_iri_with(result, reverse, false, true, local_context, defined)?
			.ok_or(Error::InvalidIriMapping)?;
		if Iri::new(&expanded).is_err() && !expanded.starts_with("_:") {
			return Err(Error::InvalidIriMapping);
		}
		definition.value = Some(expanded);

		if let Some(container) = entry(value_map, "@container") {
			match container {
				Value::Null => (),
				Value::String(s) if matches!(s.as_str(), "@set" | "@index") => {
					definition.container =
						Container::from(ContainerKind::try_from(s.as_str()).unwrap())
				}
				_ => return Err(Error::InvalidReverseProperty),
			}
		}

		definition.reverse_property = true;
		result.definitions_mut().insert(term.to_string(), definition);
		defined.insert(term.to_string(), true);
		return Ok(());
	}

	let mut has_id_mapping = false;
	if let Some(id) = entry(value_map, "@id") {
		if id.as_str() != Some(term) {
			has_id_mapping = true;
			match id {
				// The term is not expanded to an IRI; it still prevents its
				// key from being expanded through the vocabulary mapping.
				Value::Null => (),
				Value::String(s) => {
					let s = s.as_str();
					if !is_keyword(s) && is_keyword_like(s) {
						log::warn!("ignoring keyword-like IRI mapping `{}`", s);
						defined.insert(term.to_string(), true);
						return Ok(());
					}

					let expanded =
						expand_iri_with(result, s, false, true, local_context, defined)?
							.ok_or(Error::InvalidIriMapping)?;
					if expanded == "@context" {
						return Err(Error::InvalidKeywordAlias);
					}
					if !is_keyword(&expanded)
						&& Iri::new(&expanded).is_err()
						&& !expanded.starts_with("_:")
					{
						return Err(Error::InvalidIriMapping);
					}

					// A term containing a colon or slash must expand to the
					// same IRI through its own name.
					if term.get(1..).map_or(false, |rest| rest.contains(':'))
						|| term.contains('/')
					{
						defined.insert(term.to_string(), true);
						let re_expanded =
							expand_iri_with(result, term, false, true, local_context, defined)?;
						if re_expanded.as_deref() != Some(expanded.as_str()) {
							return Err(Error::InvalidIriMapping);
						}
					}

					definition.value = Some(expanded);

					if !term.contains(':') && !term.contains('/') && simple_term {
						let mapping = definition.value.as_deref().unwrap();
						if mapping.starts_with("_:")
							|| mapping.ends_with(&[':', '/', '?', '#', '[', ']', '@'][..])
						{
							definition.prefix = true
						}
					}
				}
				_ => return Err(Error::InvalidIriMapping),
			}
		}
	}

	if !has_id_mapping {
		if let Some(i) = term.get(1..).and_then(|rest| rest.find(':')) {
			let i = i + 1;
			let prefix = &term[..i];
			let suffix = &term[i + 1..];

			if entry(local_context, prefix).is_some() {
				create_term_definition(result, local_context, prefix, defined, false, false)?
			}

			definition.value = match result.get(prefix).and_then(|d| d.value.as_ref()) {
				Some(mapping) => Some(format!("{mapping}{suffix}")),
				// The term is itself an IRI or a blank node identifier.
				None => Some(term.to_string()),
			}
		} else if term.contains('/') {
			let expanded = expand_iri_with(result, term, false, true, local_context, defined)?
				.ok_or(Error::InvalidIriMapping)?;
			definition.value = Some(expanded)
		} else {
			match result.vocabulary() {
				Some(vocabulary) => definition.value = Some(format!("{vocabulary}{term}")),
				None => return Err(Error::InvalidIriMapping),
			}
		}
	}

	if let Some(container) = entry(value_map, "@container") {
		let mut mapping = Container::new();
		for item in as_array(container) {
			let s = item.as_str().ok_or(Error::InvalidContainerMapping)?;
			let kind =
				ContainerKind::try_from(s).map_err(|_| Error::InvalidContainerMapping)?;

			if !result.processing_mode().is_1_1()
				&& (container.is_array()
					|| matches!(
						kind,
						ContainerKind::Graph | ContainerKind::Id | ContainerKind::Type
					)) {
				return Err(Error::InvalidContainerMapping);
			}

			if !mapping.add(kind) {
				return Err(Error::InvalidContainerMapping);
			}
		}

		if mapping.is_empty() {
			return Err(Error::InvalidContainerMapping);
		}

		definition.container = mapping
	}

	if let Some(index) = entry(value_map, "@index") {
		if !result.processing_mode().is_1_1()
			|| !definition.container.contains(ContainerKind::Index)
		{
			return Err(Error::InvalidTermDefinition);
		}

		let index = index.as_str().ok_or(Error::InvalidTermDefinition)?;
		match expand_iri_with(result, index, false, true, local_context, defined)? {
			Some(expanded) if Iri::new(&expanded).is_ok() => (),
			_ => return Err(Error::InvalidTermDefinition),
		}

		definition.index = Some(index.to_string())
	}

	if let Some(context) = entry(value_map, "@context") {
		if !result.processing_mode().is_1_1() {
			return Err(Error::InvalidTermDefinition);
		}

		// Kept unprocessed: the scoped context is parsed when the term is
		// encountered during traversal.
		definition.context = Some(context.clone())
	}

	if entry(value_map, "@type").is_none() {
		if let Some(language) = entry(value_map, "@language") {
			match language {
				Value::Null => definition.language = Some(Nullable::Null),
				Value::String(s) => {
					definition.language = Some(Nullable::Some(s.to_lowercase()))
				}
				_ => return Err(Error::InvalidLanguageMapping),
			}
		}

		if let Some(direction) = entry(value_map, "@direction") {
			match direction {
				Value::Null => definition.direction = Some(Nullable::Null),
				Value::String(s) => {
					let dir = Direction::try_from(s.as_str())
						.map_err(|_| Error::InvalidBaseDirection)?;
					definition.direction = Some(Nullable::Some(dir))
				}
				_ => return Err(Error::InvalidBaseDirection),
			}
		}
	}

	if let Some(nest) = entry(value_map, "@nest") {
		if !result.processing_mode().is_1_1() {
			return Err(Error::InvalidTermDefinition);
		}

		let nest = nest.as_str().ok_or(Error::InvalidNestValue)?;
		if is_keyword(nest) && nest != "@nest" {
			return Err(Error::InvalidNestValue);
		}
		definition.nest = Some(nest.to_string())
	}

	if let Some(prefix) = entry(value_map, "@prefix") {
		if !result.processing_mode().is_1_1() || term.contains(':') || term.contains('/') {
			return Err(Error::InvalidTermDefinition);
		}

		match prefix {
			Value::Boolean(b) => definition.prefix = *b,
			_ => return Err(Error::InvalidPrefixValue),
		}

		if definition.prefix && definition.value.as_deref().map_or(false, is_keyword) {
			return Err(Error::InvalidTermDefinition);
		}
	}

	for e in value_map.entries() {
		if !matches!(
			e.key.as_str(),
			"@id" | "@reverse"
				| "@type" | "@language"
				| "@direction" | "@container"
				| "@context" | "@index"
				| "@nest" | "@prefix"
				| "@protected"
		) {
			return Err(Error::InvalidTermDefinition);
		}
	}

	if let Some(previous_definition) = previous_definition {
		if previous_definition.protected && !override_protected {
			if !definition.modulo_protected_eq(&previous_definition) {
				return Err(Error::ProtectedTermRedefinition);
			}
			definition = previous_definition
		}
	}

	result.definitions_mut().insert(term.to_string(), definition);
	defined.insert(term.to_string(), true);
	Ok(())
}
