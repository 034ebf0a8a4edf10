//! IRI expansion and compaction against the active context.

use super::inverse::{LangSelection, Selection, TypeSelection};
use super::{Context, Error};
use crate::expanded;
use crate::syntax::{is_keyword, is_keyword_like, Container, ContainerKind, Direction, Keyword, Nullable};
use crate::util::{as_array, entry};
use iref::{Iri, IriRef};
use json_syntax::Value;

enum TypeLangValue<'a> {
	Type(TypeSelection),
	Lang(LangSelection<'a>),
}

impl Context {
	/// IRI expansion.
	///
	/// Expands `value` into an IRI, a blank node identifier or a keyword,
	/// using the vocabulary mapping if `vocab` is set and resolving relative
	/// IRI references against the base IRI if `document_relative` is set.
	/// Returns `None` when the value is dropped: it has the form of a keyword
	/// without being one, or it is a term explicitly mapped to `null`.
	pub fn expand_iri(
		&self,
		value: &str,
		document_relative: bool,
		vocab: bool,
	) -> Option<String> {
		if is_keyword(value) {
			return Some(value.to_string());
		}

		if is_keyword_like(value) {
			log::warn!("ignoring keyword-like value `{}`", value);
			return None;
		}

		// If active context has a term definition for value, and the
		// associated IRI mapping is a keyword, return that keyword.
		// If vocab is true and the active context has a term definition for
		// value, return the associated IRI mapping.
		if vocab {
			if let Some(definition) = self.get(value) {
				return definition.value.clone();
			}
		}

		// If value contains a colon (:) anywhere after the first character,
		// it is either an IRI, a compact IRI, or a blank node identifier.
		if let Some(i) = value.get(1..).and_then(|rest| rest.find(':')) {
			let i = i + 1;
			let prefix = &value[..i];
			let suffix = &value[i + 1..];

			if prefix == "_" || suffix.starts_with("//") {
				return Some(value.to_string());
			}

			if let Some(prefix_definition) = self.get(prefix) {
				if prefix_definition.prefix {
					if let Some(mapping) = &prefix_definition.value {
						return Some(format!("{mapping}{suffix}"));
					}
				}
			}

			return Some(value.to_string());
		}

		if vocab {
			if let Some(vocabulary) = self.vocabulary() {
				return Some(format!("{vocabulary}{value}"));
			}
		}

		if document_relative {
			if let Some(base_iri) = self.base_iri() {
				if let Ok(iri_ref) = IriRef::new(value) {
					return Some(iri_ref.resolved(base_iri).to_string());
				}
			}
		}

		Some(value.to_string())
	}

	/// Returns the shortest alias of the given keyword, if any.
	fn keyword_alias(&self, keyword: Keyword) -> Option<&str> {
		let mut alias: Option<&str> = None;
		for (term, definition) in self.definitions() {
			if definition.value.as_deref() == Some(keyword.as_str())
				&& !definition.reverse_property
			{
				let shorter = match alias {
					None => true,
					Some(a) => {
						term.len() < a.len() || (term.len() == a.len() && term.as_str() < a)
					}
				};
				if shorter {
					alias = Some(term.as_str())
				}
			}
		}
		alias
	}

	/// IRI compaction.
	///
	/// Compacts `var` (an IRI, blank node identifier or keyword) to its
	/// shortest form valid under this context: a term, a compact IRI, a
	/// vocabulary-relative suffix or a base-relative IRI reference. The shape
	/// of `value`, when given, drives the container preferences of term
	/// selection.
	pub fn compact_iri(
		&self,
		var: &str,
		value: Option<&Value>,
		vocab: bool,
		reverse: bool,
	) -> Result<String, Error> {
		if var.is_empty() {
			return Ok(var.to_string());
		}

		// A keyword can only be compacted to a simple alias.
		if let Ok(keyword) = Keyword::try_from(var) {
			return match self.keyword_alias(keyword) {
				Some(alias) => Ok(alias.to_string()),
				None => Ok(var.to_string()),
			};
		}

		if vocab {
			if self.inverse().contains(var) {
				// This array keeps track of an ordered list of preferred
				// container mappings for a term, based on what is compatible
				// with value.
				let mut containers = Vec::new();
				let mut type_lang_value = None;

				let value_object = value.and_then(Value::as_object);
				let has_index = value_object.map_or(false, |o| entry(o, "@index").is_some());
				let is_graph_object = value_object.map_or(false, expanded::is_graph);

				if has_index && !is_graph_object {
					containers.push(Container::from(ContainerKind::Index));
					containers.push(Container::from_kinds([
						ContainerKind::Index,
						ContainerKind::Set,
					]));
				}

				// Value object with no type, no index, no language and no
				// direction.
				let mut is_simple_value = false;

				if reverse {
					type_lang_value = Some(TypeLangValue::Type(TypeSelection::Reverse));
					containers.push(Container::from(ContainerKind::Set));
				} else {
					match value_object {
						Some(o) if expanded::is_list(o) => {
							if !has_index {
								containers.push(Container::from(ContainerKind::List));
							}

							let list = entry(o, "@list").map(as_array).unwrap_or(&[]);

							let mut common_type: Option<Option<String>> = None;
							let mut common_lang_dir: Option<
								Nullable<(Option<&str>, Option<Direction>)>,
							> = None;

							if list.is_empty() {
								common_lang_dir = Some(Nullable::Some((
									self.default_language(),
									self.default_base_direction(),
								)))
							} else {
								for item in list {
									let mut item_type = None;
									let mut item_lang_dir = None;
									let mut is_value_object = false;

									match item.as_object() {
										Some(item) if expanded::is_value(item) => {
											is_value_object = true;
											let lang = entry(item, "@language")
												.and_then(Value::as_str);
											let dir = entry(item, "@direction")
												.and_then(Value::as_str)
												.and_then(|d| Direction::try_from(d).ok());

											if lang.is_some() || dir.is_some() {
												item_lang_dir =
													Some(Nullable::Some((lang, dir)))
											} else if let Some(ty) =
												entry(item, "@type").and_then(Value::as_str)
											{
												item_type = Some(ty.to_string())
											} else {
												item_lang_dir = Some(Nullable::Null)
											}
										}
										_ => item_type = Some("@id".to_string()),
									}

									if common_lang_dir.is_none() {
										common_lang_dir = item_lang_dir
									} else if is_value_object && common_lang_dir != item_lang_dir
									{
										common_lang_dir = Some(Nullable::Some((None, None)))
									}

									if common_type.is_none() {
										common_type = Some(item_type)
									} else if *common_type.as_ref().unwrap() != item_type {
										common_type = Some(None)
									}

									if common_lang_dir == Some(Nullable::Some((None, None)))
										&& common_type == Some(None)
									{
										break;
									}
								}
							}

							let common_lang_dir =
								common_lang_dir.unwrap_or(Nullable::Some((None, None)));
							let common_type = common_type.unwrap_or(None);

							match common_type {
								Some(common_type) => {
									type_lang_value = Some(TypeLangValue::Type(
										TypeSelection::Type(common_type),
									))
								}
								None => {
									let (lang, dir) =
										common_lang_dir.option().unwrap_or((None, None));
									type_lang_value = Some(TypeLangValue::Lang(
										LangSelection::Lang(lang, dir),
									))
								}
							}
						}
						Some(o) if is_graph_object => {
							// Prefer a mapping most appropriate for the
							// particular graph object.
							let has_id = entry(o, "@id").is_some();

							if has_index {
								containers.push(Container::from_kinds([
									ContainerKind::Graph,
									ContainerKind::Index,
								]));
								containers.push(Container::from_kinds([
									ContainerKind::Graph,
									ContainerKind::Index,
									ContainerKind::Set,
								]));
							}

							if has_id {
								containers.push(Container::from_kinds([
									ContainerKind::Graph,
									ContainerKind::Id,
								]));
								containers.push(Container::from_kinds([
									ContainerKind::Graph,
									ContainerKind::Id,
									ContainerKind::Set,
								]));
							}

							containers.push(Container::from(ContainerKind::Graph));
							containers.push(Container::from_kinds([
								ContainerKind::Graph,
								ContainerKind::Set,
							]));
							containers.push(Container::from(ContainerKind::Set));

							if !has_index {
								containers.push(Container::from_kinds([
									ContainerKind::Graph,
									ContainerKind::Index,
								]));
								containers.push(Container::from_kinds([
									ContainerKind::Graph,
									ContainerKind::Index,
									ContainerKind::Set,
								]));
							}

							if !has_id {
								containers.push(Container::from_kinds([
									ContainerKind::Graph,
									ContainerKind::Id,
								]));
								containers.push(Container::from_kinds([
									ContainerKind::Graph,
									ContainerKind::Id,
									ContainerKind::Set,
								]));
							}

							containers.push(Container::from(ContainerKind::Index));
							containers.push(Container::from_kinds([
								ContainerKind::Index,
								ContainerKind::Set,
							]));

							type_lang_value = Some(TypeLangValue::Type(TypeSelection::Type(
								"@id".to_string(),
							)))
						}
						Some(o) if expanded::is_value(o) => {
							let lang = entry(o, "@language").and_then(Value::as_str);
							let dir = entry(o, "@direction")
								.and_then(Value::as_str)
								.and_then(|d| Direction::try_from(d).ok());

							if (lang.is_some() || dir.is_some()) && !has_index {
								type_lang_value =
									Some(TypeLangValue::Lang(LangSelection::Lang(lang, dir)));
								containers.push(Container::from(ContainerKind::Language));
								containers.push(Container::from_kinds([
									ContainerKind::Language,
									ContainerKind::Set,
								]));
							} else if let Some(ty) = entry(o, "@type").and_then(Value::as_str) {
								type_lang_value = Some(TypeLangValue::Type(
									TypeSelection::Type(ty.to_string()),
								))
							} else {
								is_simple_value = !has_index
							}

							containers.push(Container::from(ContainerKind::Set))
						}
						_ => {
							// Node object, subject reference or no value at
							// all: prefer id and type maps.
							type_lang_value = Some(TypeLangValue::Type(TypeSelection::Type(
								"@id".to_string(),
							)));
							containers.push(Container::from(ContainerKind::Id));
							containers.push(Container::from_kinds([
								ContainerKind::Id,
								ContainerKind::Set,
							]));
							containers.push(Container::from(ContainerKind::Type));
							containers.push(Container::from_kinds([
								ContainerKind::Set,
								ContainerKind::Type,
							]));
							containers.push(Container::from(ContainerKind::Set))
						}
					}
				}

				containers.push(Container::NONE);

				if self.processing_mode().is_1_1() && !has_index {
					containers.push(Container::from(ContainerKind::Index));
					containers.push(Container::from_kinds([
						ContainerKind::Index,
						ContainerKind::Set,
					]));
				}

				if self.processing_mode().is_1_1() && is_simple_value {
					containers.push(Container::from(ContainerKind::Language));
					containers.push(Container::from_kinds([
						ContainerKind::Language,
						ContainerKind::Set,
					]));
				}

				let is_empty_list = value_object.map_or(false, |o| {
					expanded::is_list(o)
						&& entry(o, "@list").map_or(false, |l| as_array(l).is_empty())
				});

				let selection = if is_empty_list {
					Selection::Any
				} else {
					match type_lang_value {
						Some(TypeLangValue::Type(type_value)) => {
							let mut selection: Vec<TypeSelection> = Vec::new();

							if type_value == TypeSelection::Reverse {
								selection.push(TypeSelection::Reverse);
							}

							let mut has_id_type = false;
							if let Some(id) =
								value_object.and_then(|o| entry(o, "@id")).and_then(Value::as_str)
							{
								if type_value == TypeSelection::Type("@id".to_string())
									|| type_value == TypeSelection::Reverse
								{
									has_id_type = true;

									// Prefer @vocab over @id when the
									// compacted form of the @id value expands
									// back to it.
									let compacted_iri = self.compact_iri(id, None, true, false)?;
									let vocab_preferred = self
										.get(&compacted_iri)
										.map_or(false, |d| d.value.as_deref() == Some(id));

									if vocab_preferred {
										selection
											.push(TypeSelection::Type("@vocab".to_string()));
										selection.push(TypeSelection::Type("@id".to_string()));
									} else {
										selection.push(TypeSelection::Type("@id".to_string()));
										selection
											.push(TypeSelection::Type("@vocab".to_string()));
									}

									selection.push(TypeSelection::None);
								}
							}

							if !has_id_type {
								selection.push(type_value);
								selection.push(TypeSelection::None);
							}

							selection.push(TypeSelection::Any);

							Selection::Type(selection)
						}
						Some(TypeLangValue::Lang(lang_value)) => {
							let mut selection = vec![lang_value];

							if let LangSelection::Lang(Some(_), Some(dir)) = lang_value {
								selection.push(LangSelection::Lang(None, Some(dir)));
							}

							selection.push(LangSelection::None);
							selection.push(LangSelection::Any);

							Selection::Lang(selection)
						}
						None => Selection::Lang(vec![
							LangSelection::Lang(None, None),
							LangSelection::None,
							LangSelection::Any,
						]),
					}
				};

				if let Some(term) = self.inverse().select(var, &containers, &selection) {
					return Ok(term.to_string());
				}
			}

			// At this point, there is no simple term that var can be
			// compacted to. If vocab is true and active context has a
			// vocabulary mapping:
			if let Some(vocab_mapping) = self.vocabulary() {
				// If var begins with the vocabulary mapping's value but is
				// longer, then initialize suffix to the substring of var that
				// does not match. If suffix does not have a term definition
				// in active context, then return suffix.
				if let Some(suffix) = var.strip_prefix(vocab_mapping) {
					if !suffix.is_empty() && self.get(suffix).is_none() {
						return Ok(suffix.to_string());
					}
				}
			}
		}

		// The var could not be compacted using the active context's
		// vocabulary mapping. Try to create a compact IRI, starting by
		// initializing compact IRI to null. This variable will be used to
		// store the created compact IRI, if any.
		let mut compact_iri = String::new();

		// For each term definition definition in active context:
		for (key, definition) in self.definitions() {
			// If the IRI mapping of definition is null, its IRI mapping
			// equals var, its IRI mapping is not a substring at the beginning
			// of var, or definition does not have a true prefix flag,
			// definition's key cannot be used as a prefix. Continue with the
			// next definition.
			if !definition.prefix {
				continue;
			}

			if let Some(iri_mapping) = &definition.value {
				if let Some(suffix) = var.strip_prefix(iri_mapping.as_str()) {
					if !suffix.is_empty() {
						// Initialize candidate by concatenating definition
						// key, a colon (:), and the substring of var that
						// follows after the value of the definition's IRI
						// mapping.
						let mut candidate = key.clone();
						candidate.push(':');
						candidate.push_str(suffix);

						// If either compact IRI is null, candidate is shorter
						// or the same length but lexicographically less than
						// compact IRI and candidate does not have a term
						// definition in active context, or if that term
						// definition has an IRI mapping that equals var and
						// value is null, set compact IRI to candidate.
						let candidate_definition = self.get(&candidate);
						if (compact_iri.is_empty()
							|| (candidate.len() <= compact_iri.len()
								&& candidate < compact_iri))
							&& (candidate_definition.is_none()
								|| (candidate_definition
									.map_or(false, |d| d.value.as_deref() == Some(var))
									&& value.is_none()))
						{
							compact_iri = candidate
						}
					}
				}
			}
		}

		// If compact IRI is not null, return compact IRI.
		if !compact_iri.is_empty() {
			return Ok(compact_iri);
		}

		// To ensure that the IRI var is not confused with a compact IRI, if
		// the IRI scheme of var matches any term in active context with
		// prefix flag set to true, and var has no IRI authority (preceded by
		// double-forward-slash (//), an IRI confused with prefix error has
		// been detected, and processing is aborted.
		if let Ok(iri) = Iri::new(var) {
			let scheme = iri.scheme().as_str();
			if let Some(definition) = self.get(scheme) {
				if definition.prefix && !var[scheme.len()..].starts_with("://") {
					return Err(Error::IriConfusedWithPrefix);
				}
			}
		}

		// If vocab is false, transform var to a relative IRI reference using
		// the base IRI from active context, if it exists.
		if !vocab {
			if let Some(base_iri) = self.base_iri() {
				if let Ok(iri) = Iri::new(var) {
					return Ok(iri.relative_to(base_iri).to_string());
				}
			}
		}

		// Finally, return var as is.
		Ok(var.to_string())
	}
}

#[cfg(test)]
mod tests {
	use crate::{Context, ProcessingMode};
	use json_syntax::{Parse, Value};

	fn context(json: &str) -> Context {
		let local = Value::parse_str(json).unwrap().0;
		Context::new(None).parse(&local).unwrap()
	}

	#[test]
	fn expand_term_and_prefix() {
		let ctx = context(r#"{"ex": "http://example.com/", "name": "http://example.com/name"}"#);
		assert_eq!(
			ctx.expand_iri("name", false, true),
			Some("http://example.com/name".to_string())
		);
		assert_eq!(
			ctx.expand_iri("ex:age", false, true),
			Some("http://example.com/age".to_string())
		);
		assert_eq!(ctx.expand_iri("@nest", false, true), Some("@nest".to_string()));
		assert_eq!(ctx.expand_iri("@ignoreMe", false, true), None);
	}

	#[test]
	fn expand_with_vocabulary() {
		let ctx = context(r#"{"@vocab": "http://example.com/ns#"}"#);
		assert_eq!(
			ctx.expand_iri("name", false, true),
			Some("http://example.com/ns#name".to_string())
		);
		assert_eq!(ctx.expand_iri("name", false, false), Some("name".to_string()));
	}

	#[test]
	fn expand_document_relative() {
		let base = iref::IriBuf::new("http://example.com/dir/doc".to_string()).unwrap();
		let ctx = Context::new(Some(base));
		assert_eq!(
			ctx.expand_iri("other", true, false),
			Some("http://example.com/dir/other".to_string())
		);
	}

	#[test]
	fn compact_to_term() {
		let ctx = context(r#"{"name": "http://example.com/name"}"#);
		assert_eq!(
			ctx.compact_iri("http://example.com/name", None, true, false)
				.unwrap(),
			"name"
		);
	}

	#[test]
	fn compact_to_compact_iri() {
		let ctx = context(r#"{"ex": "http://example.com/"}"#);
		assert_eq!(
			ctx.compact_iri("http://example.com/name", None, true, false)
				.unwrap(),
			"ex:name"
		);
		assert_eq!(
			ctx.compact_iri("http://example.com/name", None, false, false)
				.unwrap(),
			"ex:name"
		);
	}

	#[test]
	fn compact_vocab_suffix() {
		let ctx = context(r#"{"@vocab": "http://example.com/ns#"}"#);
		assert_eq!(
			ctx.compact_iri("http://example.com/ns#name", None, true, false)
				.unwrap(),
			"name"
		);
	}

	#[test]
	fn compact_keyword_alias() {
		let ctx = context(r#"{"id": "@id", "identifier": "@id"}"#);
		assert_eq!(ctx.compact_iri("@id", None, true, false).unwrap(), "id");
		assert_eq!(ctx.compact_iri("@type", None, true, false).unwrap(), "@type");
	}

	#[test]
	fn confused_with_prefix() {
		let ctx = context(r#"{"http": "http://example.com/"}"#);
		assert_eq!(
			ctx.compact_iri("http:name", None, true, false),
			Err(crate::context::Error::IriConfusedWithPrefix)
		);
	}

	#[test]
	fn language_term_selection() {
		let ctx = context(
			r#"{
				"label_en": {"@id": "http://example.com/label", "@language": "en"},
				"label": {"@id": "http://example.com/label"}
			}"#,
		);

		let en_value = Value::parse_str(r#"{"@value": "x", "@language": "en"}"#).unwrap().0;
		assert_eq!(
			ctx.compact_iri("http://example.com/label", Some(&en_value), true, false)
				.unwrap(),
			"label_en"
		);

		let plain = Value::parse_str(r#"{"@value": "x"}"#).unwrap().0;
		assert_eq!(
			ctx.compact_iri("http://example.com/label", Some(&plain), true, false)
				.unwrap(),
			"label"
		);
	}

	#[test]
	fn version_requires_1_1() {
		let local = Value::parse_str(r#"{"@version": 1.1}"#).unwrap().0;
		let ctx = Context::new(None).with_processing_mode(ProcessingMode::JsonLd1_0);
		assert!(ctx.parse(&local).is_err());
	}
}
