//! Value compaction.

use super::{Context, Error};
use crate::syntax::{ContainerKind, Direction, Nullable};
use crate::util::entry;
use json_syntax::{Object, Value};

impl Context {
	/// Value compaction.
	///
	/// Reduces a value object or subject reference to its most compact form
	/// under this context: a bare scalar when the metadata of the value is
	/// carried by the `active_property` term definition (or the context
	/// defaults), or an object with compacted keys otherwise.
	pub fn compact_value(
		&self,
		active_property: Option<&str>,
		value: &Object,
	) -> Result<Value, Error> {
		let definition = active_property.and_then(|property| self.get(property));
		let type_mapping = definition.and_then(|d| d.typ.as_deref());

		// Effective language and direction: the term mapping if any,
		// otherwise the context default. An explicit null mapping clears the
		// default.
		let language = match definition.and_then(|d| d.language.as_ref()) {
			Some(Nullable::Null) => None,
			Some(Nullable::Some(language)) => Some(language.as_str()),
			None => self.default_language(),
		};
		let direction = match definition.and_then(|d| d.direction.as_ref()) {
			Some(Nullable::Null) => None,
			Some(Nullable::Some(direction)) => Some(*direction),
			None => self.default_base_direction(),
		};

		// An `@index` entry absorbed by an `@index` container does not count
		// against scalar compaction.
		let index_absorbed = entry(value, "@index").is_some()
			&& active_property
				.map_or(false, |p| self.has_container_mapping(p, ContainerKind::Index));

		let only = |allowed: &[&str]| {
			value.entries().iter().all(|e| {
				allowed.contains(&e.key.as_str()) || (e.key.as_str() == "@index" && index_absorbed)
			})
		};

		if let Some(id) = entry(value, "@id") {
			if only(&["@id"]) {
				if let Some(id) = id.as_str() {
					match type_mapping {
						Some("@id") => {
							return Ok(self.compact_iri(id, None, false, false)?.into())
						}
						Some("@vocab") => {
							return Ok(self.compact_iri(id, None, true, false)?.into())
						}
						_ => (),
					}
				}
			}
		} else if let Some(value_value) = entry(value, "@value") {
			let type_value = entry(value, "@type").and_then(Value::as_str);
			let lang_value = entry(value, "@language").and_then(Value::as_str);
			let dir_value = entry(value, "@direction")
				.and_then(Value::as_str)
				.and_then(|d| Direction::try_from(d).ok());

			if let Some(type_value) = type_value {
				// A type matching the type mapping of the active property is
				// implied by it.
				if Some(type_value) == type_mapping && only(&["@value", "@type"]) {
					return Ok(value_value.clone());
				}
			} else if lang_value.is_some() || dir_value.is_some() {
				let language_matches = match (lang_value, language) {
					(Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
					(None, None) => true,
					_ => false,
				};
				let direction_matches = match (dir_value, direction) {
					(Some(a), Some(b)) => a == b,
					(None, None) => true,
					_ => false,
				};

				if language_matches
					&& direction_matches
					&& only(&["@value", "@language", "@direction"])
				{
					return Ok(value_value.clone());
				}
			} else if only(&["@value"]) {
				// A plain literal compacts to its value unless a default
				// language or direction would apply to the bare string.
				if !value_value.is_string() || (language.is_none() && direction.is_none()) {
					return Ok(value_value.clone());
				}
			}
		}

		// The value cannot be represented as a scalar: emit the object form,
		// compacting every key and the `@type` value.
		let mut result = Object::default();
		for e in value.entries() {
			match e.key.as_str() {
				"@index" if index_absorbed => (),
				"@type" => {
					let key = self.compact_iri("@type", None, true, false)?;
					let ty = match e.value.as_str() {
						Some(t) => self.compact_iri(t, None, true, false)?.into(),
						None => e.value.clone(),
					};
					result.insert(key.into(), ty);
				}
				"@id" => {
					let key = self.compact_iri("@id", None, true, false)?;
					let id = match e.value.as_str() {
						Some(id) => self.compact_iri(id, None, false, false)?.into(),
						None => e.value.clone(),
					};
					result.insert(key.into(), id);
				}
				key => {
					let compacted_key = self.compact_iri(key, None, true, false)?;
					result.insert(compacted_key.into(), e.value.clone());
				}
			}
		}

		Ok(Value::Object(result))
	}
}

#[cfg(test)]
mod tests {
	use crate::Context;
	use json_syntax::{Parse, Value};

	fn parse(s: &str) -> Value {
		Value::parse_str(s).unwrap().0
	}

	fn context(s: &str) -> Context {
		Context::new(None).parse(&parse(s)).unwrap()
	}

	fn object(s: &str) -> json_syntax::Object {
		match parse(s) {
			Value::Object(o) => o,
			_ => panic!("not an object"),
		}
	}

	#[test]
	fn plain_literal() {
		let ctx = context(r#"{"ex": "http://example.com/"}"#);
		let compacted = ctx
			.compact_value(Some("ex:p"), &object(r#"{"@value": "v"}"#))
			.unwrap();
		assert_eq!(compacted, parse(r#""v""#));
	}

	#[test]
	fn typed_value_with_matching_mapping() {
		let ctx = context(
			r#"{
				"ex": "http://example.com/",
				"age": {"@id": "ex:age", "@type": "ex:integer"}
			}"#,
		);

		let compacted = ctx
			.compact_value(
				Some("age"),
				&object(r#"{"@value": 30, "@type": "http://example.com/integer"}"#),
			)
			.unwrap();
		assert_eq!(compacted, parse("30"));
	}

	#[test]
	fn typed_value_without_mapping_keeps_object() {
		let ctx = context(r#"{"ex": "http://example.com/"}"#);
		let compacted = ctx
			.compact_value(
				None,
				&object(r#"{"@value": 30, "@type": "http://example.com/integer"}"#),
			)
			.unwrap();
		assert_eq!(compacted, parse(r#"{"@value": 30, "@type": "ex:integer"}"#));
	}

	#[test]
	fn language_tagged_string() {
		let ctx = context(r#"{"@language": "en", "ex": "http://example.com/"}"#);

		let compacted = ctx
			.compact_value(
				Some("ex:label"),
				&object(r#"{"@value": "hello", "@language": "en"}"#),
			)
			.unwrap();
		assert_eq!(compacted, parse(r#""hello""#));

		let compacted = ctx
			.compact_value(
				Some("ex:label"),
				&object(r#"{"@value": "bonjour", "@language": "fr"}"#),
			)
			.unwrap();
		assert_eq!(
			compacted,
			parse(r#"{"@value": "bonjour", "@language": "fr"}"#)
		);

		// A bare string under a default language cannot collapse.
		let compacted = ctx
			.compact_value(Some("ex:label"), &object(r#"{"@value": "plain"}"#))
			.unwrap();
		assert_eq!(compacted, parse(r#"{"@value": "plain"}"#));
	}

	#[test]
	fn id_coercion() {
		let ctx = context(
			r#"{
				"ex": "http://example.com/",
				"knows": {"@id": "ex:knows", "@type": "@id"}
			}"#,
		);

		let compacted = ctx
			.compact_value(Some("knows"), &object(r#"{"@id": "http://example.com/a"}"#))
			.unwrap();
		assert_eq!(compacted, parse(r#""ex:a""#));
	}

	#[test]
	fn subject_reference_without_coercion() {
		let ctx = context(r#"{"ex": "http://example.com/"}"#);
		let compacted = ctx
			.compact_value(None, &object(r#"{"@id": "http://example.com/a"}"#))
			.unwrap();
		assert_eq!(compacted, parse(r#"{"@id": "ex:a"}"#));
	}
}
