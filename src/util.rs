//! JSON helpers shared by the compaction and context algorithms.

use crate::syntax::Keyword;
use json_syntax::object::Entry;
use json_syntax::{Object, Value};
use std::cmp::Ordering;

/// Merges `value` into the `key` entry of `map`.
///
/// If `as_array` is true and no entry exists yet, an empty array is created
/// first. Array values are flattened into the entry one item at a time. An
/// existing entry is promoted to an array on the second insertion, unless
/// `property_is_array` is false, in which case the entry is single-valued and
/// the new value replaces it. With `allow_duplicates` false, values already
/// held by the entry are dropped.
pub(crate) fn add_value(
	map: &mut Object,
	key: &str,
	value: Value,
	as_array: bool,
	allow_duplicates: bool,
	property_is_array: bool,
) {
	if as_array && map.get_unique(key).ok().unwrap().is_none() {
		map.insert(key.into(), Value::Array(Vec::new()));
	}

	match value {
		Value::Array(values) => {
			for value in values {
				add_value(map, key, value, false, allow_duplicates, property_is_array)
			}
		}
		value => {
			let (exists, is_array, duplicate) = match map.get_unique(key).ok().unwrap() {
				Some(entry) => (
					true,
					entry.is_array(),
					!allow_duplicates && has_value(entry, &value),
				),
				None => (false, false, false),
			};

			if duplicate {
				return;
			}

			if !exists || (!is_array && !property_is_array) {
				map.insert(key.into(), value);
				return;
			}

			if !is_array {
				// Promote the entry to an array on the second insertion.
				let Entry { key, value } = map.remove_unique(key).ok().unwrap().unwrap();
				map.insert(key, Value::Array(vec![value]));
			}

			map.get_unique_mut(key)
				.ok()
				.unwrap()
				.unwrap()
				.as_array_mut()
				.unwrap()
				.push(value)
		}
	}
}

/// Checks if the entry already holds the given value.
fn has_value(entry: &Value, value: &Value) -> bool {
	match entry {
		Value::Array(items) => items.contains(value),
		other => other == value,
	}
}

/// Returns the keys of `object` in canonical order: reserved keywords first,
/// by keyword rank, followed by the remaining keys in lexicographical order.
pub(crate) fn ordered_keys(object: &Object) -> Vec<&str> {
	let mut keys: Vec<&str> = object.entries().iter().map(|e| e.key.as_str()).collect();
	keys.sort_by(|a, b| match (Keyword::try_from(*a), Keyword::try_from(*b)) {
		(Ok(a), Ok(b)) => a.rank().cmp(&b.rank()).then_with(|| a.as_str().cmp(b.as_str())),
		(Ok(_), Err(_)) => Ordering::Less,
		(Err(_), Ok(_)) => Ordering::Greater,
		(Err(_), Err(_)) => a.cmp(b),
	});
	keys
}

/// Views any value as a slice of values, wrapping non-arrays as a singleton.
pub(crate) fn as_array(value: &Value) -> &[Value] {
	match value {
		Value::Array(items) => items,
		other => std::slice::from_ref(other),
	}
}

/// Returns the value of the `key` entry of `object`, if any.
pub(crate) fn entry<'a>(object: &'a Object, key: &str) -> Option<&'a Value> {
	object.get_unique(key).ok().unwrap()
}

#[cfg(test)]
mod tests {
	use super::*;
	use json_syntax::{Parse, Value};

	fn parse(s: &str) -> Value {
		Value::parse_str(s).unwrap().0
	}

	#[test]
	fn add_value_promotes_to_array() {
		let mut map = Object::default();
		add_value(&mut map, "a", parse("1"), false, false, true);
		assert_eq!(Value::Object(map.clone()), parse(r#"{"a": 1}"#));

		add_value(&mut map, "a", parse("2"), false, false, true);
		assert_eq!(Value::Object(map), parse(r#"{"a": [1, 2]}"#));
	}

	#[test]
	fn add_value_creates_empty_array() {
		let mut map = Object::default();
		add_value(&mut map, "a", Value::Array(Vec::new()), true, false, true);
		assert_eq!(Value::Object(map), parse(r#"{"a": []}"#));
	}

	#[test]
	fn add_value_flattens_arrays() {
		let mut map = Object::default();
		add_value(&mut map, "a", parse("[1, 2]"), false, false, true);
		add_value(&mut map, "a", parse("[3]"), false, false, true);
		assert_eq!(Value::Object(map), parse(r#"{"a": [1, 2, 3]}"#));
	}

	#[test]
	fn add_value_as_array_wraps_single_value() {
		let mut map = Object::default();
		add_value(&mut map, "a", parse("1"), true, false, true);
		assert_eq!(Value::Object(map), parse(r#"{"a": [1]}"#));
	}

	#[test]
	fn add_value_suppresses_duplicates() {
		let mut map = Object::default();
		add_value(&mut map, "a", parse(r#""v""#), false, false, true);
		add_value(&mut map, "a", parse(r#""v""#), false, false, true);
		assert_eq!(Value::Object(map.clone()), parse(r#"{"a": "v"}"#));

		add_value(&mut map, "a", parse(r#""w""#), false, false, true);
		add_value(&mut map, "a", parse(r#""v""#), false, false, true);
		assert_eq!(Value::Object(map), parse(r#"{"a": ["v", "w"]}"#));
	}

	#[test]
	fn add_value_allows_duplicates_when_asked() {
		let mut map = Object::default();
		add_value(&mut map, "a", parse(r#""v""#), true, true, true);
		add_value(&mut map, "a", parse(r#""v""#), true, true, true);
		assert_eq!(Value::Object(map), parse(r#"{"a": ["v", "v"]}"#));
	}

	#[test]
	fn add_value_single_valued_entry_is_replaced() {
		let mut map = Object::default();
		add_value(&mut map, "a", parse("1"), false, false, false);
		add_value(&mut map, "a", parse("2"), false, false, false);
		assert_eq!(Value::Object(map), parse(r#"{"a": 2}"#));
	}

	#[test]
	fn key_order() {
		let object = match parse(
			r#"{
				"http://example.com/b": 0,
				"@type": 0,
				"http://example.com/a": 0,
				"@index": 0,
				"@id": 0
			}"#,
		) {
			Value::Object(o) => o,
			_ => unreachable!(),
		};

		assert_eq!(
			ordered_keys(&object),
			[
				"@id",
				"@type",
				"@index",
				"http://example.com/a",
				"http://example.com/b"
			]
		);
	}
}
