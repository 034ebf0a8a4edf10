//! Classification of expanded-form entities.
//!
//! Expanded JSON-LD entities are plain JSON objects whose kind is determined
//! by the reserved keys they carry. The predicates below implement the
//! classification used by the compaction algorithm; they assume their input
//! comes out of the expansion algorithm and do not validate anything else.

use json_syntax::Object;

fn has(object: &Object, key: &str) -> bool {
	object.get_unique(key).ok().unwrap().is_some()
}

/// Checks if the given object is a value object (it has a `@value` entry).
pub fn is_value(object: &Object) -> bool {
	has(object, "@value")
}

/// Checks if the given object is a subject reference: its only entry is
/// `@id`.
pub fn is_subject_reference(object: &Object) -> bool {
	object.len() == 1 && has(object, "@id")
}

/// Checks if the given object is a list object (it has a `@list` entry).
pub fn is_list(object: &Object) -> bool {
	has(object, "@list")
}

/// Checks if the given object is a graph object: it has a `@graph` entry and
/// no entries other than `@graph`, `@id` and `@index`.
pub fn is_graph(object: &Object) -> bool {
	has(object, "@graph")
		&& object
			.entries()
			.iter()
			.all(|e| matches!(e.key.as_str(), "@graph" | "@id" | "@index"))
}

/// Checks if the given object is a simple graph object: a graph object
/// without `@id`.
pub fn is_simple_graph(object: &Object) -> bool {
	is_graph(object) && !has(object, "@id")
}

#[cfg(test)]
mod tests {
	use super::*;
	use json_syntax::{Parse, Value};

	fn object(s: &str) -> Object {
		match Value::parse_str(s).unwrap().0 {
			Value::Object(o) => o,
			_ => panic!("not an object"),
		}
	}

	#[test]
	fn classification() {
		assert!(is_value(&object(r#"{"@value": 1, "@type": "http://t"}"#)));
		assert!(!is_value(&object(r#"{"@id": "http://x"}"#)));

		assert!(is_subject_reference(&object(r#"{"@id": "http://x"}"#)));
		assert!(!is_subject_reference(&object(
			r#"{"@id": "http://x", "http://p": []}"#
		)));

		assert!(is_list(&object(r#"{"@list": []}"#)));

		assert!(is_graph(&object(r#"{"@graph": [], "@id": "http://g"}"#)));
		assert!(!is_graph(&object(r#"{"@graph": [], "http://p": []}"#)));

		assert!(is_simple_graph(&object(r#"{"@graph": [], "@index": "i"}"#)));
		assert!(!is_simple_graph(&object(
			r#"{"@graph": [], "@id": "http://g"}"#
		)));
	}
}
