//! End-to-end compaction tests over parsed expanded documents.

use json_ld_compact::{Compact, Context, Error, Options};
use json_syntax::{Parse, Value};

fn parse(s: &str) -> Value {
	Value::parse_str(s).unwrap().0
}

fn context(s: &str) -> Context {
	Context::new(None).parse(&parse(s)).unwrap()
}

fn compact(context_json: &str, document: &str) -> Value {
	parse(document).compact(&context(context_json)).unwrap()
}

fn compact_with(context_json: &str, document: &str, options: Options) -> Value {
	parse(document)
		.compact_full(&context(context_json), None, options)
		.unwrap()
}

#[test]
fn iri_aliasing() {
	let compacted = compact(
		r#"{"ex": "http://ex/", "ex:p": {}}"#,
		r#"{"@id": "http://ex/x", "http://ex/p": [{"@value": "v"}]}"#,
	);
	assert_eq!(compacted, parse(r#"{"@id": "ex:x", "ex:p": "v"}"#));
}

#[test]
fn single_element_array_collapse() {
	let compacted = compact(
		r#"{"ex": "http://ex/"}"#,
		r#"{"http://ex/p": [{"@value": 1}]}"#,
	);
	assert_eq!(compacted, parse(r#"{"ex:p": 1}"#));

	let compacted = compact_with(
		r#"{"ex": "http://ex/"}"#,
		r#"{"http://ex/p": [{"@value": 1}]}"#,
		Options {
			compact_arrays: false,
		},
	);
	assert_eq!(compacted, parse(r#"{"ex:p": [1]}"#));
}

#[test]
fn top_level_array() {
	let compacted = compact_with(
		r#"{"ex": "http://ex/"}"#,
		r#"[{"http://ex/p": [{"@value": 1}]}]"#,
		Options {
			compact_arrays: false,
		},
	);
	assert_eq!(compacted, parse(r#"[{"ex:p": [1]}]"#));
}

#[test]
fn null_values_dropped() {
	let compacted = compact(r#"{"ex": "http://ex/"}"#, r#"[{"@value": null}]"#);
	assert_eq!(compacted, parse("[]"));
}

#[test]
fn list_wrapping() {
	let compacted = compact(
		r#"{"ex": "http://ex/"}"#,
		r#"{"http://ex/p": [{"@list": [{"@value": "a"}, {"@value": "b"}]}]}"#,
	);
	assert_eq!(compacted, parse(r#"{"ex:p": {"@list": ["a", "b"]}}"#));
}

#[test]
fn list_container_elision() {
	let ctx = r#"{"ex": "http://ex/", "ex:p": {"@container": "@list"}}"#;

	let compacted = compact(
		ctx,
		r#"{"http://ex/p": [{"@list": [{"@value": "a"}, {"@value": "b"}]}]}"#,
	);
	assert_eq!(compacted, parse(r#"{"ex:p": ["a", "b"]}"#));

	// A single-element list stays an array: the property has a container.
	let compacted = compact(ctx, r#"{"http://ex/p": [{"@list": [{"@value": "a"}]}]}"#);
	assert_eq!(compacted, parse(r#"{"ex:p": ["a"]}"#));
}

#[test]
fn duplicate_values_collapse() {
	let compacted = compact(
		r#"{"ex": "http://ex/"}"#,
		r#"{"http://ex/p": [{"@value": "v"}, {"@value": "v"}]}"#,
	);
	assert_eq!(compacted, parse(r#"{"ex:p": "v"}"#));
}

#[test]
fn list_container_merges_lists() {
	let compacted = compact(
		r#"{"ex": "http://ex/", "ex:p": {"@container": "@list"}}"#,
		r#"{
			"http://ex/p": [
				{"@list": [{"@value": "a"}]},
				{"@list": [{"@value": "b"}]}
			]
		}"#,
	);
	assert_eq!(compacted, parse(r#"{"ex:p": ["a", "b"]}"#));
}

#[test]
fn list_index_carried_over() {
	let compacted = compact(
		r#"{"ex": "http://ex/"}"#,
		r#"{"http://ex/p": [{"@list": [{"@value": "a"}], "@index": "i"}]}"#,
	);
	assert_eq!(
		compacted,
		parse(r#"{"ex:p": {"@list": ["a"], "@index": "i"}}"#)
	);
}

#[test]
fn language_map() {
	let compacted = compact(
		r#"{"ex": "http://ex/", "ex:label": {"@container": "@language"}}"#,
		r#"{
			"http://ex/label": [
				{"@value": "hello", "@language": "en"},
				{"@value": "bonjour", "@language": "fr"}
			]
		}"#,
	);
	assert_eq!(
		compacted,
		parse(r#"{"ex:label": {"en": "hello", "fr": "bonjour"}}"#)
	);
}

#[test]
fn empty_language_key_falls_back_to_none() {
	let compacted = compact(
		r#"{"ex": "http://ex/", "ex:label": {"@container": "@language"}}"#,
		r#"{"http://ex/label": [{"@value": "x", "@language": ""}]}"#,
	);
	assert_eq!(compacted, parse(r#"{"ex:label": {"@none": "x"}}"#));
}

#[test]
fn index_map() {
	let compacted = compact(
		r#"{"ex": "http://ex/", "ex:p": {"@container": "@index"}}"#,
		r#"{
			"http://ex/p": [
				{"@value": "a", "@index": "i1"},
				{"@value": "b", "@index": "i2"}
			]
		}"#,
	);
	assert_eq!(compacted, parse(r#"{"ex:p": {"i1": "a", "i2": "b"}}"#));
}

#[test]
fn index_entry_absorbed_by_container() {
	let compacted = compact(
		r#"{"ex": "http://ex/", "ex:p": {"@container": "@index"}}"#,
		r#"{
			"http://ex/p": [
				{"@id": "http://ex/n", "@index": "k", "http://ex/q": [{"@value": 1}]}
			]
		}"#,
	);
	assert_eq!(
		compacted,
		parse(r#"{"ex:p": {"k": {"@id": "ex:n", "ex:q": 1}}}"#)
	);
}

#[test]
fn id_map() {
	let compacted = compact(
		r#"{"ex": "http://ex/", "ex:p": {"@container": "@id"}}"#,
		r#"{
			"http://ex/p": [
				{"@id": "http://ex/a", "http://ex/q": [{"@value": 1}]},
				{"http://ex/q": [{"@value": 2}]}
			]
		}"#,
	);
	assert_eq!(
		compacted,
		parse(r#"{"ex:p": {"ex:a": {"ex:q": 1}, "@none": {"ex:q": 2}}}"#)
	);
}

#[test]
fn type_map() {
	let compacted = compact(
		r#"{"ex": "http://ex/", "ex:p": {"@container": "@type"}}"#,
		r#"{
			"http://ex/p": [
				{
					"@id": "http://ex/a",
					"@type": ["http://ex/T1", "http://ex/T2"],
					"http://ex/q": [{"@value": 1}]
				}
			]
		}"#,
	);
	assert_eq!(
		compacted,
		parse(r#"{"ex:p": {"ex:T1": {"@id": "ex:a", "ex:q": 1, "@type": "ex:T2"}}}"#)
	);
}

#[test]
fn type_map_collapses_lone_reference() {
	let compacted = compact(
		r#"{"ex": "http://ex/", "ex:p": {"@container": "@type", "@type": "@id"}}"#,
		r#"{"http://ex/p": [{"@id": "http://ex/a", "@type": ["http://ex/T1"]}]}"#,
	);
	assert_eq!(compacted, parse(r#"{"ex:p": {"ex:T1": "ex:a"}}"#));
}

#[test]
fn graph_id_map() {
	let compacted = compact(
		r#"{"ex": "http://ex/", "ex:g": {"@container": ["@graph", "@id"]}}"#,
		r#"{
			"http://ex/g": [
				{"@graph": [{"http://ex/q": [{"@value": 1}]}], "@id": "http://ex/g1"},
				{"@graph": [{"http://ex/q": [{"@value": 2}]}]}
			]
		}"#,
	);
	assert_eq!(
		compacted,
		parse(r#"{"ex:g": {"http://ex/g1": {"ex:q": 1}, "@none": {"ex:q": 2}}}"#)
	);
}

#[test]
fn graph_index_map() {
	let compacted = compact(
		r#"{"ex": "http://ex/", "ex:g": {"@container": ["@graph", "@index"]}}"#,
		r#"{
			"http://ex/g": [
				{"@graph": [{"http://ex/q": [{"@value": 1}]}], "@index": "i1"}
			]
		}"#,
	);
	assert_eq!(compacted, parse(r#"{"ex:g": {"i1": {"ex:q": 1}}}"#));
}

#[test]
fn simple_graph_container() {
	let ctx = r#"{"ex": "http://ex/", "ex:g": {"@container": "@graph"}}"#;

	let compacted = compact(
		ctx,
		r#"{"http://ex/g": [{"@graph": [{"http://ex/q": [{"@value": 1}]}]}]}"#,
	);
	assert_eq!(compacted, parse(r#"{"ex:g": {"ex:q": 1}}"#));

	// Multiple nodes in a simple graph are wrapped in @included.
	let compacted = compact(
		ctx,
		r#"{
			"http://ex/g": [
				{
					"@graph": [
						{"http://ex/q": [{"@value": 1}]},
						{"http://ex/q": [{"@value": 2}]}
					]
				}
			]
		}"#,
	);
	assert_eq!(
		compacted,
		parse(r#"{"ex:g": {"@included": [{"ex:q": 1}, {"ex:q": 2}]}}"#)
	);
}

#[test]
fn graph_wrapping_without_container() {
	let compacted = compact(
		r#"{"ex": "http://ex/"}"#,
		r#"{
			"http://ex/g": [
				{"@graph": [{"http://ex/q": [{"@value": 1}]}], "@id": "http://ex/g1"}
			]
		}"#,
	);
	assert_eq!(
		compacted,
		parse(r#"{"ex:g": {"@graph": {"ex:q": 1}, "@id": "http://ex/g1"}}"#)
	);
}

#[test]
fn reverse_property_moved_up() {
	let compacted = compact(
		r#"{"ex": "http://ex/", "child": {"@reverse": "ex:parent"}}"#,
		r#"{"@reverse": {"http://ex/parent": [{"@id": "http://ex/p1"}]}}"#,
	);
	assert_eq!(compacted, parse(r#"{"child": {"@id": "ex:p1"}}"#));
}

#[test]
fn reverse_residual_kept() {
	let compacted = compact(
		r#"{"ex": "http://ex/"}"#,
		r#"{"@reverse": {"http://ex/parent": [{"@id": "http://ex/p1"}]}}"#,
	);
	assert_eq!(
		compacted,
		parse(r#"{"@reverse": {"ex:parent": {"@id": "ex:p1"}}}"#)
	);
}

#[test]
fn nest_redirection() {
	let compacted = compact(
		r#"{
			"ex": "http://ex/",
			"labels": {"@id": "ex:label", "@nest": "metadata"},
			"metadata": "@nest"
		}"#,
		r#"{"http://ex/label": [{"@value": "x"}]}"#,
	);
	assert_eq!(compacted, parse(r#"{"metadata": {"labels": "x"}}"#));
}

#[test]
fn invalid_nest_value() {
	let result = parse(r#"{"http://ex/label": [{"@value": "x"}]}"#).compact(&context(
		r#"{
			"ex": "http://ex/",
			"labels": {"@id": "ex:label", "@nest": "meta"},
			"meta": "ex:meta"
		}"#,
	));
	assert_eq!(result.unwrap_err(), Error::InvalidNestValue);
}

#[test]
fn type_scoped_context_order_independence() {
	let ctx = r#"{
		"ex": "http://ex/",
		"T1": {"@id": "ex:T1", "@context": {"p": "ex:p1"}},
		"T2": {"@id": "ex:T2", "@context": {"p": "ex:p2"}}
	}"#;

	// Scoped contexts overlay in lexicographical order of the compacted
	// types, whatever the order they appear in: `p` ends up meaning `ex:p2`.
	let compacted = compact(
		ctx,
		r#"{"@type": ["http://ex/T2", "http://ex/T1"], "http://ex/p2": [{"@value": 1}]}"#,
	);
	assert_eq!(compacted, parse(r#"{"@type": ["T2", "T1"], "p": 1}"#));

	let compacted = compact(
		ctx,
		r#"{"@type": ["http://ex/T1", "http://ex/T2"], "http://ex/p2": [{"@value": 1}]}"#,
	);
	assert_eq!(compacted, parse(r#"{"@type": ["T1", "T2"], "p": 1}"#));
}

#[test]
fn property_scoped_context() {
	let compacted = compact(
		r#"{"ex": "http://ex/", "ex:p": {"@context": {"q": "ex:q"}}}"#,
		r#"{"http://ex/p": [{"http://ex/q": [{"@value": 1}]}]}"#,
	);
	assert_eq!(compacted, parse(r#"{"ex:p": {"q": 1}}"#));
}

#[test]
fn remote_scoped_context_fails() {
	let result = parse(r#"{"http://ex/p": [{"@value": 1}]}"#).compact(&context(
		r#"{"ex": "http://ex/", "ex:p": {"@context": "http://remote.example/ctx"}}"#,
	));
	assert!(matches!(result.unwrap_err(), Error::Context(_)));
}

#[test]
fn empty_property_value() {
	let compacted = compact(r#"{"ex": "http://ex/"}"#, r#"{"http://ex/p": []}"#);
	assert_eq!(compacted, parse(r#"{"ex:p": []}"#));
}

#[test]
fn set_container_keeps_arrays() {
	let compacted = compact(
		r#"{"ex": "http://ex/", "ex:p": {"@container": "@set"}}"#,
		r#"{"http://ex/p": [{"@value": 1}]}"#,
	);
	assert_eq!(compacted, parse(r#"{"ex:p": [1]}"#));
}

#[test]
fn type_single_value_stays_scalar() {
	let compacted = compact_with(
		r#"{"ex": "http://ex/"}"#,
		r#"{"@type": ["http://ex/T"]}"#,
		Options {
			compact_arrays: false,
		},
	);
	assert_eq!(compacted, parse(r#"{"@type": "ex:T"}"#));
}

#[test]
fn type_set_container() {
	let compacted = compact(
		r#"{"ex": "http://ex/", "@type": {"@container": "@set"}}"#,
		r#"{"@type": ["http://ex/T"]}"#,
	);
	assert_eq!(compacted, parse(r#"{"@type": ["ex:T"]}"#));
}

#[test]
fn keyword_aliases() {
	let compacted = compact(
		r#"{"id": "@id", "ex": "http://ex/"}"#,
		r#"{"@id": "http://ex/x", "http://ex/p": [{"@value": true}]}"#,
	);
	assert_eq!(compacted, parse(r#"{"id": "ex:x", "ex:p": true}"#));
}

#[test]
fn vocabulary_relative_properties() {
	let compacted = compact(
		r#"{"@vocab": "http://ex/ns#"}"#,
		r#"{"@type": ["http://ex/ns#T"], "http://ex/ns#p": [{"@value": 1}]}"#,
	);
	assert_eq!(compacted, parse(r#"{"@type": "T", "p": 1}"#));
}

#[test]
fn preserved_values() {
	let compacted = compact(
		r#"{"ex": "http://ex/"}"#,
		r#"{"@preserve": [{"http://ex/q": [{"@value": 1}]}]}"#,
	);
	assert_eq!(compacted, parse(r#"{"@preserve": {"ex:q": 1}}"#));
}

#[test]
fn compaction_fixpoint() {
	let ctx = r#"{"p": "http://ex/p"}"#;
	let document = r#"{"http://ex/p": [{"@value": "v"}]}"#;

	let once = compact(ctx, document);
	let twice = once.compact(&context(ctx)).unwrap();
	assert_eq!(once, twice);
	assert_eq!(once, parse(r#"{"p": "v"}"#));
}

#[test]
fn language_map_with_set() {
	let compacted = compact(
		r#"{"ex": "http://ex/", "ex:label": {"@container": ["@language", "@set"]}}"#,
		r#"{
			"http://ex/label": [
				{"@value": "hello", "@language": "en"},
				{"@value": "hi", "@language": "en"}
			]
		}"#,
	);
	assert_eq!(compacted, parse(r#"{"ex:label": {"en": ["hello", "hi"]}}"#));
}

#[test]
fn scalars_returned_unchanged() {
	let compacted = compact(r#"{"ex": "http://ex/"}"#, "42");
	assert_eq!(compacted, parse("42"));
}
