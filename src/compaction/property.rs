//! Per-property compaction: container-policy dispatch and nest redirection.

use super::compact_element;
use crate::context::Context;
use crate::expanded;
use crate::syntax::ContainerKind;
use crate::util::{add_value, entry};
use crate::{Error, Options};
use json_syntax::{Object, Value};

/// Returns the validated `@nest` term of the given property, if any.
///
/// The nest term must expand to `@nest`, otherwise the whole compaction fails
/// with [`Error::InvalidNestValue`].
fn nest_term<'c>(
	active_context: &'c Context,
	item_active_property: &str,
) -> Result<Option<&'c str>, Error> {
	match active_context
		.get(item_active_property)
		.and_then(|d| d.nest.as_deref())
	{
		Some(nest_term) => {
			if active_context.expand_iri(nest_term, false, true).as_deref() != Some("@nest") {
				return Err(Error::InvalidNestValue);
			}
			Ok(Some(nest_term))
		}
		None => Ok(None),
	}
}

/// Resolves the object receiving the values of a property: the nest object
/// when a nest term is given, the result itself otherwise.
fn select_nest_result<'a>(result: &'a mut Object, nest_term: Option<&str>) -> &'a mut Object {
	match nest_term {
		Some(nest_term) => {
			if !matches!(entry(result, nest_term), Some(Value::Object(_))) {
				result.insert(nest_term.into(), Value::Object(Object::default()));
			}

			result
				.get_unique_mut(nest_term)
				.ok()
				.unwrap()
				.unwrap()
				.as_object_mut()
				.unwrap()
		}
		None => result,
	}
}

/// Returns the map at `nest_result[item_active_property]`, creating it if
/// necessary.
fn map_object<'a>(nest_result: &'a mut Object, item_active_property: &str) -> &'a mut Object {
	if !matches!(entry(nest_result, item_active_property), Some(Value::Object(_))) {
		nest_result.insert(
			item_active_property.into(),
			Value::Object(Object::default()),
		);
	}

	nest_result
		.get_unique_mut(item_active_property)
		.ok()
		.unwrap()
		.unwrap()
		.as_object_mut()
		.unwrap()
}

/// Compacts the values of one expanded property into `result`.
///
/// `expanded_value` is the (post-expansion) array of entities held by the
/// property; `expanded_property` may also be `@graph` or `@list`.
pub(super) fn compact_property(
	active_context: &Context,
	result: &mut Object,
	expanded_property: &str,
	expanded_value: &[Value],
	inside_reverse: bool,
	options: Options,
) -> Result<(), Error> {
	if expanded_value.is_empty() {
		// An empty property value compacts to an empty array.
		let item_active_property =
			active_context.compact_iri(expanded_property, None, true, inside_reverse)?;
		let nest = nest_term(active_context, &item_active_property)?;
		let nest_result = select_nest_result(result, nest);
		add_value(
			nest_result,
			&item_active_property,
			Value::Array(Vec::new()),
			true,
			false,
			true,
		);
		return Ok(());
	}

	for expanded_item in expanded_value {
		let item_active_property = active_context.compact_iri(
			expanded_property,
			Some(expanded_item),
			true,
			inside_reverse,
		)?;

		let is_list_container =
			active_context.has_container_mapping(&item_active_property, ContainerKind::List);
		let is_graph_container =
			active_context.has_container_mapping(&item_active_property, ContainerKind::Graph);
		let is_set_container =
			active_context.has_container_mapping(&item_active_property, ContainerKind::Set);
		let is_language_container =
			active_context.has_container_mapping(&item_active_property, ContainerKind::Language);
		let is_index_container =
			active_context.has_container_mapping(&item_active_property, ContainerKind::Index);
		let is_id_container =
			active_context.has_container_mapping(&item_active_property, ContainerKind::Id);
		let is_type_container =
			active_context.has_container_mapping(&item_active_property, ContainerKind::Type);

		let nest = nest_term(active_context, &item_active_property)?;

		let item_object = expanded_item.as_object();
		let is_list_object = item_object.map_or(false, expanded::is_list);
		let is_graph_object = item_object.map_or(false, expanded::is_graph);

		// If the expanded item is a list or graph object, compact the value
		// of its @list or @graph entry instead of the item itself.
		let element_to_compact = if is_list_object {
			entry(item_object.unwrap(), "@list").unwrap()
		} else if is_graph_object {
			entry(item_object.unwrap(), "@graph").unwrap()
		} else {
			expanded_item
		};

		let mut compacted_item = compact_element(
			active_context,
			Some(&item_active_property),
			element_to_compact,
			options,
		)?;

		let nest_result = select_nest_result(result, nest);

		if is_list_object {
			if !compacted_item.is_array() {
				compacted_item = Value::Array(vec![compacted_item])
			}

			if is_list_container {
				// Successive lists merge into the same entry.
				add_value(
					nest_result,
					&item_active_property,
					compacted_item,
					true,
					true,
					true,
				);
				continue;
			}

			// Wrap into a list object, carrying over any @index.
			let list_alias = active_context.compact_iri("@list", None, false, false)?;
			let mut wrapper = Object::default();
			wrapper.insert(list_alias.into(), compacted_item);

			if let Some(index_value) = entry(item_object.unwrap(), "@index") {
				let index_alias = active_context.compact_iri("@index", None, false, false)?;
				wrapper.insert(index_alias.into(), index_value.clone());
			}

			compacted_item = Value::Object(wrapper)
		}

		if is_graph_object {
			let as_array_flag = !options.compact_arrays || is_set_container;
			let item_object = item_object.unwrap();

			if is_graph_container
				&& (is_id_container
					|| (is_index_container && expanded::is_simple_graph(item_object)))
			{
				// Graph map, keyed by @id or @index.
				let map = map_object(nest_result, &item_active_property);

				let key = if is_id_container { "@id" } else { "@index" };
				let map_key = match entry(item_object, key).and_then(Value::as_str) {
					Some(key) => key.to_string(),
					None => active_context.compact_iri("@none", None, false, false)?,
				};

				add_value(map, &map_key, compacted_item, as_array_flag, false, true)
			} else if is_graph_container && expanded::is_simple_graph(item_object) {
				// A simple graph compacting to multiple values cannot be
				// represented directly: multiple objects would read as
				// separate named graphs.
				compacted_item = match compacted_item {
					Value::Array(items) if items.len() > 1 => {
						let mut wrapper = Object::default();
						wrapper.insert("@included".into(), Value::Array(items));
						Value::Object(wrapper)
					}
					item => item,
				};

				add_value(
					nest_result,
					&item_active_property,
					compacted_item,
					as_array_flag,
					false,
					true,
				)
			} else {
				// Wrap using the @graph alias, carrying over @id and @index.
				compacted_item = match compacted_item {
					Value::Array(mut items) if items.len() == 1 && options.compact_arrays => {
						items.pop().unwrap()
					}
					item => item,
				};

				let graph_alias = active_context.compact_iri("@graph", None, false, false)?;
				let mut wrapper = Object::default();
				wrapper.insert(graph_alias.into(), compacted_item);

				if let Some(id_value) = entry(item_object, "@id") {
					let id_alias = active_context.compact_iri("@id", None, false, false)?;
					wrapper.insert(id_alias.into(), id_value.clone());
				}

				if let Some(index_value) = entry(item_object, "@index") {
					let index_alias = active_context.compact_iri("@index", None, false, false)?;
					wrapper.insert(index_alias.into(), index_value.clone());
				}

				add_value(
					nest_result,
					&item_active_property,
					Value::Object(wrapper),
					as_array_flag,
					false,
					true,
				)
			}
		} else if is_language_container || is_index_container || is_id_container || is_type_container
		{
			let map = map_object(nest_result, &item_active_property);
			let mut map_key: Option<String> = None;

			if is_language_container {
				// A value object is replaced by its @value inside a language
				// map. Type and direction metadata are not examined here.
				let replacement = match &compacted_item {
					Value::Object(compacted_object) => entry(compacted_object, "@value").cloned(),
					_ => None,
				};
				if let Some(replacement) = replacement {
					compacted_item = replacement
				}

				map_key = item_object
					.and_then(|o| entry(o, "@language"))
					.and_then(Value::as_str)
					.map(str::to_string)
			} else if is_index_container {
				map_key = item_object
					.and_then(|o| entry(o, "@index"))
					.and_then(Value::as_str)
					.map(str::to_string)
			} else if is_id_container {
				let id_key = active_context.compact_iri("@id", None, false, false)?;
				if let Value::Object(compacted_object) = &mut compacted_item {
					if let Some(removed) =
						compacted_object.remove_unique(id_key.as_str()).ok().unwrap()
					{
						map_key = removed.value.as_str().map(str::to_string)
					}
				}
			} else {
				// Type map: the first compacted type becomes the map key.
				let type_key = active_context.compact_iri("@type", None, false, false)?;

				let mut types = Vec::new();
				if let Value::Object(compacted_object) = &mut compacted_item {
					if let Some(removed) =
						compacted_object.remove_unique(type_key.as_str()).ok().unwrap()
					{
						types = match removed.value {
							Value::Array(items) => items,
							other => vec![other],
						};

						if !types.is_empty() {
							map_key = types.remove(0).as_str().map(str::to_string)
						}
					}
				}

				// When only an id reference remains, the item is re-compacted
				// as a bare reference; residual types are dropped together
				// with the replaced object.
				let mut recompacted = false;
				if matches!(&compacted_item, Value::Object(o) if o.len() == 1) {
					if let Some(id_value) = item_object.and_then(|o| entry(o, "@id")) {
						let mut reference = Object::default();
						reference.insert("@id".into(), id_value.clone());
						compacted_item = compact_element(
							active_context,
							Some(&item_active_property),
							&Value::Object(reference),
							options,
						)?;
						recompacted = true
					}
				}

				if !types.is_empty() && !recompacted {
					if let Value::Object(compacted_object) = &mut compacted_item {
						add_value(
							compacted_object,
							&type_key,
							Value::Array(types),
							false,
							false,
							false,
						)
					}
				}
			}

			// An absent or empty map key falls back to the alias of @none.
			let map_key = match map_key {
				Some(key) if !key.is_empty() => key,
				_ => active_context.compact_iri("@none", None, false, false)?,
			};

			add_value(map, &map_key, compacted_item, is_set_container, false, true)
		} else {
			let is_empty_array =
				matches!(&compacted_item, Value::Array(items) if items.is_empty());
			let as_array_flag = !options.compact_arrays
				|| is_set_container
				|| is_list_container
				|| is_empty_array
				|| expanded_property == "@list"
				|| expanded_property == "@graph";

			add_value(
				nest_result,
				&item_active_property,
				compacted_item,
				as_array_flag,
				false,
				true,
			)
		}
	}

	Ok(())
}
