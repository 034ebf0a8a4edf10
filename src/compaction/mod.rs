//! The compaction algorithm.
//!
//! Rewrites an expanded JSON-LD document into its most compact form under an
//! active context: IRIs and keywords are replaced by their shortest aliases,
//! values by their scalar forms, and container mappings turn arrays of
//! entities into language, index, id, type and graph maps.

mod property;

use crate::context::Context;
use crate::expanded;
use crate::syntax::{is_keyword, ContainerKind};
use crate::util::{add_value, as_array, entry, ordered_keys};
use crate::{Error, Options};
use json_syntax::{object::Entry, Object, Value};
use mown::Mown;

/// Compaction of an expanded JSON-LD fragment.
pub trait Compact {
	/// Compacts the fragment under the given active property.
	///
	/// The active property is `None` for a top-level document value; it then
	/// has no term definition and no container mapping.
	fn compact_full(
		&self,
		active_context: &Context,
		active_property: Option<&str>,
		options: Options,
	) -> Result<Value, Error>;

	/// Compacts the fragment as a top-level document value, with the default
	/// options.
	fn compact(&self, active_context: &Context) -> Result<Value, Error> {
		self.compact_full(active_context, None, Options::default())
	}
}

impl Compact for Value {
	fn compact_full(
		&self,
		active_context: &Context,
		active_property: Option<&str>,
		options: Options,
	) -> Result<Value, Error> {
		compact_element(active_context, active_property, self, options)
	}
}

/// Compacts a single element of an expanded document.
pub(crate) fn compact_element(
	active_context: &Context,
	active_property: Option<&str>,
	element: &Value,
	options: Options,
) -> Result<Value, Error> {
	// Sequences compact item-wise, dropping items that compact to null.
	if let Value::Array(items) = element {
		let mut result = Vec::new();
		for item in items {
			let compacted_item =
				compact_element(active_context, active_property, item, options)?;
			if !compacted_item.is_null() {
				result.push(compacted_item)
			}
		}

		if options.compact_arrays
			&& result.len() == 1
			&& active_property.map_or(true, |p| active_context.container(p).is_empty())
		{
			return Ok(result.into_iter().next().unwrap());
		}

		return Ok(Value::Array(result));
	}

	// Use any scoped context on the active property.
	let mut active_context = Mown::Borrowed(active_context);
	if let Some(property) = active_property {
		let local_context = active_context
			.as_ref()
			.get(property)
			.and_then(|d| d.context.clone());
		if let Some(local_context) = local_context {
			active_context = Mown::Owned(
				active_context
					.as_ref()
					.process_with(&local_context, true)?,
			)
		}
	}

	match element {
		Value::Object(object) => {
			compact_object(active_context.as_ref(), active_property, object, options)
		}
		// Scalars are returned unchanged.
		_ => Ok(element.clone()),
	}
}

/// Compacts an expanded entity (any mapping).
fn compact_object(
	active_context: &Context,
	active_property: Option<&str>,
	object: &Object,
	options: Options,
) -> Result<Value, Error> {
	// Value objects and subject references go through value compaction.
	if expanded::is_value(object) || expanded::is_subject_reference(object) {
		return Ok(active_context.compact_value(active_property, object)?);
	}

	// A list under a list container compacts to its bare items.
	if let Some(list) = entry(object, "@list") {
		if active_property
			.map_or(false, |p| active_context.has_container_mapping(p, ContainerKind::List))
		{
			return compact_element(active_context, active_property, list, options);
		}
	}

	let inside_reverse = active_property == Some("@reverse");

	let mut result = Object::default();

	// Apply any context defined on an alias of @type. Scoped contexts are
	// overlaid in lexicographical order of the compacted type values, so the
	// outcome does not depend on the order types appear in.
	let mut active_context = Mown::Borrowed(active_context);
	if let Some(type_value) = entry(object, "@type") {
		let mut compacted_types = Vec::new();
		for ty in as_array(type_value) {
			if let Some(ty) = ty.as_str() {
				compacted_types.push(active_context.as_ref().compact_iri(ty, None, true, false)?)
			}
		}
		compacted_types.sort();

		for ty in &compacted_types {
			let local_context = active_context
				.as_ref()
				.get(ty)
				.and_then(|d| d.context.clone());
			if let Some(local_context) = local_context {
				active_context = Mown::Owned(
					active_context
						.as_ref()
						.process_with(&local_context, false)?,
				)
			}
		}
	}

	// Process the entity keys in canonical order.
	for expanded_property in ordered_keys(object) {
		let expanded_value = entry(object, expanded_property).unwrap();

		match expanded_property {
			"@id" | "@type" => {
				let alias =
					active_context
						.as_ref()
						.compact_iri(expanded_property, None, true, false)?;

				let mut compacted_values = Vec::new();
				for value in as_array(expanded_value) {
					if let Some(value) = value.as_str() {
						let compacted = active_context.as_ref().compact_iri(
							value,
							None,
							expanded_property == "@type",
							false,
						)?;
						compacted_values.push(Value::from(compacted))
					}
				}

				let is_type_set_container = expanded_property == "@type"
					&& active_context
						.as_ref()
						.has_container_mapping(&alias, ContainerKind::Set);

				let compacted_value = if compacted_values.len() == 1
					&& !(active_context.as_ref().processing_mode().is_1_1()
						&& is_type_set_container)
				{
					compacted_values.into_iter().next().unwrap()
				} else {
					Value::Array(compacted_values)
				};

				let as_array_flag = match &compacted_value {
					Value::Array(items) => items.is_empty() || is_type_set_container,
					_ => false,
				};

				add_value(&mut result, &alias, compacted_value, as_array_flag, false, true)
			}
			"@reverse" => {
				let compacted_value = compact_element(
					active_context.as_ref(),
					Some("@reverse"),
					expanded_value,
					options,
				)?;

				if let Value::Object(compacted_value) = compacted_value {
					let mut reverse_map = Object::default();

					for Entry { key, value } in compacted_value {
						let property = key.as_str();
						if active_context.as_ref().is_reverse_property(property) {
							// Reverse properties move up into the result.
							let use_array = active_context
								.as_ref()
								.has_container_mapping(property, ContainerKind::Set)
								|| !options.compact_arrays;
							add_value(&mut result, property, value, use_array, false, true)
						} else {
							reverse_map.insert(key, value);
						}
					}

					if !reverse_map.is_empty() {
						let alias = active_context
							.as_ref()
							.compact_iri("@reverse", None, false, false)?;
						add_value(&mut result, &alias, Value::Object(reverse_map), false, false, true)
					}
				}
			}
			"@preserve" => {
				// Compacted under the active property, emitted under the
				// `@preserve` key itself.
				let compacted_value = compact_element(
					active_context.as_ref(),
					active_property,
					expanded_value,
					options,
				)?;
				let is_empty_array =
					matches!(&compacted_value, Value::Array(items) if items.is_empty());
				if !is_empty_array {
					add_value(&mut result, "@preserve", compacted_value, false, false, true)
				}
			}
			"@index"
				if active_property.map_or(false, |p| {
					active_context
						.as_ref()
						.has_container_mapping(p, ContainerKind::Index)
				}) =>
			{
				// Absorbed as the key of the enclosing index map.
			}
			"@index" | "@value" | "@language" | "@direction" => {
				let alias =
					active_context
						.as_ref()
						.compact_iri(expanded_property, None, false, false)?;
				add_value(&mut result, &alias, expanded_value.clone(), false, false, true)
			}
			property if is_keyword(property) && property != "@graph" && property != "@list" => {
				let alias = active_context
					.as_ref()
					.compact_iri(property, None, false, false)?;
				add_value(&mut result, &alias, expanded_value.clone(), false, false, true)
			}
			property => {
				// Regular properties, @graph and @list hold arrays of
				// expanded entities.
				property::compact_property(
					active_context.as_ref(),
					&mut result,
					property,
					as_array(expanded_value),
					inside_reverse,
					options,
				)?
			}
		}
	}

	Ok(Value::Object(result))
}
