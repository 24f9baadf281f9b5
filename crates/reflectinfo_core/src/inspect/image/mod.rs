use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Map;

use crate::inspect::value::json_number;
use crate::inspect::{Collection, InspectError, Key, Object, ObjectRef, Registry, Result, TypeDecl, Value};

const REF_KEY: &str = "$ref";
const OPAQUE_KEY: &str = "$opaque";

/// Registry plus a live object graph loaded from a JSON heap image.
///
/// Objects are allocated before any slot is filled, so `{"$ref": id}` values may point forward
/// or form cycles.
#[derive(Debug)]
pub struct HeapImage {
	registry: Registry,
	objects: Vec<(String, ObjectRef)>,
	roots: Vec<(String, Value)>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawImage {
	#[serde(default)]
	types: Vec<TypeDecl>,
	#[serde(default)]
	statics: Vec<RawStatic>,
	#[serde(default)]
	objects: Vec<RawObject>,
	#[serde(default)]
	roots: Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct RawStatic {
	#[serde(rename = "type")]
	type_name: String,
	field: String,
	value: serde_json::Value,
}

#[derive(Deserialize)]
struct RawObject {
	id: String,
	#[serde(rename = "type")]
	type_name: String,
	#[serde(default)]
	fields: Map<String, serde_json::Value>,
}

impl HeapImage {
	/// Read and load an image file.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let bytes = fs::read(path)?;
		Self::from_slice(&bytes)
	}

	/// Load an image from JSON bytes.
	pub fn from_slice(bytes: &[u8]) -> Result<Self> {
		let raw: RawImage = serde_json::from_slice(bytes)?;
		Self::build(raw)
	}

	/// Load an image from JSON text.
	pub fn from_json_str(text: &str) -> Result<Self> {
		let raw: RawImage = serde_json::from_str(text)?;
		Self::build(raw)
	}

	fn build(raw: RawImage) -> Result<Self> {
		let registry = Registry::from_decls(raw.types)?;

		let mut ids: HashMap<String, ObjectRef> = HashMap::with_capacity(raw.objects.len());
		let mut objects = Vec::with_capacity(raw.objects.len());
		for object in &raw.objects {
			if ids.contains_key(&object.id) {
				return Err(InspectError::DuplicateObjectId { id: object.id.clone() });
			}
			let allocated = Object::new(object.type_name.as_str());
			ids.insert(object.id.clone(), allocated.clone());
			objects.push((object.id.clone(), allocated));
		}

		for (raw_object, (_, object)) in raw.objects.iter().zip(&objects) {
			for (name, value) in &raw_object.fields {
				object.set(name, convert(value, &ids)?);
			}
		}

		for item in &raw.statics {
			registry.set_static(&item.type_name, &item.field, convert(&item.value, &ids)?);
		}

		let roots = raw
			.roots
			.iter()
			.map(|(name, value)| -> Result<(String, Value)> { Ok((name.clone(), convert(value, &ids)?)) })
			.collect::<Result<Vec<_>>>()?;

		tracing::debug!(types = registry.len(), objects = objects.len(), roots = roots.len(), statics = raw.statics.len(), "heap image loaded");

		Ok(Self { registry, objects, roots })
	}

	/// Metadata provider for the image's declared types.
	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	/// Mutable registry, for binding native behavior bodies.
	pub fn registry_mut(&mut self) -> &mut Registry {
		&mut self.registry
	}

	/// Allocated objects in declaration order.
	pub fn objects(&self) -> impl Iterator<Item = (&str, &ObjectRef)> {
		self.objects.iter().map(|(id, object)| (id.as_str(), object))
	}

	/// Look up an object by image id.
	pub fn object(&self, id: &str) -> Option<&ObjectRef> {
		self.objects.iter().find(|(item, _)| item == id).map(|(_, object)| object)
	}

	/// Number of allocated objects.
	pub fn object_count(&self) -> usize {
		self.objects.len()
	}

	/// Root names in declaration order.
	pub fn root_names(&self) -> impl Iterator<Item = &str> {
		self.roots.iter().map(|(name, _)| name.as_str())
	}

	/// Number of roots.
	pub fn root_count(&self) -> usize {
		self.roots.len()
	}

	/// Look up a root by name.
	pub fn root(&self, name: &str) -> Result<&Value> {
		self.roots
			.iter()
			.find(|(root, _)| root == name)
			.map(|(_, value)| value)
			.ok_or_else(|| InspectError::RootNotFound { name: name.to_owned() })
	}

	/// First declared root.
	pub fn first_root(&self) -> Result<(&str, &Value)> {
		self.roots.first().map(|(name, value)| (name.as_str(), value)).ok_or(InspectError::NoRoots)
	}
}

fn convert(value: &serde_json::Value, ids: &HashMap<String, ObjectRef>) -> Result<Value> {
	Ok(match value {
		serde_json::Value::Null => Value::Null,
		serde_json::Value::Bool(value) => Value::Bool(*value),
		serde_json::Value::Number(number) => Value::from(json_number(number)),
		serde_json::Value::String(text) => Value::str(text.as_str()),
		serde_json::Value::Array(items) => Value::Collection(Collection::list(
			items.iter().map(|item| convert(item, ids)).collect::<Result<Vec<_>>>()?,
		)),
		serde_json::Value::Object(map) => {
			if let Some(marker) = single_marker(map, REF_KEY) {
				let object = ids.get(marker).ok_or_else(|| InspectError::UnknownObjectRef { id: marker.to_owned() })?;
				return Ok(Value::Object(object.clone()));
			}
			if let Some(text) = single_marker(map, OPAQUE_KEY) {
				return Ok(Value::Opaque(text.into()));
			}
			let mut items = Collection::new();
			for (key, item) in map {
				items.insert(Key::from(key.as_str()), convert(item, ids)?);
			}
			Value::Collection(items)
		}
	})
}

/// `{"<key>": "<text>"}` with nothing else in the map.
fn single_marker<'a>(map: &'a Map<String, serde_json::Value>, key: &str) -> Option<&'a str> {
	if map.len() != 1 {
		return None;
	}
	map.get(key)?.as_str()
}

#[cfg(test)]
mod tests;
