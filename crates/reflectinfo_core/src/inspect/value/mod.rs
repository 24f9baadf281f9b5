use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use serde::{Serialize, Serializer};

/// Primitive payload carried by scalar values and snapshot leaves.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
	/// Explicit null marker.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar.
	Int(i64),
	/// Floating point scalar.
	Float(f64),
	/// UTF-8 string scalar.
	Str(Box<str>),
	/// Textual stand-in for a value that has no primitive representation.
	Opaque(Box<str>),
}

impl Scalar {
	/// Build a string scalar.
	pub fn str(value: impl Into<Box<str>>) -> Self {
		Self::Str(value.into())
	}

	/// Borrow the string payload of `Str` and `Opaque` scalars.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(value) | Self::Opaque(value) => Some(value),
			_ => None,
		}
	}
}

impl fmt::Display for Scalar {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("null"),
			Self::Bool(value) => write!(f, "{value}"),
			Self::Int(value) => write!(f, "{value}"),
			Self::Float(value) => write!(f, "{value}"),
			Self::Str(value) => write!(f, "{value:?}"),
			Self::Opaque(value) => write!(f, "<{value}>"),
		}
	}
}

impl Serialize for Scalar {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(value) => serializer.serialize_bool(*value),
			Self::Int(value) => serializer.serialize_i64(*value),
			Self::Float(value) => serializer.serialize_f64(*value),
			Self::Str(value) | Self::Opaque(value) => serializer.serialize_str(value),
		}
	}
}

/// Collection key: integer or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
	/// Integer key.
	Int(i64),
	/// String key.
	Str(Box<str>),
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Int(value) => write!(f, "{value}"),
			Self::Str(value) => f.write_str(value),
		}
	}
}

impl Serialize for Key {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		match self {
			Self::Int(value) => serializer.serialize_i64(*value),
			Self::Str(value) => serializer.serialize_str(value),
		}
	}
}

impl From<i64> for Key {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<&str> for Key {
	fn from(value: &str) -> Self {
		Self::Str(value.into())
	}
}

/// Constant data attached to declarations: defaults, constants, decoration arguments, case values.
///
/// Literals are never snapshotted recursively; they are copied as-is.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum Literal {
	/// Primitive literal.
	Scalar(Scalar),
	/// Ordered keyed list of literals.
	List(Vec<(Key, Literal)>),
}

impl Literal {
	/// Null literal.
	pub const NULL: Literal = Literal::Scalar(Scalar::Null);

	/// Build a string literal.
	pub fn str(value: impl Into<Box<str>>) -> Self {
		Self::Scalar(Scalar::str(value))
	}

	/// Build an integer literal.
	pub fn int(value: i64) -> Self {
		Self::Scalar(Scalar::Int(value))
	}

	/// Build a list literal with sequential integer keys.
	pub fn list(items: impl IntoIterator<Item = Literal>) -> Self {
		Self::List(items.into_iter().enumerate().map(|(idx, item)| (Key::Int(idx as i64), item)).collect())
	}

	/// Convert to a live value. Lists become collections.
	pub fn to_value(&self) -> Value {
		match self {
			Self::Scalar(scalar) => Value::from(scalar.clone()),
			Self::List(items) => Value::Collection(Collection::from_pairs(items.iter().map(|(key, item)| (key.clone(), item.to_value())))),
		}
	}
}

impl fmt::Display for Literal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Scalar(scalar) => fmt::Display::fmt(scalar, f),
			Self::List(items) => {
				let sequential = is_sequential(items.iter().map(|(key, _)| key));
				f.write_str("[")?;
				for (idx, (key, item)) in items.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					if !sequential {
						write!(f, "{key}: ")?;
					}
					fmt::Display::fmt(item, f)?;
				}
				f.write_str("]")
			}
		}
	}
}

impl From<serde_json::Value> for Literal {
	fn from(value: serde_json::Value) -> Self {
		use serde_json::Value as Json;

		match value {
			Json::Null => Self::NULL,
			Json::Bool(value) => Self::Scalar(Scalar::Bool(value)),
			Json::Number(number) => Self::Scalar(json_number(&number)),
			Json::String(value) => Self::str(value),
			Json::Array(items) => Self::list(items.into_iter().map(Self::from)),
			Json::Object(map) => Self::List(map.into_iter().map(|(key, item)| (Key::Str(key.into()), Self::from(item))).collect()),
		}
	}
}

impl Serialize for Literal {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		use serde::ser::{SerializeMap, SerializeSeq};

		match self {
			Self::Scalar(scalar) => scalar.serialize(serializer),
			Self::List(items) if is_sequential(items.iter().map(|(key, _)| key)) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for (_, item) in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Self::List(items) => {
				let mut map = serializer.serialize_map(Some(items.len()))?;
				for (key, item) in items {
					map.serialize_entry(&key.to_string(), item)?;
				}
				map.end()
			}
		}
	}
}

/// Whether keys are exactly `0, 1, 2, ...` in order.
pub(crate) fn is_sequential<'a>(keys: impl Iterator<Item = &'a Key>) -> bool {
	keys.enumerate().all(|(idx, key)| *key == Key::Int(idx as i64))
}

/// Map a JSON number to the narrowest scalar that holds it.
pub(crate) fn json_number(number: &serde_json::Number) -> Scalar {
	if let Some(value) = number.as_i64() {
		Scalar::Int(value)
	} else {
		Scalar::Float(number.as_f64().unwrap_or(f64::NAN))
	}
}

/// Live runtime value as seen by the analyzer.
#[derive(Debug, Clone)]
pub enum Value {
	/// Explicit null marker.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar.
	Int(i64),
	/// Floating point scalar.
	Float(f64),
	/// UTF-8 string scalar.
	Str(Box<str>),
	/// Value with no primitive representation, carried as descriptive text.
	Opaque(Box<str>),
	/// Ordered keyed collection. Copied by value, has no identity.
	Collection(Collection),
	/// Shared composite object with identity.
	Object(ObjectRef),
}

impl Value {
	/// Build a string value.
	pub fn str(value: impl Into<Box<str>>) -> Self {
		Self::Str(value.into())
	}

	/// Build a list collection value with sequential integer keys.
	pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
		Self::Collection(Collection::list(items))
	}

	/// Borrow the object handle when this value is a composite object.
	pub fn as_object(&self) -> Option<&ObjectRef> {
		match self {
			Self::Object(object) => Some(object),
			_ => None,
		}
	}

	/// Whether the value is null.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}
}

impl From<Scalar> for Value {
	fn from(value: Scalar) -> Self {
		match value {
			Scalar::Null => Self::Null,
			Scalar::Bool(value) => Self::Bool(value),
			Scalar::Int(value) => Self::Int(value),
			Scalar::Float(value) => Self::Float(value),
			Scalar::Str(value) => Self::Str(value),
			Scalar::Opaque(value) => Self::Opaque(value),
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::Str(value.into())
	}
}

impl From<Collection> for Value {
	fn from(value: Collection) -> Self {
		Self::Collection(value)
	}
}

impl From<ObjectRef> for Value {
	fn from(value: ObjectRef) -> Self {
		Self::Object(value)
	}
}

/// Ordered keyed collection preserving insertion order and exact key set.
#[derive(Debug, Clone, Default)]
pub struct Collection {
	entries: Vec<(Key, Value)>,
}

impl Collection {
	/// Create an empty collection.
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a list with sequential integer keys.
	pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
		Self {
			entries: items.into_iter().enumerate().map(|(idx, item)| (Key::Int(idx as i64), item)).collect(),
		}
	}

	/// Build from key/value pairs. Later duplicates overwrite earlier ones in place.
	pub fn from_pairs(pairs: impl IntoIterator<Item = (Key, Value)>) -> Self {
		let mut out = Self::new();
		for (key, value) in pairs {
			out.insert(key, value);
		}
		out
	}

	/// Insert or overwrite. Overwriting keeps the original position.
	pub fn insert(&mut self, key: impl Into<Key>, value: Value) {
		let key = key.into();
		match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
			Some(slot) => slot.1 = value,
			None => self.entries.push((key, value)),
		}
	}

	/// Append with the next integer key after the largest existing integer key.
	pub fn push(&mut self, value: Value) {
		let next = self
			.entries
			.iter()
			.filter_map(|(key, _)| match key {
				Key::Int(idx) => Some(*idx + 1),
				Key::Str(_) => None,
			})
			.max()
			.unwrap_or(0);
		self.entries.push((Key::Int(next), value));
	}

	/// Look up a value by key.
	pub fn get(&self, key: &Key) -> Option<&Value> {
		self.entries.iter().find(|(existing, _)| existing == key).map(|(_, value)| value)
	}

	/// Iterate entries in order.
	pub fn iter(&self) -> impl Iterator<Item = &(Key, Value)> {
		self.entries.iter()
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the collection is empty.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Shared handle to a live composite object.
pub type ObjectRef = Rc<Object>;

/// Live composite object: a type name plus assignable slots.
///
/// A declared field with no slot has never been assigned.
pub struct Object {
	type_name: Box<str>,
	slots: RefCell<Vec<(Box<str>, Value)>>,
}

impl Object {
	/// Allocate an object with no assigned slots.
	pub fn new(type_name: impl Into<Box<str>>) -> ObjectRef {
		Rc::new(Self {
			type_name: type_name.into(),
			slots: RefCell::new(Vec::new()),
		})
	}

	/// Allocate an object and assign slots in order.
	pub fn with_slots<'a>(type_name: impl Into<Box<str>>, slots: impl IntoIterator<Item = (&'a str, Value)>) -> ObjectRef {
		let object = Self::new(type_name);
		for (name, value) in slots {
			object.set(name, value);
		}
		object
	}

	/// Runtime type name.
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	/// Identity token: stable for the lifetime of the allocation, meaningless for equality of contents.
	pub fn identity(&self) -> u64 {
		std::ptr::from_ref(self).addr() as u64
	}

	/// Assign a slot, keeping the position of an existing one.
	pub fn set(&self, name: &str, value: Value) {
		let mut slots = self.slots.borrow_mut();
		match slots.iter_mut().find(|(existing, _)| existing.as_ref() == name) {
			Some(slot) => slot.1 = value,
			None => slots.push((name.into(), value)),
		}
	}

	/// Remove a slot, returning the field to the unassigned state.
	pub fn unset(&self, name: &str) -> Option<Value> {
		let mut slots = self.slots.borrow_mut();
		let idx = slots.iter().position(|(existing, _)| existing.as_ref() == name)?;
		Some(slots.remove(idx).1)
	}

	/// Read a slot value.
	pub fn get(&self, name: &str) -> Option<Value> {
		self.slots
			.borrow()
			.iter()
			.find(|(existing, _)| existing.as_ref() == name)
			.map(|(_, value)| value.clone())
	}

	/// Whether a slot has been assigned.
	pub fn has(&self, name: &str) -> bool {
		self.slots.borrow().iter().any(|(existing, _)| existing.as_ref() == name)
	}

	/// Borrow all assigned slots in assignment order.
	pub fn slots(&self) -> Ref<'_, [(Box<str>, Value)]> {
		Ref::map(self.slots.borrow(), Vec::as_slice)
	}
}

impl fmt::Debug for Object {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		// Slot values are omitted: graphs may be cyclic.
		let slots = self.slots.borrow();
		f.debug_struct("Object")
			.field("type_name", &self.type_name)
			.field("identity", &format_args!("0x{:016x}", self.identity()))
			.field("slots", &slots.iter().map(|(name, _)| name.as_ref()).collect::<Vec<_>>())
			.finish()
	}
}
