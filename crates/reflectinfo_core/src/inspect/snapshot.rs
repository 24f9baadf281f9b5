use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::inspect::value::is_sequential;
use crate::inspect::{Key, Literal, Scalar, Visibility};

/// Scalar payload stored for a declared field that was never assigned.
pub const UNINITIALIZED: &str = "[uninitialized]";

/// Leading text of the scalar payload substituted for an object that was already expanded or sits
/// at the depth budget. The full payload is `"[Recursion or max depth reached: <TypeName>]"`.
pub const RECURSION_SENTINEL_PREFIX: &str = "[Recursion or max depth reached: ";

/// One node of an analysis result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SnapshotNode {
	/// Primitive leaf, including sentinels.
	Scalar(ScalarNode),
	/// Ordered keyed collection.
	Collection(CollectionNode),
	/// Expanded composite object.
	Composite(Box<CompositeNode>),
}

impl SnapshotNode {
	/// Scalar leaf.
	pub fn scalar(value: Scalar) -> Self {
		Self::Scalar(ScalarNode { value })
	}

	/// Sentinel for a declared field that was never assigned.
	pub fn uninitialized() -> Self {
		Self::scalar(Scalar::str(UNINITIALIZED))
	}

	/// Sentinel for an object that was already expanded or reached the depth budget.
	pub fn recursion_sentinel(type_name: &str) -> Self {
		Self::scalar(Scalar::Str(format!("{RECURSION_SENTINEL_PREFIX}{type_name}]").into_boxed_str()))
	}

	/// Borrow the scalar payload.
	pub fn as_scalar(&self) -> Option<&Scalar> {
		match self {
			Self::Scalar(node) => Some(&node.value),
			_ => None,
		}
	}

	/// Borrow the collection node.
	pub fn as_collection(&self) -> Option<&CollectionNode> {
		match self {
			Self::Collection(node) => Some(node),
			_ => None,
		}
	}

	/// Borrow the composite node.
	pub fn as_composite(&self) -> Option<&CompositeNode> {
		match self {
			Self::Composite(node) => Some(node),
			_ => None,
		}
	}

	/// Whether this is the uninitialized-field sentinel.
	pub fn is_uninitialized(&self) -> bool {
		self.as_scalar().and_then(Scalar::as_str) == Some(UNINITIALIZED)
	}

	/// Type name carried by a recursion/depth sentinel.
	pub fn sentinel_type(&self) -> Option<&str> {
		let text = match self.as_scalar()? {
			Scalar::Str(text) => text,
			_ => return None,
		};
		text.strip_prefix(RECURSION_SENTINEL_PREFIX)?.strip_suffix(']')
	}
}

/// Primitive leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalarNode {
	/// Raw value.
	pub value: Scalar,
}

/// Ordered keyed collection snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CollectionNode {
	/// Entries in source order.
	pub entries: Vec<CollectionEntry>,
}

impl CollectionNode {
	/// Look up a child by key.
	pub fn get(&self, key: &Key) -> Option<&SnapshotNode> {
		self.entries.iter().find(|entry| entry.key == *key).map(|entry| &entry.value)
	}

	/// Keys in source order.
	pub fn keys(&self) -> impl Iterator<Item = &Key> {
		self.entries.iter().map(|entry| &entry.key)
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

/// One collection entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionEntry {
	/// Source key.
	pub key: Key,
	/// Analyzed element.
	pub value: SnapshotNode,
}

/// Snapshot of one composite object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeNode {
	/// Runtime type name.
	#[serde(rename = "type")]
	pub type_name: String,
	/// Identity token of the source object. Display and cycle correlation only.
	#[serde(serialize_with = "hex_identity")]
	pub identity: u64,
	/// Source file of the type declaration.
	pub file: Option<String>,
	/// First source line of the type declaration.
	pub start_line: Option<u32>,
	/// Last source line of the type declaration.
	pub end_line: Option<u32>,
	/// Normalized type documentation.
	pub doc: Option<String>,
	/// Type may not be extended.
	pub is_final: bool,
	/// Type may not be instantiated.
	pub is_abstract: bool,
	/// Instances may be cloned.
	pub is_cloneable: bool,
	/// All instance fields are read-only.
	pub is_readonly: bool,
	/// Type is a fixed-variant-case type.
	pub is_enum: bool,
	/// Supertype name.
	pub parent: Option<String>,
	/// Capability sets the type conforms to.
	pub interfaces: Vec<String>,
	/// Mixins used directly by the type.
	pub mixins: Vec<String>,
	/// Constant bindings.
	#[serde(serialize_with = "named_literals")]
	pub constants: Vec<(String, Literal)>,
	/// Field descriptors in enumeration order.
	pub fields: Vec<FieldDescriptor>,
	/// Behavior descriptors in enumeration order.
	pub behaviors: Vec<BehaviorDescriptor>,
	/// Decorations on the type.
	pub decorations: Vec<DecorationDescriptor>,
	/// Enum cases; empty unless `is_enum`.
	#[serde(serialize_with = "named_literals")]
	pub cases: Vec<(String, Literal)>,
}

impl CompositeNode {
	/// Look up a field descriptor by name.
	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|field| field.name == name)
	}

	/// Look up a behavior descriptor by name.
	pub fn behavior(&self, name: &str) -> Option<&BehaviorDescriptor> {
		self.behaviors.iter().find(|behavior| behavior.name == name)
	}

	/// Look up a constant by name.
	pub fn constant(&self, name: &str) -> Option<&Literal> {
		self.constants.iter().find(|(constant, _)| constant == name).map(|(_, value)| value)
	}

	/// Look up an enum case by name.
	pub fn case(&self, name: &str) -> Option<&Literal> {
		self.cases.iter().find(|(case, _)| case == name).map(|(_, value)| value)
	}
}

/// Structural facts about one field plus its analyzed value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
	/// Field name.
	pub name: String,
	/// Access level.
	pub visibility: Visibility,
	/// Normalized documentation.
	pub doc: Option<String>,
	/// Analyzed current value, or the uninitialized sentinel.
	pub value: SnapshotNode,
	/// Field belongs to the type.
	pub is_static: bool,
	/// Type that declares the field.
	pub declaring_type: String,
	/// Field is read-only.
	pub is_readonly: bool,
	/// Declared type signature.
	#[serde(rename = "type")]
	pub ty: Option<String>,
	/// Attached decorations.
	pub decorations: Vec<DecorationDescriptor>,
	/// Field has a declared or implicit default.
	pub has_default: bool,
	/// Field holds a value.
	pub is_initialized: bool,
}

/// Structural facts about one behavior.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehaviorDescriptor {
	/// Behavior name.
	pub name: String,
	/// Access level.
	pub visibility: Visibility,
	/// Normalized documentation.
	pub doc: Option<String>,
	/// Parameters in signature order.
	pub parameters: Vec<ParameterDescriptor>,
	/// Behavior belongs to the type.
	pub is_static: bool,
	/// Behavior may not be redefined.
	pub is_final: bool,
	/// Behavior has no body.
	pub is_abstract: bool,
	/// Type that declares the behavior.
	pub declaring_type: String,
	/// Attached decorations.
	pub decorations: Vec<DecorationDescriptor>,
	/// Declared return type signature.
	pub return_type: Option<String>,
	/// Behavior lazily produces a sequence.
	pub is_generator: bool,
	/// A tentative return type is declared.
	pub has_tentative_return_type: bool,
	/// Tentative return type signature.
	pub tentative_return_type: Option<String>,
	/// Mixin that contributed the behavior.
	pub mixin: Option<String>,
	/// Behavior implements an abstract declaration of the direct supertype.
	pub is_override: bool,
}

/// Structural facts about one parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDescriptor {
	/// Parameter name.
	pub name: String,
	/// Declared type signature.
	#[serde(rename = "type")]
	pub ty: Option<String>,
	/// Collects remaining arguments.
	pub is_variadic: bool,
	/// A default is available.
	pub has_default: bool,
	/// Literal default.
	pub default: Option<Literal>,
	/// Attached decorations.
	pub decorations: Vec<DecorationDescriptor>,
	/// Also declares a field.
	pub is_promoted: bool,
	/// Null is accepted.
	pub allows_null: bool,
	/// Callers may omit the argument.
	pub is_optional: bool,
}

/// Decoration name and literal arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecorationDescriptor {
	/// Decoration type name.
	pub name: String,
	/// Positional and named arguments in source order.
	#[serde(serialize_with = "keyed_literals")]
	pub args: Vec<(Key, Literal)>,
}

fn hex_identity<S: Serializer>(identity: &u64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
	serializer.serialize_str(&format!("0x{identity:016x}"))
}

fn named_literals<S: Serializer>(items: &[(String, Literal)], serializer: S) -> std::result::Result<S::Ok, S::Error> {
	let mut map = serializer.serialize_map(Some(items.len()))?;
	for (name, value) in items {
		map.serialize_entry(name, value)?;
	}
	map.end()
}

fn keyed_literals<S: Serializer>(items: &[(Key, Literal)], serializer: S) -> std::result::Result<S::Ok, S::Error> {
	if is_sequential(items.iter().map(|(key, _)| key)) {
		let mut seq = serializer.serialize_seq(Some(items.len()))?;
		for (_, value) in items {
			seq.serialize_element(value)?;
		}
		return seq.end();
	}

	let mut map = serializer.serialize_map(Some(items.len()))?;
	for (key, value) in items {
		map.serialize_entry(&key.to_string(), value)?;
	}
	map.end()
}
