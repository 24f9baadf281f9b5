use crate::inspect::{Collection, ObjectRef, Scalar, Value};

/// Processing path chosen for a value.
#[derive(Debug)]
pub enum ValueKind<'a> {
	/// Composite object with identity.
	Composite(&'a ObjectRef),
	/// Ordered keyed collection.
	Collection(&'a Collection),
	/// Scalar, including the textual fallback of unrepresentable values.
	Scalar(Scalar),
}

/// Classify a value into exactly one processing path.
pub fn classify(value: &Value) -> ValueKind<'_> {
	match value {
		Value::Object(object) => ValueKind::Composite(object),
		Value::Collection(items) => ValueKind::Collection(items),
		Value::Null => ValueKind::Scalar(Scalar::Null),
		Value::Bool(value) => ValueKind::Scalar(Scalar::Bool(*value)),
		Value::Int(value) => ValueKind::Scalar(Scalar::Int(*value)),
		Value::Float(value) => ValueKind::Scalar(Scalar::Float(*value)),
		Value::Str(value) => ValueKind::Scalar(Scalar::Str(value.clone())),
		Value::Opaque(value) => ValueKind::Scalar(Scalar::Opaque(value.clone())),
	}
}
