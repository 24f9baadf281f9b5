use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, InspectError>;

/// Errors produced while loading heap images, registering types, and dispatching proxied calls.
///
/// Snapshot analysis itself never fails; these cover the surfaces around it.
#[derive(Debug, Error)]
pub enum InspectError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Heap image was not valid JSON or did not match the image schema.
	#[error("heap image json: {0}")]
	Json(#[from] serde_json::Error),
	/// Type expression text could not be parsed.
	#[error("invalid type expression: {text:?}")]
	InvalidTypeExpr {
		/// Original type expression text.
		text: String,
	},
	/// Two declarations registered the same type name.
	#[error("duplicate type declaration: {name}")]
	DuplicateType {
		/// Duplicated type name.
		name: String,
	},
	/// A declaration referenced a type that is not registered.
	#[error("{type_name} references unknown {role} {name}")]
	UnknownTypeRef {
		/// Declaring type.
		type_name: String,
		/// Relationship kind (`parent`, `interface`, `mixin`).
		role: &'static str,
		/// Missing referenced name.
		name: String,
	},
	/// Requested type was not found in the registry.
	#[error("type not found: {name}")]
	TypeNotFound {
		/// Requested type name.
		name: String,
	},
	/// Heap image object id was declared twice.
	#[error("duplicate object id: {id}")]
	DuplicateObjectId {
		/// Duplicated object id.
		id: String,
	},
	/// Heap image value referenced an object id that was never declared.
	#[error("unknown object reference: {id}")]
	UnknownObjectRef {
		/// Missing object id.
		id: String,
	},
	/// Requested heap image root was not found.
	#[error("root not found: {name}")]
	RootNotFound {
		/// Requested root name.
		name: String,
	},
	/// Heap image declared no roots.
	#[error("heap image has no roots")]
	NoRoots,
	/// Proxied call targeted a behavior the type does not have.
	#[error("call to undefined behavior {type_name}::{behavior}")]
	UnknownBehavior {
		/// Receiver type name.
		type_name: String,
		/// Requested behavior.
		behavior: String,
	},
	/// Proxied read targeted a field that is neither declared nor present as a slot.
	#[error("read of undefined field {type_name}::{field}")]
	UnknownField {
		/// Receiver type name.
		type_name: String,
		/// Requested field.
		field: String,
	},
	/// Proxied read targeted a typed field that was never assigned.
	#[error("field {type_name}::{field} must not be accessed before initialization")]
	UninitializedField {
		/// Receiver type name.
		type_name: String,
		/// Requested field.
		field: String,
	},
	/// Proxied access targeted a protected or private member.
	#[error("access to non-public member {type_name}::{member}")]
	NonPublicMember {
		/// Receiver type name.
		type_name: String,
		/// Requested member.
		member: String,
	},
	/// Behavior exists but has no registered body.
	#[error("behavior {type_name}::{behavior} has no implementation")]
	MissingImplementation {
		/// Declaring type name.
		type_name: String,
		/// Behavior name.
		behavior: String,
	},
	/// Write to an already initialized read-only field.
	#[error("cannot modify read-only field {type_name}::{field}")]
	ReadOnlyField {
		/// Receiver type name.
		type_name: String,
		/// Field name.
		field: String,
	},
}
