use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::inspect::{InspectError, ObjectRef, Result, TypeDecl, TypeMetadata, Value};

/// Native body of a behavior: receives the object and the call arguments.
pub type NativeFn = Rc<dyn Fn(&ObjectRef, &[Value]) -> Value>;

/// Type-metadata provider backed by explicit registration.
///
/// Also stores static field values and native behavior bodies so registered types can be driven
/// through a [`crate::inspect::Proxy`].
#[derive(Default)]
pub struct Registry {
	types: Vec<TypeDecl>,
	by_name: HashMap<Box<str>, usize>,
	statics: RefCell<HashMap<(Box<str>, Box<str>), Value>>,
	natives: HashMap<(Box<str>, Box<str>), NativeFn>,
}

impl Registry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register every declaration, then validate cross references.
	pub fn from_decls(decls: impl IntoIterator<Item = TypeDecl>) -> Result<Self> {
		let mut registry = Self::new();
		for decl in decls {
			registry.register(decl)?;
		}
		registry.validate()?;
		Ok(registry)
	}

	/// Register one declaration. Cross references are checked by [`Registry::validate`].
	pub fn register(&mut self, decl: TypeDecl) -> Result<()> {
		if self.by_name.contains_key(&decl.name) {
			return Err(InspectError::DuplicateType { name: decl.name.to_string() });
		}
		self.by_name.insert(decl.name.clone(), self.types.len());
		self.types.push(decl);
		Ok(())
	}

	/// Check that every parent, interface, and mixin reference names a registered type.
	pub fn validate(&self) -> Result<()> {
		for decl in &self.types {
			let refs = decl
				.parent
				.iter()
				.map(|name| ("parent", name))
				.chain(decl.interfaces.iter().map(|name| ("interface", name)))
				.chain(decl.mixins.iter().map(|name| ("mixin", name)));
			for (role, name) in refs {
				if !self.by_name.contains_key(name) {
					return Err(InspectError::UnknownTypeRef {
						type_name: decl.name.to_string(),
						role,
						name: name.to_string(),
					});
				}
			}
		}
		Ok(())
	}

	/// Look up a registered declaration.
	pub fn get(&self, name: &str) -> Option<&TypeDecl> {
		let idx = self.by_name.get(name)?;
		self.types.get(*idx)
	}

	/// Registered declarations in registration order.
	pub fn types(&self) -> impl Iterator<Item = &TypeDecl> {
		self.types.iter()
	}

	/// Number of registered types.
	pub fn len(&self) -> usize {
		self.types.len()
	}

	/// Whether nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	/// Assign a static field value on its declaring type.
	pub fn set_static(&self, declaring_type: &str, field: &str, value: Value) {
		self.statics.borrow_mut().insert((declaring_type.into(), field.into()), value);
	}

	/// Attach a native body to a behavior declared on `type_name` (class or mixin).
	pub fn bind(&mut self, type_name: &str, behavior: &str, body: impl Fn(&ObjectRef, &[Value]) -> Value + 'static) {
		self.natives.insert((type_name.into(), behavior.into()), Rc::new(body));
	}

	/// Native body registered on exactly `type_name`.
	pub fn native(&self, type_name: &str, behavior: &str) -> Option<NativeFn> {
		self.natives.get(&(Box::from(type_name), Box::from(behavior))).cloned()
	}
}

impl TypeMetadata for Registry {
	fn lookup(&self, name: &str) -> Option<&TypeDecl> {
		self.get(name)
	}

	fn static_value(&self, declaring_type: &str, field: &str) -> Option<Value> {
		self.statics.borrow().get(&(Box::from(declaring_type), Box::from(field))).cloned()
	}
}

impl fmt::Debug for Registry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registry")
			.field("types", &self.types.iter().map(|decl| decl.name.as_ref()).collect::<Vec<_>>())
			.field("statics", &self.statics.borrow().len())
			.field("natives", &self.natives.len())
			.finish()
	}
}
