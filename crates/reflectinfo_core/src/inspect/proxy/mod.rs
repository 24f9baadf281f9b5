use crate::inspect::{FieldState, InspectError, ObjectRef, Registry, Result, TypeMetadata, Value, Visibility};

/// Hook run before a proxied operation with (type name, member name, arguments).
pub type BeforeHook = Box<dyn Fn(&str, &str, &[Value])>;

/// Hook run after a proxied operation with (type name, member name, arguments, result).
pub type AfterHook = Box<dyn Fn(&str, &str, &[Value], &Value)>;

/// Behavior invocation and field access on one live object.
pub trait Dispatch {
	/// Runtime type name of the target.
	fn type_name(&self) -> &str;

	/// Invoke a behavior.
	fn call(&self, behavior: &str, args: &[Value]) -> Result<Value>;

	/// Read a field.
	fn get(&self, field: &str) -> Result<Value>;

	/// Write a field.
	fn set(&self, field: &str, value: Value) -> Result<()>;

	/// Visibility of a behavior, if the target has one by that name.
	fn behavior_visibility(&self, behavior: &str) -> Option<Visibility>;

	/// Visibility of a field, if the target has one by that name. Dynamic slots are public.
	fn field_visibility(&self, field: &str) -> Option<Visibility>;
}

/// Direct dispatch against a [`Registry`]: native bodies, declared fields, and dynamic slots.
///
/// Performs no access checks; wrap it in a [`Proxy`] for that.
#[derive(Debug, Clone)]
pub struct Receiver<'r> {
	registry: &'r Registry,
	object: ObjectRef,
}

impl<'r> Receiver<'r> {
	/// Dispatch against `object` using types and bodies from `registry`.
	pub fn new(registry: &'r Registry, object: ObjectRef) -> Self {
		Self { registry, object }
	}

	/// Target object.
	pub fn object(&self) -> &ObjectRef {
		&self.object
	}
}

impl Dispatch for Receiver<'_> {
	fn type_name(&self) -> &str {
		self.object.type_name()
	}

	fn call(&self, behavior: &str, args: &[Value]) -> Result<Value> {
		let type_name = self.type_name();
		let resolved = self.registry.behavior(type_name, behavior).ok_or_else(|| InspectError::UnknownBehavior {
			type_name: type_name.to_owned(),
			behavior: behavior.to_owned(),
		})?;

		let owner = resolved.body_owner();
		let body = if resolved.is_abstract() { None } else { self.registry.native(owner, behavior) };
		let body = body.ok_or_else(|| InspectError::MissingImplementation {
			type_name: owner.to_owned(),
			behavior: behavior.to_owned(),
		})?;
		Ok(body(&self.object, args))
	}

	fn get(&self, field: &str) -> Result<Value> {
		let type_name = self.type_name();
		if let Some(resolved) = self.registry.field(type_name, field) {
			return match self.registry.read_field(&self.object, &resolved) {
				FieldState::Value(value) => Ok(value),
				FieldState::Uninitialized => Err(InspectError::UninitializedField {
					type_name: type_name.to_owned(),
					field: field.to_owned(),
				}),
			};
		}

		self.object.get(field).ok_or_else(|| InspectError::UnknownField {
			type_name: type_name.to_owned(),
			field: field.to_owned(),
		})
	}

	fn set(&self, field: &str, value: Value) -> Result<()> {
		let type_name = self.type_name();
		let Some(resolved) = self.registry.field(type_name, field) else {
			self.object.set(field, value);
			return Ok(());
		};

		if resolved.decl.is_static {
			self.registry.set_static(resolved.declaring_type, field, value);
			return Ok(());
		}
		if resolved.decl.is_readonly && self.object.has(field) {
			return Err(InspectError::ReadOnlyField {
				type_name: type_name.to_owned(),
				field: field.to_owned(),
			});
		}
		self.object.set(field, value);
		Ok(())
	}

	fn behavior_visibility(&self, behavior: &str) -> Option<Visibility> {
		self.registry.behavior(self.type_name(), behavior).map(|resolved| resolved.decl.visibility)
	}

	fn field_visibility(&self, field: &str) -> Option<Visibility> {
		match self.registry.field(self.type_name(), field) {
			Some(resolved) => Some(resolved.decl.visibility),
			None => self.object.has(field).then_some(Visibility::Public),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
	Call,
	Read,
	Write,
}

/// Wrapper that checks access and runs before/after hooks around every operation of the inner target.
pub struct Proxy<D> {
	inner: D,
	before: Option<BeforeHook>,
	after: Option<AfterHook>,
}

impl<D: Dispatch> Proxy<D> {
	/// Wrap a target with no hooks installed.
	pub fn new(inner: D) -> Self {
		Self {
			inner,
			before: None,
			after: None,
		}
	}

	/// Install the hook run before delegating.
	pub fn before(mut self, hook: impl Fn(&str, &str, &[Value]) + 'static) -> Self {
		self.before = Some(Box::new(hook));
		self
	}

	/// Install the hook run after delegating.
	pub fn after(mut self, hook: impl Fn(&str, &str, &[Value], &Value) + 'static) -> Self {
		self.after = Some(Box::new(hook));
		self
	}

	/// Wrapped target.
	pub fn inner(&self) -> &D {
		&self.inner
	}

	/// Unwrap the target.
	pub fn into_inner(self) -> D {
		self.inner
	}

	/// Access check, before hook, delegation, after hook. Rejected operations run no hooks.
	fn intercept(&self, member: &str, access: Access, args: &[Value], op: impl FnOnce(&D) -> Result<Value>) -> Result<Value> {
		let type_name = self.inner.type_name();
		let visibility = match access {
			Access::Call => self.inner.behavior_visibility(member),
			Access::Read | Access::Write => self.inner.field_visibility(member),
		};

		match (visibility, access) {
			(Some(visibility), _) if !visibility.is_public() => {
				return Err(InspectError::NonPublicMember {
					type_name: type_name.to_owned(),
					member: member.to_owned(),
				});
			}
			(None, Access::Call) => {
				return Err(InspectError::UnknownBehavior {
					type_name: type_name.to_owned(),
					behavior: member.to_owned(),
				});
			}
			(None, Access::Read) => {
				return Err(InspectError::UnknownField {
					type_name: type_name.to_owned(),
					field: member.to_owned(),
				});
			}
			_ => {}
		}

		tracing::trace!(type_name, member, ?access, "proxied access");
		if let Some(before) = &self.before {
			before(type_name, member, args);
		}
		let result = op(&self.inner)?;
		if let Some(after) = &self.after {
			after(type_name, member, args, &result);
		}
		Ok(result)
	}
}

impl<D: Dispatch> Dispatch for Proxy<D> {
	fn type_name(&self) -> &str {
		self.inner.type_name()
	}

	fn call(&self, behavior: &str, args: &[Value]) -> Result<Value> {
		self.intercept(behavior, Access::Call, args, |inner| inner.call(behavior, args))
	}

	fn get(&self, field: &str) -> Result<Value> {
		self.intercept(field, Access::Read, &[], |inner| inner.get(field))
	}

	fn set(&self, field: &str, value: Value) -> Result<()> {
		let args = [value];
		self.intercept(field, Access::Write, &args, |inner| inner.set(field, args[0].clone()).map(|()| Value::Null))?;
		Ok(())
	}

	fn behavior_visibility(&self, behavior: &str) -> Option<Visibility> {
		self.inner.behavior_visibility(behavior)
	}

	fn field_visibility(&self, field: &str) -> Option<Visibility> {
		self.inner.field_visibility(field)
	}
}

#[cfg(test)]
mod tests;
