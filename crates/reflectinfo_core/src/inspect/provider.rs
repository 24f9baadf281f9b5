use std::collections::HashSet;

use crate::inspect::{BehaviorDecl, FieldDecl, Literal, Object, TypeDecl, TypeKind, Value};

/// Field as seen through a concrete type, with inheritance and mixins resolved.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedField<'a> {
	/// Underlying declaration.
	pub decl: &'a FieldDecl,
	/// Type that owns the field. Mixin fields belong to the type using the mixin.
	pub declaring_type: &'a str,
}

impl ResolvedField<'_> {
	/// Whether the field has a declared or implicit default.
	///
	/// Untyped fields default to null implicitly.
	pub fn has_default(&self) -> bool {
		self.decl.default.is_some() || self.decl.ty.is_none()
	}
}

/// Behavior as seen through a concrete type, with inheritance and mixins resolved.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedBehavior<'a> {
	/// Underlying declaration.
	pub decl: &'a BehaviorDecl,
	/// Type that owns the behavior. Mixin behaviors belong to the type using the mixin.
	pub declaring_type: &'a str,
	/// Mixin that contributed the behavior body, or whose behavior of the same name the type replaces.
	pub mixin: Option<&'a str>,
	/// Whether the body itself comes from [`ResolvedBehavior::mixin`].
	pub from_mixin: bool,
	/// Whether the declaration comes from a capability set.
	pub from_interface: bool,
}

impl ResolvedBehavior<'_> {
	/// Whether the behavior has no body.
	pub fn is_abstract(&self) -> bool {
		self.decl.is_abstract || self.from_interface
	}

	/// Type whose native table holds the body.
	pub fn body_owner(&self) -> &str {
		match self.mixin {
			Some(mixin) if self.from_mixin => mixin,
			_ => self.declaring_type,
		}
	}
}

/// Result of reading a field from a live object.
#[derive(Debug, Clone)]
pub enum FieldState {
	/// Declared but never assigned, with no default to fall back on.
	Uninitialized,
	/// Current value.
	Value(Value),
}

/// Type-metadata provider: everything the analyzer knows about types comes through here.
///
/// Implementors supply [`TypeMetadata::lookup`]; member enumeration, ancestry, and field reads
/// are derived from declarations unless overridden.
pub trait TypeMetadata {
	/// Look up a type declaration by name.
	fn lookup(&self, name: &str) -> Option<&TypeDecl>;

	/// Current value of a static field, keyed by declaring type.
	fn static_value(&self, _declaring_type: &str, _field: &str) -> Option<Value> {
		None
	}

	/// The type followed by its supertype chain. Stops at unknown or repeated names.
	fn ancestry(&self, name: &str) -> Vec<&TypeDecl> {
		let mut out = Vec::new();
		let mut seen = HashSet::new();
		let mut current = self.lookup(name);
		while let Some(decl) = current {
			if !seen.insert(decl.name.as_ref()) {
				break;
			}
			out.push(decl);
			current = decl.parent.as_deref().and_then(|parent| self.lookup(parent));
		}
		out
	}

	/// Supertype declaration.
	fn parent_of(&self, name: &str) -> Option<&TypeDecl> {
		self.lookup(name)?.parent.as_deref().and_then(|parent| self.lookup(parent))
	}

	/// Mixins used by a declaration, followed by mixins those mixins use.
	fn mixin_closure(&self, decl: &TypeDecl) -> Vec<&TypeDecl> {
		let mut out: Vec<&TypeDecl> = Vec::new();
		let mut seen = HashSet::new();
		let mut pending: Vec<&str> = decl.mixins.iter().rev().map(AsRef::as_ref).collect();
		while let Some(name) = pending.pop() {
			if !seen.insert(name) {
				continue;
			}
			let Some(mixin) = self.lookup(name) else {
				continue;
			};
			out.push(mixin);
			pending.extend(mixin.mixins.iter().rev().map(AsRef::as_ref));
		}
		out
	}

	/// All capability sets: directly declared ones and their super-interfaces, then inherited ones.
	fn interface_names(&self, name: &str) -> Vec<&str> {
		let mut out: Vec<&str> = Vec::new();
		for decl in self.ancestry(name) {
			let mut pending: Vec<&str> = decl.interfaces.iter().rev().map(AsRef::as_ref).collect();
			while let Some(iface) = pending.pop() {
				if out.contains(&iface) {
					continue;
				}
				out.push(iface);
				if let Some(iface_decl) = self.lookup(iface) {
					pending.extend(iface_decl.interfaces.iter().rev().map(AsRef::as_ref));
				}
			}
		}
		out
	}

	/// Constants visible on a type: own, inherited, then from capability sets. First name wins.
	fn constants(&self, name: &str) -> Vec<(&str, &Literal)> {
		let mut out: Vec<(&str, &Literal)> = Vec::new();
		let interfaces: Vec<&TypeDecl> = self.interface_names(name).into_iter().filter_map(|iface| self.lookup(iface)).collect();
		for decl in self.ancestry(name).into_iter().chain(interfaces) {
			for (constant, value) in &decl.constants {
				if !out.iter().any(|(existing, _)| *existing == constant.as_ref()) {
					out.push((constant.as_ref(), value));
				}
			}
		}
		out
	}

	/// Fields visible on a type: own, mixed-in, then inherited. The most derived declaration wins.
	fn fields(&self, name: &str) -> Vec<ResolvedField<'_>> {
		let mut out = Vec::new();
		let mut seen = HashSet::new();
		for decl in self.ancestry(name) {
			let mixins = self.mixin_closure(decl);
			let declared = decl.fields.iter().chain(mixins.into_iter().flat_map(|mixin| mixin.fields.iter()));
			for field in declared {
				if seen.insert(field.name.as_ref()) {
					out.push(ResolvedField {
						decl: field,
						declaring_type: &decl.name,
					});
				}
			}
		}
		out
	}

	/// Behaviors visible on a type: own, mixed-in, inherited, then abstract capability-set declarations.
	fn behaviors(&self, name: &str) -> Vec<ResolvedBehavior<'_>> {
		let mut out = Vec::new();
		let mut seen = HashSet::new();
		for decl in self.ancestry(name) {
			let mixins = self.mixin_closure(decl);
			for behavior in &decl.behaviors {
				if seen.insert(behavior.name.as_ref()) {
					let replaced = mixins
						.iter()
						.copied()
						.find(|mixin| mixin.behaviors.iter().any(|item| item.name == behavior.name))
						.map(|mixin| mixin.name.as_ref());
					out.push(ResolvedBehavior {
						decl: behavior,
						declaring_type: &decl.name,
						mixin: replaced,
						from_mixin: false,
						from_interface: decl.kind == TypeKind::Interface,
					});
				}
			}
			for mixin in mixins {
				for behavior in &mixin.behaviors {
					if seen.insert(behavior.name.as_ref()) {
						out.push(ResolvedBehavior {
							decl: behavior,
							declaring_type: &decl.name,
							mixin: Some(mixin.name.as_ref()),
							from_mixin: true,
							from_interface: false,
						});
					}
				}
			}
		}

		for iface in self.interface_names(name) {
			let Some(iface_decl) = self.lookup(iface) else {
				continue;
			};
			for behavior in &iface_decl.behaviors {
				if seen.insert(behavior.name.as_ref()) {
					out.push(ResolvedBehavior {
						decl: behavior,
						declaring_type: &iface_decl.name,
						mixin: None,
						from_mixin: false,
						from_interface: true,
					});
				}
			}
		}
		out
	}

	/// Resolve one behavior by name.
	fn behavior(&self, type_name: &str, behavior: &str) -> Option<ResolvedBehavior<'_>> {
		self.behaviors(type_name).into_iter().find(|item| item.decl.name.as_ref() == behavior)
	}

	/// Resolve one field by name.
	fn field(&self, type_name: &str, field: &str) -> Option<ResolvedField<'_>> {
		self.fields(type_name).into_iter().find(|item| item.decl.name.as_ref() == field)
	}

	/// Read a field's current value, falling back to declared or implicit defaults.
	fn read_field(&self, object: &Object, field: &ResolvedField<'_>) -> FieldState {
		let name = field.decl.name.as_ref();
		let assigned = if field.decl.is_static {
			self.static_value(field.declaring_type, name)
		} else {
			object.get(name)
		};
		if let Some(value) = assigned {
			return FieldState::Value(value);
		}

		match (&field.decl.default, &field.decl.ty) {
			(Some(default), _) => FieldState::Value(default.to_value()),
			(None, None) => FieldState::Value(Value::Null),
			(None, Some(_)) => FieldState::Uninitialized,
		}
	}
}
