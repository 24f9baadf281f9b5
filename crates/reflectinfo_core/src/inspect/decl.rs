use serde::{Deserialize, Deserializer, Serialize};

use crate::inspect::{Key, Literal, TypeExpr};

/// Member access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
	/// Accessible from anywhere.
	#[default]
	Public,
	/// Accessible from the declaring type and its subtypes.
	Protected,
	/// Accessible from the declaring type only.
	Private,
}

impl Visibility {
	/// Lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Public => "public",
			Self::Protected => "protected",
			Self::Private => "private",
		}
	}

	/// Whether the member is public.
	pub fn is_public(self) -> bool {
		matches!(self, Self::Public)
	}
}

/// Kind of declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
	/// Instantiable type with optional single supertype.
	#[default]
	Class,
	/// Capability set: named contract of abstract behaviors and constants.
	Interface,
	/// Mixed-in behavior set composed into classes without inheritance.
	Mixin,
	/// Fixed set of named singleton cases.
	Enum,
}

impl TypeKind {
	/// Lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Class => "class",
			Self::Interface => "interface",
			Self::Mixin => "mixin",
			Self::Enum => "enum",
		}
	}
}

/// Named annotation with literal arguments.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Decoration {
	/// Decoration type name.
	pub name: Box<str>,
	/// Positional (integer keys) and named (string keys) arguments in source order.
	#[serde(default, deserialize_with = "literal_entries")]
	pub args: Vec<(Key, Literal)>,
}

impl Decoration {
	/// Decoration with positional arguments.
	pub fn new(name: impl Into<Box<str>>, args: impl IntoIterator<Item = Literal>) -> Self {
		Self {
			name: name.into(),
			args: args.into_iter().enumerate().map(|(idx, arg)| (Key::Int(idx as i64), arg)).collect(),
		}
	}

	/// Append a named argument.
	pub fn named_arg(mut self, name: &str, value: Literal) -> Self {
		self.args.push((Key::from(name), value));
		self
	}
}

/// Declared field.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FieldDecl {
	/// Field name.
	pub name: Box<str>,
	/// Access level.
	#[serde(default)]
	pub visibility: Visibility,
	/// Declared type, if any.
	#[serde(default, rename = "type")]
	pub ty: Option<TypeExpr>,
	/// Whether the field belongs to the type rather than instances.
	#[serde(default, rename = "static")]
	pub is_static: bool,
	/// Whether the field can be assigned only once.
	#[serde(default, rename = "readonly")]
	pub is_readonly: bool,
	/// Declared default value. `Some(Literal::NULL)` is an explicit null default.
	#[serde(default, deserialize_with = "present_literal")]
	pub default: Option<Literal>,
	/// Raw documentation comment.
	#[serde(default)]
	pub doc: Option<Box<str>>,
	/// Attached decorations.
	#[serde(default)]
	pub decorations: Vec<Decoration>,
}

impl FieldDecl {
	/// Public untyped instance field.
	pub fn new(name: impl Into<Box<str>>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	/// Set the declared type.
	pub fn typed(mut self, ty: TypeExpr) -> Self {
		self.ty = Some(ty);
		self
	}

	/// Set the access level.
	pub fn visibility(mut self, visibility: Visibility) -> Self {
		self.visibility = visibility;
		self
	}

	/// Set the declared default.
	pub fn default_value(mut self, value: Literal) -> Self {
		self.default = Some(value);
		self
	}

	/// Mark as static.
	pub fn as_static(mut self) -> Self {
		self.is_static = true;
		self
	}

	/// Mark as read-only.
	pub fn as_readonly(mut self) -> Self {
		self.is_readonly = true;
		self
	}

	/// Set the documentation comment.
	pub fn doc(mut self, doc: impl Into<Box<str>>) -> Self {
		self.doc = Some(doc.into());
		self
	}

	/// Attach a decoration.
	pub fn decorate(mut self, decoration: Decoration) -> Self {
		self.decorations.push(decoration);
		self
	}
}

/// Declared behavior parameter.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ParamDecl {
	/// Parameter name.
	pub name: Box<str>,
	/// Declared type, if any.
	#[serde(default, rename = "type")]
	pub ty: Option<TypeExpr>,
	/// Whether the parameter collects remaining arguments.
	#[serde(default)]
	pub variadic: bool,
	/// Literal default value.
	#[serde(default, deserialize_with = "present_literal")]
	pub default: Option<Literal>,
	/// Whether the parameter also declares a field of the same name.
	#[serde(default)]
	pub promoted: bool,
	/// Attached decorations.
	#[serde(default)]
	pub decorations: Vec<Decoration>,
}

impl ParamDecl {
	/// Untyped required parameter.
	pub fn new(name: impl Into<Box<str>>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	/// Set the declared type.
	pub fn typed(mut self, ty: TypeExpr) -> Self {
		self.ty = Some(ty);
		self
	}

	/// Set the literal default.
	pub fn default_value(mut self, value: Literal) -> Self {
		self.default = Some(value);
		self
	}

	/// Mark as variadic.
	pub fn as_variadic(mut self) -> Self {
		self.variadic = true;
		self
	}

	/// Mark as promoted to a field.
	pub fn as_promoted(mut self) -> Self {
		self.promoted = true;
		self
	}

	/// Attach a decoration.
	pub fn decorate(mut self, decoration: Decoration) -> Self {
		self.decorations.push(decoration);
		self
	}
}

/// Declared behavior (method).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct BehaviorDecl {
	/// Behavior name.
	pub name: Box<str>,
	/// Access level.
	#[serde(default)]
	pub visibility: Visibility,
	/// Parameters in signature order.
	#[serde(default)]
	pub params: Vec<ParamDecl>,
	/// Declared return type.
	#[serde(default)]
	pub returns: Option<TypeExpr>,
	/// Return type the runtime expects but does not yet enforce.
	#[serde(default)]
	pub tentative_returns: Option<TypeExpr>,
	/// Whether the behavior belongs to the type rather than instances.
	#[serde(default, rename = "static")]
	pub is_static: bool,
	/// Whether subtypes may not redefine the behavior.
	#[serde(default, rename = "final")]
	pub is_final: bool,
	/// Whether the behavior has no body.
	#[serde(default, rename = "abstract")]
	pub is_abstract: bool,
	/// Whether the behavior lazily produces a sequence.
	#[serde(default, rename = "generator")]
	pub is_generator: bool,
	/// Raw documentation comment.
	#[serde(default)]
	pub doc: Option<Box<str>>,
	/// Attached decorations.
	#[serde(default)]
	pub decorations: Vec<Decoration>,
}

impl BehaviorDecl {
	/// Public instance behavior with no parameters.
	pub fn new(name: impl Into<Box<str>>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	/// Set the access level.
	pub fn visibility(mut self, visibility: Visibility) -> Self {
		self.visibility = visibility;
		self
	}

	/// Append a parameter.
	pub fn param(mut self, param: ParamDecl) -> Self {
		self.params.push(param);
		self
	}

	/// Set the declared return type.
	pub fn returns(mut self, ty: TypeExpr) -> Self {
		self.returns = Some(ty);
		self
	}

	/// Set the tentative return type.
	pub fn tentative(mut self, ty: TypeExpr) -> Self {
		self.tentative_returns = Some(ty);
		self
	}

	/// Mark as static.
	pub fn as_static(mut self) -> Self {
		self.is_static = true;
		self
	}

	/// Mark as final.
	pub fn as_final(mut self) -> Self {
		self.is_final = true;
		self
	}

	/// Mark as abstract.
	pub fn as_abstract(mut self) -> Self {
		self.is_abstract = true;
		self
	}

	/// Mark as a generator.
	pub fn as_generator(mut self) -> Self {
		self.is_generator = true;
		self
	}

	/// Set the documentation comment.
	pub fn doc(mut self, doc: impl Into<Box<str>>) -> Self {
		self.doc = Some(doc.into());
		self
	}

	/// Attach a decoration.
	pub fn decorate(mut self, decoration: Decoration) -> Self {
		self.decorations.push(decoration);
		self
	}
}

/// One case of an enum type.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CaseDecl {
	/// Case name.
	pub name: Box<str>,
	/// Backing value for backed enums.
	#[serde(default, deserialize_with = "present_literal")]
	pub value: Option<Literal>,
}

/// Full declaration of one type.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TypeDecl {
	/// Type name.
	pub name: Box<str>,
	/// Type kind.
	#[serde(default)]
	pub kind: TypeKind,
	/// Source file the type was declared in.
	#[serde(default)]
	pub file: Option<Box<str>>,
	/// First source line of the declaration.
	#[serde(default)]
	pub start_line: Option<u32>,
	/// Last source line of the declaration.
	#[serde(default)]
	pub end_line: Option<u32>,
	/// Raw documentation comment.
	#[serde(default)]
	pub doc: Option<Box<str>>,
	/// Whether the type may not be extended.
	#[serde(default, rename = "final")]
	pub is_final: bool,
	/// Whether the type may not be instantiated.
	#[serde(default, rename = "abstract")]
	pub is_abstract: bool,
	/// Whether all instance fields are read-only.
	#[serde(default, rename = "readonly")]
	pub is_readonly: bool,
	/// Supertype name.
	#[serde(default)]
	pub parent: Option<Box<str>>,
	/// Directly declared capability sets. For interfaces, the extended interfaces.
	#[serde(default)]
	pub interfaces: Vec<Box<str>>,
	/// Directly used mixins.
	#[serde(default)]
	pub mixins: Vec<Box<str>>,
	/// Constants in declaration order.
	#[serde(default, deserialize_with = "named_literals")]
	pub constants: Vec<(Box<str>, Literal)>,
	/// Fields in declaration order.
	#[serde(default)]
	pub fields: Vec<FieldDecl>,
	/// Behaviors in declaration order.
	#[serde(default)]
	pub behaviors: Vec<BehaviorDecl>,
	/// Decorations on the type itself.
	#[serde(default)]
	pub decorations: Vec<Decoration>,
	/// Enum cases in declaration order.
	#[serde(default)]
	pub cases: Vec<CaseDecl>,
}

impl TypeDecl {
	/// Declaration of the given kind with no members.
	pub fn new(name: impl Into<Box<str>>, kind: TypeKind) -> Self {
		Self {
			name: name.into(),
			kind,
			..Self::default()
		}
	}

	/// Class declaration.
	pub fn class(name: impl Into<Box<str>>) -> Self {
		Self::new(name, TypeKind::Class)
	}

	/// Interface declaration.
	pub fn interface(name: impl Into<Box<str>>) -> Self {
		Self::new(name, TypeKind::Interface)
	}

	/// Mixin declaration.
	pub fn mixin(name: impl Into<Box<str>>) -> Self {
		Self::new(name, TypeKind::Mixin)
	}

	/// Enum declaration.
	pub fn enumeration(name: impl Into<Box<str>>) -> Self {
		Self::new(name, TypeKind::Enum)
	}

	/// Set the supertype.
	pub fn extends(mut self, parent: impl Into<Box<str>>) -> Self {
		self.parent = Some(parent.into());
		self
	}

	/// Add a capability set.
	pub fn implements(mut self, interface: impl Into<Box<str>>) -> Self {
		self.interfaces.push(interface.into());
		self
	}

	/// Add a mixin.
	pub fn uses(mut self, mixin: impl Into<Box<str>>) -> Self {
		self.mixins.push(mixin.into());
		self
	}

	/// Mark as abstract.
	pub fn as_abstract(mut self) -> Self {
		self.is_abstract = true;
		self
	}

	/// Mark as final.
	pub fn as_final(mut self) -> Self {
		self.is_final = true;
		self
	}

	/// Mark as read-only.
	pub fn as_readonly(mut self) -> Self {
		self.is_readonly = true;
		self
	}

	/// Set the documentation comment.
	pub fn doc(mut self, doc: impl Into<Box<str>>) -> Self {
		self.doc = Some(doc.into());
		self
	}

	/// Set the source location.
	pub fn located(mut self, file: impl Into<Box<str>>, start_line: u32, end_line: u32) -> Self {
		self.file = Some(file.into());
		self.start_line = Some(start_line);
		self.end_line = Some(end_line);
		self
	}

	/// Add a constant.
	pub fn constant(mut self, name: impl Into<Box<str>>, value: Literal) -> Self {
		self.constants.push((name.into(), value));
		self
	}

	/// Add a field.
	pub fn field(mut self, field: FieldDecl) -> Self {
		self.fields.push(field);
		self
	}

	/// Add a behavior.
	pub fn behavior(mut self, behavior: BehaviorDecl) -> Self {
		self.behaviors.push(behavior);
		self
	}

	/// Attach a decoration.
	pub fn decorate(mut self, decoration: Decoration) -> Self {
		self.decorations.push(decoration);
		self
	}

	/// Add an enum case.
	pub fn case(mut self, name: impl Into<Box<str>>, value: Option<Literal>) -> Self {
		self.cases.push(CaseDecl { name: name.into(), value });
		self
	}

	/// Look up a directly declared field.
	pub fn own_field(&self, name: &str) -> Option<&FieldDecl> {
		self.fields.iter().find(|field| field.name.as_ref() == name)
	}

	/// Look up a directly declared behavior.
	pub fn own_behavior(&self, name: &str) -> Option<&BehaviorDecl> {
		self.behaviors.iter().find(|behavior| behavior.name.as_ref() == name)
	}
}

fn present_literal<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<Literal>, D::Error> {
	Literal::deserialize(deserializer).map(Some)
}

fn literal_entries<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<(Key, Literal)>, D::Error> {
	Ok(match Literal::deserialize(deserializer)? {
		Literal::List(items) => items,
		scalar => vec![(Key::Int(0), scalar)],
	})
}

fn named_literals<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<(Box<str>, Literal)>, D::Error> {
	let map = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
	Ok(map.into_iter().map(|(name, value)| (name.into_boxed_str(), Literal::from(value))).collect())
}
