use crate::inspect::{InspectError, Result};

/// Name of the universal type. It admits null without a `?` marker.
pub const ANY_TYPE: &str = "mixed";

/// Declared type of a field, parameter, or return value.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum TypeExpr {
	/// Single named type, optionally marked nullable.
	Named {
		/// Type name as declared.
		name: Box<str>,
		/// Whether the declaration admits null (`?T`).
		nullable: bool,
	},
	/// Value must match any one component.
	Union(Vec<TypeExpr>),
	/// Value must match every component.
	Intersection(Vec<TypeExpr>),
}

impl TypeExpr {
	/// Non-nullable named type.
	pub fn named(name: impl Into<Box<str>>) -> Self {
		Self::Named {
			name: name.into(),
			nullable: false,
		}
	}

	/// Nullable named type.
	pub fn nullable(name: impl Into<Box<str>>) -> Self {
		Self::Named {
			name: name.into(),
			nullable: true,
		}
	}

	/// Whether a value of this type may be null.
	pub fn allows_null(&self) -> bool {
		match self {
			Self::Named { name, nullable } => *nullable || name.as_ref() == ANY_TYPE || name.eq_ignore_ascii_case("null"),
			Self::Union(items) => items.iter().any(Self::allows_null),
			Self::Intersection(_) => false,
		}
	}

	/// Canonical signature string.
	pub fn signature(&self) -> String {
		match self {
			Self::Named { name, nullable } => {
				if *nullable && name.as_ref() != ANY_TYPE {
					format!("?{name}")
				} else {
					name.to_string()
				}
			}
			Self::Union(items) => join(items, "|"),
			Self::Intersection(items) => join(items, "&"),
		}
	}

	/// Parse a signature such as `int`, `?Foo`, `int|string|null`, `A&B`, or `(A&B)|null`.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = || InspectError::InvalidTypeExpr { text: input.to_owned() };
		let text = input.trim();
		if text.is_empty() {
			return Err(invalid());
		}

		if let Some(rest) = text.strip_prefix('?') {
			let name = rest.trim();
			if !is_ident(name) {
				return Err(invalid());
			}
			return Ok(Self::nullable(name));
		}

		let mut members = Vec::new();
		for part in text.split('|') {
			let part = part.trim();
			let inner = match part.strip_prefix('(') {
				Some(open) => open.strip_suffix(')').ok_or_else(invalid)?,
				None => part,
			};

			let names: Vec<&str> = inner.split('&').map(str::trim).collect();
			if names.iter().any(|name| !is_ident(name)) {
				return Err(invalid());
			}
			if names.len() == 1 {
				members.push(Self::named(names[0]));
			} else {
				members.push(Self::Intersection(names.into_iter().map(Self::named).collect()));
			}
		}

		if members.len() == 1 {
			return members.pop().ok_or_else(invalid);
		}
		Ok(Self::Union(members))
	}
}

impl TryFrom<String> for TypeExpr {
	type Error = InspectError;

	fn try_from(value: String) -> Result<Self> {
		Self::parse(&value)
	}
}

/// Format an optional declared type. `None` means no type was declared.
pub fn format_type(ty: Option<&TypeExpr>) -> Option<String> {
	ty.map(TypeExpr::signature)
}

fn join(items: &[TypeExpr], separator: &str) -> String {
	items.iter().map(TypeExpr::signature).collect::<Vec<_>>().join(separator)
}

fn is_ident(text: &str) -> bool {
	!text.is_empty() && text.chars().all(|ch| ch.is_alphanumeric() || matches!(ch, '_' | '\\' | ':'))
}
