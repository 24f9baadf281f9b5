use crate::inspect::doc::clean_doc;
use crate::inspect::introspect::extract_decorations;
use crate::inspect::{Analyzer, FieldDescriptor, FieldState, Object, SnapshotNode, TypeMetadata, Value, Visibility, format_type};

impl<P: TypeMetadata + ?Sized> Analyzer<'_, P> {
	/// Describe declared fields in enumeration order, then slots no declaration covers.
	///
	/// Field values are analyzed one level below `depth`. Uninitialized fields are never read.
	pub(crate) fn extract_fields(&mut self, object: &Object, depth: u32) -> Vec<FieldDescriptor> {
		let provider = self.provider;
		let resolved = provider.fields(object.type_name());
		let mut out = Vec::with_capacity(resolved.len());

		for field in &resolved {
			let (value, is_initialized) = match provider.read_field(object, field) {
				FieldState::Uninitialized => (SnapshotNode::uninitialized(), false),
				FieldState::Value(value) => (self.process_value(&value, depth + 1), true),
			};
			out.push(FieldDescriptor {
				name: field.decl.name.to_string(),
				visibility: field.decl.visibility,
				doc: clean_doc(field.decl.doc.as_deref()),
				value,
				is_static: field.decl.is_static,
				declaring_type: field.declaring_type.to_owned(),
				is_readonly: field.decl.is_readonly,
				ty: format_type(field.decl.ty.as_ref()),
				decorations: extract_decorations(&field.decl.decorations),
				has_default: field.has_default(),
				is_initialized,
			});
		}

		let dynamic: Vec<(Box<str>, Value)> = object
			.slots()
			.iter()
			.filter(|(name, _)| !resolved.iter().any(|field| field.decl.name == *name))
			.cloned()
			.collect();
		for (name, value) in dynamic {
			out.push(FieldDescriptor {
				name: name.into_string(),
				visibility: Visibility::Public,
				doc: None,
				value: self.process_value(&value, depth + 1),
				is_static: false,
				declaring_type: object.type_name().to_owned(),
				is_readonly: false,
				ty: None,
				decorations: Vec::new(),
				has_default: false,
				is_initialized: true,
			});
		}
		out
	}
}
