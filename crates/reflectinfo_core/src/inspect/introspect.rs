use crate::inspect::behaviors::extract_behaviors;
use crate::inspect::doc::clean_doc;
use crate::inspect::{Analyzer, CompositeNode, Decoration, DecorationDescriptor, Literal, ObjectRef, TypeDecl, TypeKind, TypeMetadata};

impl<P: TypeMetadata + ?Sized> Analyzer<'_, P> {
	/// Build the composite node for an object that passed the visited and depth checks.
	///
	/// Objects whose type the provider does not know still yield a node: structural facts are
	/// left empty and every slot is reported as a dynamic field.
	pub(crate) fn introspect_object(&mut self, object: &ObjectRef, depth: u32) -> CompositeNode {
		let provider = self.provider;
		let type_name = object.type_name();
		let decl = provider.lookup(type_name);
		if decl.is_none() {
			tracing::debug!(type_name, "no declaration for runtime type");
		}

		let is_enum = decl.is_some_and(|decl| decl.kind == TypeKind::Enum);
		let fields = self.extract_fields(object, depth);

		CompositeNode {
			type_name: type_name.to_owned(),
			identity: object.identity(),
			file: decl.and_then(|decl| decl.file.as_deref()).map(str::to_owned),
			start_line: decl.and_then(|decl| decl.start_line),
			end_line: decl.and_then(|decl| decl.end_line),
			doc: clean_doc(decl.and_then(|decl| decl.doc.as_deref())),
			is_final: decl.is_some_and(|decl| decl.is_final),
			is_abstract: decl.is_some_and(|decl| decl.is_abstract),
			is_cloneable: decl.is_some_and(|decl| is_cloneable(provider, decl)),
			is_readonly: decl.is_some_and(|decl| decl.is_readonly),
			is_enum,
			parent: decl.and_then(|decl| decl.parent.as_deref()).map(str::to_owned),
			interfaces: provider.interface_names(type_name).into_iter().map(str::to_owned).collect(),
			mixins: decl.map(|decl| decl.mixins.iter().map(|name| name.to_string()).collect()).unwrap_or_default(),
			constants: provider
				.constants(type_name)
				.into_iter()
				.map(|(name, value)| (name.to_owned(), value.clone()))
				.collect(),
			fields,
			behaviors: extract_behaviors(provider, type_name),
			decorations: decl.map(|decl| extract_decorations(&decl.decorations)).unwrap_or_default(),
			cases: match decl {
				Some(decl) if is_enum => enum_cases(decl),
				_ => Vec::new(),
			},
		}
	}
}

/// Plain instantiable classes are cloneable unless a non-public `__clone` hides copying.
fn is_cloneable<P: TypeMetadata + ?Sized>(provider: &P, decl: &TypeDecl) -> bool {
	decl.kind == TypeKind::Class
		&& !decl.is_abstract
		&& provider
			.behavior(&decl.name, "__clone")
			.is_none_or(|behavior| behavior.decl.visibility.is_public())
}

/// Case name to backing literal; pure cases map to their own name.
fn enum_cases(decl: &TypeDecl) -> Vec<(String, Literal)> {
	decl.cases
		.iter()
		.map(|case| {
			let value = case.value.clone().unwrap_or_else(|| Literal::str(case.name.clone()));
			(case.name.to_string(), value)
		})
		.collect()
}

pub(crate) fn extract_decorations(decorations: &[Decoration]) -> Vec<DecorationDescriptor> {
	decorations
		.iter()
		.map(|decoration| DecorationDescriptor {
			name: decoration.name.to_string(),
			args: decoration.args.clone(),
		})
		.collect()
}
