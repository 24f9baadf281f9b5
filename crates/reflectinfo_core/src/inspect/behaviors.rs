use crate::inspect::doc::clean_doc;
use crate::inspect::introspect::extract_decorations;
use crate::inspect::params::extract_parameters;
use crate::inspect::{BehaviorDescriptor, ResolvedBehavior, TypeMetadata, format_type};

/// Describe every behavior visible on `type_name` in enumeration order.
pub(crate) fn extract_behaviors<P: TypeMetadata + ?Sized>(provider: &P, type_name: &str) -> Vec<BehaviorDescriptor> {
	let parent = provider.parent_of(type_name).map(|decl| decl.name.as_ref());
	provider
		.behaviors(type_name)
		.into_iter()
		.map(|behavior| BehaviorDescriptor {
			name: behavior.decl.name.to_string(),
			visibility: behavior.decl.visibility,
			doc: clean_doc(behavior.decl.doc.as_deref()),
			parameters: extract_parameters(&behavior.decl.params),
			is_static: behavior.decl.is_static,
			is_final: behavior.decl.is_final,
			is_abstract: behavior.is_abstract(),
			declaring_type: behavior.declaring_type.to_owned(),
			decorations: extract_decorations(&behavior.decl.decorations),
			return_type: format_type(behavior.decl.returns.as_ref()),
			is_generator: behavior.decl.is_generator,
			has_tentative_return_type: behavior.decl.tentative_returns.is_some(),
			tentative_return_type: format_type(behavior.decl.tentative_returns.as_ref()),
			mixin: behavior.mixin.map(str::to_owned),
			is_override: is_override(provider, type_name, parent, &behavior),
		})
		.collect()
}

/// Declared directly on `type_name` and implementing an abstract declaration of the direct supertype.
fn is_override<P: TypeMetadata + ?Sized>(provider: &P, type_name: &str, parent: Option<&str>, behavior: &ResolvedBehavior<'_>) -> bool {
	if behavior.declaring_type != type_name || behavior.from_mixin || behavior.from_interface {
		return false;
	}
	let Some(parent) = parent else {
		return false;
	};
	provider
		.behavior(parent, &behavior.decl.name)
		.is_some_and(|inherited| inherited.is_abstract())
}
