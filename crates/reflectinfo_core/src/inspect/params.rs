use crate::inspect::introspect::extract_decorations;
use crate::inspect::{ParamDecl, ParameterDescriptor, TypeExpr, format_type};

/// Describe every parameter in signature order.
pub(crate) fn extract_parameters(params: &[ParamDecl]) -> Vec<ParameterDescriptor> {
	params
		.iter()
		.enumerate()
		.map(|(idx, param)| ParameterDescriptor {
			name: param.name.to_string(),
			ty: format_type(param.ty.as_ref()),
			is_variadic: param.variadic,
			has_default: param.default.is_some(),
			default: param.default.clone(),
			decorations: extract_decorations(&param.decorations),
			is_promoted: param.promoted,
			allows_null: param.ty.as_ref().is_none_or(TypeExpr::allows_null),
			is_optional: params[idx..].iter().all(|rest| rest.variadic || rest.default.is_some()),
		})
		.collect()
}
