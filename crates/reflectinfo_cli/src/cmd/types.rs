use std::path::PathBuf;

use reflectinfo::inspect::{HeapImage, InspectError, Literal, Registry, Result, TypeDecl, TypeMetadata, format_type};

use crate::cmd::util::{emit_json, or_dash};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long = "type")]
	pub type_name: Option<String>,
	#[arg(long)]
	pub json: bool,
}

/// List declared types, or describe one type's resolved members.
pub fn run(args: Args) -> Result<()> {
	let Args { path, type_name, json } = args;

	let image = HeapImage::open(&path)?;
	let registry = image.registry();

	match type_name {
		Some(name) => {
			let decl = registry.get(&name).ok_or_else(|| InspectError::TypeNotFound { name: name.clone() })?;
			let payload = describe(registry, decl);
			if json {
				return emit_json(&payload);
			}
			print_type(&payload);
		}
		None => {
			let payload: Vec<TypeSummaryJson> = registry.types().map(|decl| summarize(registry, decl)).collect();
			if json {
				return emit_json(&payload);
			}
			for item in &payload {
				println!(
					"{} {} extends={} fields={} behaviors={}",
					item.kind,
					item.name,
					or_dash(item.parent.as_deref()),
					item.fields,
					item.behaviors
				);
			}
		}
	}

	Ok(())
}

fn summarize(registry: &Registry, decl: &TypeDecl) -> TypeSummaryJson {
	TypeSummaryJson {
		name: decl.name.to_string(),
		kind: decl.kind.as_str(),
		parent: decl.parent.as_deref().map(str::to_owned),
		fields: registry.fields(&decl.name).len(),
		behaviors: registry.behaviors(&decl.name).len(),
	}
}

fn describe(registry: &Registry, decl: &TypeDecl) -> TypeDetailJson {
	TypeDetailJson {
		name: decl.name.to_string(),
		kind: decl.kind.as_str(),
		parent: decl.parent.as_deref().map(str::to_owned),
		interfaces: registry.interface_names(&decl.name).into_iter().map(str::to_owned).collect(),
		mixins: decl.mixins.iter().map(|name| name.to_string()).collect(),
		constants: registry
			.constants(&decl.name)
			.into_iter()
			.map(|(name, value)| (name.to_owned(), value.clone()))
			.collect(),
		fields: registry
			.fields(&decl.name)
			.into_iter()
			.map(|field| FieldJson {
				name: field.decl.name.to_string(),
				visibility: field.decl.visibility.as_str(),
				ty: format_type(field.decl.ty.as_ref()),
				declaring_type: field.declaring_type.to_owned(),
				is_static: field.decl.is_static,
				is_readonly: field.decl.is_readonly,
				default: field.decl.default.clone(),
			})
			.collect(),
		behaviors: registry
			.behaviors(&decl.name)
			.into_iter()
			.map(|behavior| BehaviorJson {
				name: behavior.decl.name.to_string(),
				visibility: behavior.decl.visibility.as_str(),
				declaring_type: behavior.declaring_type.to_owned(),
				mixin: behavior.mixin.map(str::to_owned),
				is_abstract: behavior.is_abstract(),
				is_static: behavior.decl.is_static,
				returns: format_type(behavior.decl.returns.as_ref()),
			})
			.collect(),
	}
}

fn print_type(item: &TypeDetailJson) {
	println!("{} {}", item.kind, item.name);
	println!("extends: {}", or_dash(item.parent.as_deref()));
	println!("implements: {}", item.interfaces.join(", "));
	println!("uses: {}", item.mixins.join(", "));

	println!("constants: {}", item.constants.len());
	for (name, value) in &item.constants {
		println!("  {name} = {value}");
	}

	println!("fields: {}", item.fields.len());
	for field in &item.fields {
		let modifiers = match (field.is_static, field.is_readonly) {
			(true, true) => " static readonly",
			(true, false) => " static",
			(false, true) => " readonly",
			(false, false) => "",
		};
		let default = field.default.as_ref().map(|value| format!(" = {value}")).unwrap_or_default();
		println!(
			"  {}{modifiers} {} {}{default} (from {})",
			field.visibility,
			or_dash(field.ty.as_deref()),
			field.name,
			field.declaring_type
		);
	}

	println!("behaviors: {}", item.behaviors.len());
	for behavior in &item.behaviors {
		let mixin = behavior.mixin.as_deref().map(|name| format!(" [mixin {name}]")).unwrap_or_default();
		let abstract_tag = if behavior.is_abstract { " abstract" } else { "" };
		println!(
			"  {}{abstract_tag} {}(): {} (from {}){mixin}",
			behavior.visibility,
			behavior.name,
			or_dash(behavior.returns.as_deref()),
			behavior.declaring_type
		);
	}
}

#[derive(serde::Serialize)]
struct TypeSummaryJson {
	name: String,
	kind: &'static str,
	parent: Option<String>,
	fields: usize,
	behaviors: usize,
}

#[derive(serde::Serialize)]
struct TypeDetailJson {
	name: String,
	kind: &'static str,
	parent: Option<String>,
	interfaces: Vec<String>,
	mixins: Vec<String>,
	#[serde(serialize_with = "serialize_constants")]
	constants: Vec<(String, Literal)>,
	fields: Vec<FieldJson>,
	behaviors: Vec<BehaviorJson>,
}

#[derive(serde::Serialize)]
struct FieldJson {
	name: String,
	visibility: &'static str,
	#[serde(rename = "type")]
	ty: Option<String>,
	declaring_type: String,
	is_static: bool,
	is_readonly: bool,
	default: Option<Literal>,
}

#[derive(serde::Serialize)]
struct BehaviorJson {
	name: String,
	visibility: &'static str,
	declaring_type: String,
	mixin: Option<String>,
	is_abstract: bool,
	is_static: bool,
	returns: Option<String>,
}

fn serialize_constants<S: serde::Serializer>(items: &[(String, Literal)], serializer: S) -> std::result::Result<S::Ok, S::Error> {
	use serde::ser::SerializeMap;

	let mut map = serializer.serialize_map(Some(items.len()))?;
	for (name, value) in items {
		map.serialize_entry(name, value)?;
	}
	map.end()
}
