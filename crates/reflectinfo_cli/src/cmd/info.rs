use std::path::PathBuf;

use reflectinfo::inspect::{HeapImage, Result, TypeKind};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print type, object, and root counts for a heap image.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let image = HeapImage::open(&path)?;
	let registry = image.registry();
	let kind_count = |kind: TypeKind| registry.types().filter(|decl| decl.kind == kind).count();

	let payload = InfoJson {
		path: path.display().to_string(),
		types: registry.len(),
		classes: kind_count(TypeKind::Class),
		interfaces: kind_count(TypeKind::Interface),
		mixins: kind_count(TypeKind::Mixin),
		enums: kind_count(TypeKind::Enum),
		objects: image.object_count(),
		roots: image.root_names().map(str::to_owned).collect(),
	};

	if json {
		return emit_json(&payload);
	}

	println!("path: {}", payload.path);
	println!("types: {}", payload.types);
	println!("  classes: {}", payload.classes);
	println!("  interfaces: {}", payload.interfaces);
	println!("  mixins: {}", payload.mixins);
	println!("  enums: {}", payload.enums);
	println!("objects: {}", payload.objects);
	println!("roots: {}", payload.roots.len());
	for name in &payload.roots {
		println!("  {name}");
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	types: usize,
	classes: usize,
	interfaces: usize,
	mixins: usize,
	enums: usize,
	objects: usize,
	roots: Vec<String>,
}
