use reflectinfo::inspect::{
	BehaviorDescriptor, CollectionNode, CompositeNode, DecorationDescriptor, FieldDescriptor, Key, ParameterDescriptor, Scalar, SnapshotNode,
};

use crate::cmd::util::truncate;

/// Cosmetic limits for rendered snapshots. Never changes ordering or which attributes are shown.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of Unicode scalar values printed for string scalars.
	pub max_string_len: usize,
	/// Maximum number of entries printed for a single collection.
	pub max_collection_items: usize,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_string_len: 200,
			max_collection_items: 32,
		}
	}
}

impl PrintOptions {
	/// Tighter limits for skimming large graphs.
	pub fn for_overview() -> Self {
		Self {
			max_string_len: 60,
			max_collection_items: 8,
		}
	}
}

/// Render a snapshot tree as indented text.
pub fn render_node(node: &SnapshotNode, options: PrintOptions) -> String {
	let mut out = String::new();
	write_node(&mut out, node, 0, options);
	out
}

fn push_line(out: &mut String, line: &str) {
	out.push_str(line);
	out.push('\n');
}

fn write_node(out: &mut String, node: &SnapshotNode, indent: usize, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match node {
		SnapshotNode::Scalar(_) => push_line(out, &format!("{pad}{}", scalar_text(node, options))),
		SnapshotNode::Collection(items) => write_collection(out, items, indent, options),
		SnapshotNode::Composite(item) => write_composite(out, item, indent, options),
	}
}

/// Inline text for scalars; sentinels print bare so they stand out from string data.
fn scalar_text(node: &SnapshotNode, options: PrintOptions) -> String {
	match node.as_scalar() {
		Some(Scalar::Str(text)) if node.is_uninitialized() || node.sentinel_type().is_some() => text.to_string(),
		Some(Scalar::Str(text)) => format!("{:?}", truncate(text, options.max_string_len)),
		Some(scalar) => scalar.to_string(),
		None => String::new(),
	}
}

fn write_collection(out: &mut String, items: &CollectionNode, indent: usize, options: PrintOptions) {
	let pad = " ".repeat(indent);
	if items.is_empty() {
		push_line(out, &format!("{pad}[]"));
		return;
	}

	push_line(out, &format!("{pad}["));
	for entry in items.entries.iter().take(options.max_collection_items) {
		write_labeled(out, &key_label(&entry.key), &entry.value, indent + 2, options);
	}
	if items.len() > options.max_collection_items {
		push_line(out, &format!("{pad}  ... {} more", items.len() - options.max_collection_items));
	}
	push_line(out, &format!("{pad}]"));
}

/// `label => value`, with nested nodes starting on the next line.
fn write_labeled(out: &mut String, label: &str, value: &SnapshotNode, indent: usize, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		SnapshotNode::Scalar(_) => push_line(out, &format!("{pad}{label} => {}", scalar_text(value, options))),
		_ => {
			push_line(out, &format!("{pad}{label} =>"));
			write_node(out, value, indent + 2, options);
		}
	}
}

fn key_label(key: &Key) -> String {
	match key {
		Key::Int(value) => value.to_string(),
		Key::Str(value) => format!("{value:?}"),
	}
}

fn write_composite(out: &mut String, item: &CompositeNode, indent: usize, options: PrintOptions) {
	let pad = " ".repeat(indent);

	let mut header = format!("{pad}{} #0x{:016x}", item.type_name, item.identity);
	for (flag, label) in [
		(item.is_enum, "enum"),
		(item.is_final, "final"),
		(item.is_abstract, "abstract"),
		(item.is_readonly, "readonly"),
		(item.is_cloneable, "cloneable"),
	] {
		if flag {
			header.push(' ');
			header.push_str(label);
		}
	}
	push_line(out, &header);

	if let Some(file) = &item.file {
		match (item.start_line, item.end_line) {
			(Some(start), Some(end)) => push_line(out, &format!("{pad}  file: {file}:{start}-{end}")),
			_ => push_line(out, &format!("{pad}  file: {file}")),
		}
	}
	if let Some(doc) = &item.doc {
		write_doc(out, doc, indent + 2);
	}
	if let Some(parent) = &item.parent {
		push_line(out, &format!("{pad}  extends: {parent}"));
	}
	if !item.interfaces.is_empty() {
		push_line(out, &format!("{pad}  implements: {}", item.interfaces.join(", ")));
	}
	if !item.mixins.is_empty() {
		push_line(out, &format!("{pad}  uses: {}", item.mixins.join(", ")));
	}
	for decoration in &item.decorations {
		push_line(out, &format!("{pad}  {}", decoration_text(decoration)));
	}

	if !item.constants.is_empty() {
		push_line(out, &format!("{pad}  constants:"));
		for (name, value) in &item.constants {
			push_line(out, &format!("{pad}    {name} = {value}"));
		}
	}
	if !item.cases.is_empty() {
		push_line(out, &format!("{pad}  cases:"));
		for (name, value) in &item.cases {
			push_line(out, &format!("{pad}    {name} = {value}"));
		}
	}

	if !item.fields.is_empty() {
		push_line(out, &format!("{pad}  fields:"));
		for field in &item.fields {
			write_field(out, field, &item.type_name, indent + 4, options);
		}
	}
	if !item.behaviors.is_empty() {
		push_line(out, &format!("{pad}  behaviors:"));
		for behavior in &item.behaviors {
			write_behavior(out, behavior, &item.type_name, indent + 4);
		}
	}
}

fn write_doc(out: &mut String, doc: &str, indent: usize) {
	let pad = " ".repeat(indent);
	for line in doc.lines() {
		push_line(out, &format!("{pad}/// {line}"));
	}
}

fn write_field(out: &mut String, field: &FieldDescriptor, owner: &str, indent: usize, options: PrintOptions) {
	if let Some(doc) = &field.doc {
		write_doc(out, doc, indent);
	}

	let mut label = String::new();
	for decoration in &field.decorations {
		label.push_str(&decoration_text(decoration));
		label.push(' ');
	}
	label.push_str(field.visibility.as_str());
	if field.is_static {
		label.push_str(" static");
	}
	if field.is_readonly {
		label.push_str(" readonly");
	}
	if let Some(ty) = &field.ty {
		label.push(' ');
		label.push_str(ty);
	}
	label.push(' ');
	label.push_str(&field.name);
	if field.has_default {
		label.push_str(" [default]");
	}
	if !field.is_initialized {
		label.push_str(" [uninitialized]");
	}
	if field.declaring_type != owner {
		label.push_str(&format!(" (from {})", field.declaring_type));
	}

	write_labeled(out, &label, &field.value, indent, options);
}

fn write_behavior(out: &mut String, behavior: &BehaviorDescriptor, owner: &str, indent: usize) {
	if let Some(doc) = &behavior.doc {
		write_doc(out, doc, indent);
	}
	let pad = " ".repeat(indent);

	let mut line = pad.clone();
	for decoration in &behavior.decorations {
		line.push_str(&decoration_text(decoration));
		line.push(' ');
	}
	line.push_str(behavior.visibility.as_str());
	for (flag, label) in [(behavior.is_static, " static"), (behavior.is_final, " final"), (behavior.is_abstract, " abstract")] {
		if flag {
			line.push_str(label);
		}
	}

	let params: Vec<String> = behavior.parameters.iter().map(parameter_text).collect();
	line.push_str(&format!(" {}({})", behavior.name, params.join(", ")));
	if let Some(ty) = &behavior.return_type {
		line.push_str(&format!(": {ty}"));
	}

	if behavior.has_tentative_return_type {
		match &behavior.tentative_return_type {
			Some(ty) => line.push_str(&format!(" [tentative {ty}]")),
			None => line.push_str(" [tentative]"),
		}
	}
	if behavior.is_generator {
		line.push_str(" [generator]");
	}
	if behavior.is_override {
		line.push_str(" [override]");
	}
	if let Some(mixin) = &behavior.mixin {
		line.push_str(&format!(" [mixin {mixin}]"));
	}
	if behavior.declaring_type != owner {
		line.push_str(&format!(" (from {})", behavior.declaring_type));
	}
	push_line(out, &line);
}

fn parameter_text(param: &ParameterDescriptor) -> String {
	let mut out = String::new();
	for decoration in &param.decorations {
		out.push_str(&decoration_text(decoration));
		out.push(' ');
	}
	if let Some(ty) = &param.ty {
		out.push_str(ty);
		out.push(' ');
	}
	if param.is_variadic {
		out.push_str("...");
	}
	out.push_str(&param.name);
	if let Some(default) = &param.default {
		out.push_str(&format!(" = {default}"));
	}

	let tags: Vec<&str> = [(param.is_promoted, "promoted"), (param.is_optional, "optional"), (param.allows_null, "nullable")]
		.into_iter()
		.filter_map(|(flag, tag)| flag.then_some(tag))
		.collect();
	if !tags.is_empty() {
		out.push_str(&format!(" [{}]", tags.join(" ")));
	}
	out
}

fn decoration_text(decoration: &DecorationDescriptor) -> String {
	if decoration.args.is_empty() {
		return format!("#[{}]", decoration.name);
	}
	let args: Vec<String> = decoration
		.args
		.iter()
		.map(|(key, value)| match key {
			Key::Int(_) => value.to_string(),
			Key::Str(name) => format!("{name}: {value}"),
		})
		.collect();
	format!("#[{}({})]", decoration.name, args.join(", "))
}
