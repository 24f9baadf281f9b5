use std::path::PathBuf;

use reflectinfo::inspect::{AnalyzeOptions, Analyzer, HeapImage, Result, SnapshotNode};

use crate::cmd::print::{PrintOptions, render_node};
use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub root: Option<String>,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	#[arg(long)]
	pub json: bool,
	#[arg(long = "max-string")]
	pub max_string: Option<usize>,
	#[arg(long = "max-items")]
	pub max_items: Option<usize>,
	#[arg(long)]
	pub overview: bool,
}

/// Analyze one heap image root and print its snapshot.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		root,
		max_depth,
		json,
		max_string,
		max_items,
		overview,
	} = args;

	let image = HeapImage::open(&path)?;
	let (root_name, value) = match root.as_deref() {
		Some(name) => (name, image.root(name)?),
		None => image.first_root()?,
	};

	let mut analyze = AnalyzeOptions::default();
	if let Some(max_depth) = max_depth {
		analyze.max_depth = max_depth;
	}
	tracing::info!(path = %path.display(), root = root_name, max_depth = analyze.max_depth, "analyzing root");
	let node = Analyzer::new(image.registry(), analyze).analyze(value);
	tracing::debug!(root = root_name, kind = node_kind(&node), "snapshot built");

	if json {
		let payload = ShowJson {
			path: path.display().to_string(),
			root: root_name,
			max_depth: analyze.max_depth,
			node: &node,
		};
		return emit_json(&payload);
	}

	let mut print = if overview { PrintOptions::for_overview() } else { PrintOptions::default() };
	if let Some(max_string) = max_string {
		print.max_string_len = max_string;
	}
	if let Some(max_items) = max_items {
		print.max_collection_items = max_items;
	}

	println!("path: {}", path.display());
	println!("root: {root_name}");
	println!("max_depth: {}", analyze.max_depth);
	println!("value:");
	print!("{}", render_node(&node, print));

	Ok(())
}

fn node_kind(node: &SnapshotNode) -> &'static str {
	match node {
		SnapshotNode::Scalar(_) => "scalar",
		SnapshotNode::Collection(_) => "collection",
		SnapshotNode::Composite(_) => "composite",
	}
}

#[derive(serde::Serialize)]
struct ShowJson<'a> {
	path: String,
	root: &'a str,
	max_depth: u32,
	node: &'a SnapshotNode,
}
