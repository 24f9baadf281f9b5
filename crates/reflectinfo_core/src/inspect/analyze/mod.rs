use crate::inspect::{CollectionEntry, CollectionNode, SnapshotNode, TypeMetadata, Value, ValueKind, VisitedSet, classify};

/// Runtime limits for snapshot analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeOptions {
	/// Nesting depth at which composite objects are replaced by the sentinel.
	pub max_depth: u32,
}

impl Default for AnalyzeOptions {
	fn default() -> Self {
		Self { max_depth: 5 }
	}
}

impl AnalyzeOptions {
	/// Shallow preset used by [`dump`].
	pub fn for_quick_dump() -> Self {
		Self { max_depth: 3 }
	}
}

/// Recursive value walker producing [`SnapshotNode`] trees.
///
/// Holds one visited set, reset at every [`Analyzer::analyze`] call. The `&mut self` receiver keeps
/// calls on one instance from overlapping.
pub struct Analyzer<'p, P: TypeMetadata + ?Sized> {
	pub(crate) provider: &'p P,
	options: AnalyzeOptions,
	visited: VisitedSet,
}

impl<'p, P: TypeMetadata + ?Sized> Analyzer<'p, P> {
	/// Create an analyzer over a metadata provider.
	pub fn new(provider: &'p P, options: AnalyzeOptions) -> Self {
		Self {
			provider,
			options,
			visited: VisitedSet::new(),
		}
	}

	/// Options fixed at construction.
	pub fn options(&self) -> AnalyzeOptions {
		self.options
	}

	/// Analyze one value. The root sits at depth 0.
	pub fn analyze(&mut self, value: &Value) -> SnapshotNode {
		self.visited.clear();
		self.process_value(value, 0)
	}

	pub(crate) fn process_value(&mut self, value: &Value, depth: u32) -> SnapshotNode {
		match classify(value) {
			ValueKind::Composite(object) => {
				let identity = object.identity();
				if self.visited.contains(identity) || depth >= self.options.max_depth {
					tracing::debug!(type_name = object.type_name(), depth, max_depth = self.options.max_depth, "object replaced by sentinel");
					return SnapshotNode::recursion_sentinel(object.type_name());
				}
				self.visited.insert(identity);
				tracing::trace!(type_name = object.type_name(), depth, "expanding object");
				SnapshotNode::Composite(Box::new(self.introspect_object(object, depth)))
			}
			ValueKind::Collection(items) => SnapshotNode::Collection(CollectionNode {
				entries: items
					.iter()
					.map(|(key, item)| CollectionEntry {
						key: key.clone(),
						value: self.process_value(item, depth + 1),
					})
					.collect(),
			}),
			ValueKind::Scalar(scalar) => SnapshotNode::scalar(scalar),
		}
	}
}

/// Analyze a value with a fresh analyzer and [`AnalyzeOptions::for_quick_dump`].
pub fn dump<P: TypeMetadata + ?Sized>(provider: &P, value: &Value) -> SnapshotNode {
	Analyzer::new(provider, AnalyzeOptions::for_quick_dump()).analyze(value)
}

#[cfg(test)]
mod tests;
