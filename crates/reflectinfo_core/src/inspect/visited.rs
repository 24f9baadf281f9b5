use std::collections::HashSet;

/// Identities of composite objects already expanded during one analysis call.
#[derive(Debug, Default)]
pub struct VisitedSet {
	seen: HashSet<u64>,
}

impl VisitedSet {
	/// Create an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Record an identity. Returns `false` when it was already present.
	pub fn insert(&mut self, identity: u64) -> bool {
		self.seen.insert(identity)
	}

	/// Whether an identity was already recorded.
	pub fn contains(&self, identity: u64) -> bool {
		self.seen.contains(&identity)
	}

	/// Forget all identities.
	pub fn clear(&mut self) {
		self.seen.clear();
	}

	/// Number of recorded identities.
	pub fn len(&self) -> usize {
		self.seen.len()
	}

	/// Whether no identity is recorded.
	pub fn is_empty(&self) -> bool {
		self.seen.is_empty()
	}
}
