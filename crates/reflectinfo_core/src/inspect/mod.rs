mod analyze;
mod behaviors;
mod classify;
mod decl;
mod doc;
mod error;
mod fields;
mod image;
mod introspect;
mod params;
mod provider;
mod proxy;
mod registry;
mod snapshot;
#[cfg(test)]
mod test_support;
mod types;
mod value;
mod visited;

/// Analyzer entry points and runtime limits.
pub use analyze::{AnalyzeOptions, Analyzer, dump};
/// Value classification into scalar, collection, and composite paths.
pub use classify::{ValueKind, classify};
/// Type declaration model consumed by metadata providers.
pub use decl::{BehaviorDecl, CaseDecl, Decoration, FieldDecl, ParamDecl, TypeDecl, TypeKind, Visibility};
/// Error and result aliases.
pub use error::{InspectError, Result};
/// Heap image loading.
pub use image::HeapImage;
/// Type-metadata provider interface and resolved member views.
pub use provider::{FieldState, ResolvedBehavior, ResolvedField, TypeMetadata};
/// Call-interception proxy types.
pub use proxy::{AfterHook, BeforeHook, Dispatch, Proxy, Receiver};
/// Registration-based metadata provider.
pub use registry::{NativeFn, Registry};
/// Snapshot tree emitted by analysis.
pub use snapshot::{
	BehaviorDescriptor, CollectionEntry, CollectionNode, CompositeNode, DecorationDescriptor, FieldDescriptor, ParameterDescriptor, RECURSION_SENTINEL_PREFIX,
	ScalarNode, SnapshotNode, UNINITIALIZED,
};
/// Declared type expressions and their canonical signatures.
pub use types::{ANY_TYPE, TypeExpr, format_type};
/// Live runtime value model.
pub use value::{Collection, Key, Literal, Object, ObjectRef, Scalar, Value};
/// Per-call visited identity set.
pub use visited::VisitedSet;
