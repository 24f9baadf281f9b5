/// Heap image summary command.
pub mod info;
/// Snapshot text renderer.
pub mod print;
/// Root snapshot command.
pub mod show;
/// Declared type listing command.
pub mod types;
/// Shared command helpers.
pub(crate) mod util;
