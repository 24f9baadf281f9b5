//! Public library API for taking bounded, cycle-safe snapshots of live object graphs.

/// Live value model, type metadata, snapshot analysis, and call interception.
pub mod inspect;
