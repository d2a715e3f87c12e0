//! Street network storage.
//!
//! Streets live in an arena indexed by [`StreetId`]. Each intersection keeps an
//! ordered adjacency list of arena slots; removing a street only flags its slot
//! as consumed, so adjacency lists are never reshuffled while a walk consumes them.

mod store;
mod street;

pub use store::{Adjacent, StreetGraph};
pub use street::Street;

/// Intersection identifier.
pub type VertexId = i64;

/// Index of a street in a [`StreetGraph`] arena.
pub type StreetId = usize;
