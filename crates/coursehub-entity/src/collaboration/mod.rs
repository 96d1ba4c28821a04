//! Collaboration object entity (external, consumed read-only).

pub mod model;

pub use model::Collaboration;
