//! Materialized membership types.
//!
//! Role predicates are evaluated many times per request, so membership is
//! materialized once into set-indexed snapshots ([`CourseRoster`],
//! [`GroupIndex`]) instead of re-queried per predicate call.

pub mod index;
pub mod roster;

pub use index::GroupIndex;
pub use roster::CourseRoster;
