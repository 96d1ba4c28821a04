//! Course entity and slug derivation.

pub mod model;
pub mod slug;

pub use model::{Course, CourseListing, CreateCourse};
pub use slug::derive_slug;
