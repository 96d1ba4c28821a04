//! Concrete repository implementations.

pub mod course;
pub mod group;
pub mod user;

pub use course::CourseRepository;
pub use group::GroupRepository;
pub use user::UserRepository;
