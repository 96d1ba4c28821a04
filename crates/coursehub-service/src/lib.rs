//! # coursehub-service
//!
//! Business logic service layer for Coursehub. Each service orchestrates
//! repositories and the policy/password machinery to implement
//! application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod course;
pub mod membership;
pub mod provisioning;

pub use course::CourseService;
pub use membership::MembershipService;
pub use provisioning::{
    CourseStringResolver, ProvisionEntry, ProvisionReport, ProvisionTarget, ProvisioningService,
    ResolvedGroups,
};
