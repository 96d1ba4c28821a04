//! Membership materialization and query surface.

pub mod service;

pub use service::MembershipService;
