//! Bulk user provisioning.
//!
//! A provisioning batch is a newline-delimited text block of
//! `[*]username[:password]` directives. Group resolution happens once per
//! batch before any mutation; the per-line mutations run inside a single
//! database transaction so a mid-batch failure leaves no partial
//! membership changes.

pub mod parser;
pub mod resolver;
pub mod service;

pub use parser::{ProvisionEntry, parse_batch};
pub use resolver::{CourseStringResolver, ResolvedGroups};
pub use service::{ProvisionReport, ProvisionTarget, ProvisioningService};
