//! The collaboration policy engine.
//!
//! A **policy variant** is a named bundle of five rules, one per
//! [`PolicyAction`]. Rules are plain boolean functions of a collaboration
//! object and an [`EvalContext`]; variants are built by starting from a
//! base variant's rule set and selectively overriding entries, so related
//! variants genuinely share rule values instead of duplicating them.
//!
//! Evaluation never panics and never hides misconfiguration: an unknown
//! variant or action is a `Lookup` error, while a denial is an ordinary
//! `Ok(false)`.

pub mod action;
pub mod context;
pub mod registry;
pub mod variant;
pub mod variants;

pub use action::PolicyAction;
pub use context::EvalContext;
pub use registry::{PolicyRegistry, RegisteredPolicy};
pub use variant::{PolicyVariant, Rule};
