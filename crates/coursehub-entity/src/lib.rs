//! # coursehub-entity
//!
//! Domain entity models for Coursehub. Every struct in this crate either
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow` in addition to `Debug`, `Clone`,
//! `Serialize`, and `Deserialize`.
//!
//! The [`membership`] module holds the materialized membership types
//! ([`membership::CourseRoster`], [`membership::GroupIndex`]) that back
//! role predicates with set lookups instead of per-call queries.

pub mod collaboration;
pub mod course;
pub mod group;
pub mod membership;
pub mod user;
