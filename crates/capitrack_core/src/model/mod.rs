//! Domain model for capital projects and their budgets.
//!
//! # Responsibility
//! - Define record shapes, creation inputs and update patches.
//! - Own the serialization contract between structured values and flat
//!   storage columns (months as first-of-month dates, lists as JSON text).
//!
//! # Invariants
//! - Cross-field business validation runs on repository write paths, not in
//!   constructors.

pub mod budget;
pub mod money;
pub mod month;
pub mod project;
