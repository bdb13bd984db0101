//! Products domain module.
//!
//! This crate contains the product catalog record, its partial-update rules,
//! and its validation, implemented purely as deterministic domain logic (no
//! IO, no HTTP, no storage).

pub mod product;

pub use product::{Product, ProductFilter, ProductInit, ProductPatch};
