//! Customers domain module.
//!
//! This crate contains the customer record and its partial-update rules,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage).

pub mod customer;

pub use customer::{Customer, CustomerFilter, CustomerInit, CustomerPatch};
