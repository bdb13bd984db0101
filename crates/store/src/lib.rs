//! In-memory repository backend.
//!
//! Intended for tests and dev hosts. Real deployments plug their own backend
//! into the `Repository` contract from `invoicer-core`.

pub mod memory;

pub use memory::MemoryRepository;
