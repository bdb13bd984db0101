//! `invoicer-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! record identity and timestamp lifecycle, the domain error model, money
//! formatting, listing/query shaping, and the repository contract every
//! persistence backend implements.

pub mod clock;
pub mod error;
pub mod id;
pub mod money;
pub mod query;
pub mod record;
pub mod repository;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DomainError, DomainResult};
pub use id::{IdGenerator, RecordId, SequentialIdGenerator, UuidGenerator};
pub use query::{Listable, shape_listing};
pub use record::{DomainRecord, RecordMeta, RecordSeed, apply_lifecycle_defaults};
pub use repository::{Filterable, ListQuery, Repository};
