//! Repository contract: the persistence-facing interface the domain depends
//! on but does not implement.
//!
//! A record's life across this contract:
//!
//! ```text
//! non-existent → created (in memory) → persisted (after save) → [updated ⟲] → deleted
//! ```
//!
//! The contract is synchronous; async transport, retries, and transactions
//! are concerns of the backend and its host, not of the domain.

use crate::error::DomainResult;
use crate::id::RecordId;
use crate::record::DomainRecord;

/// Structural listing query. `filter` is matched by the backend; `skip` and
/// `limit` paginate the backend's result, in backend order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery<F> {
    pub filter: Option<F>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

impl<F> ListQuery<F> {
    pub fn filtered(filter: F) -> Self {
        Self {
            filter: Some(filter),
            skip: None,
            limit: None,
        }
    }
}

/// Structural filter matching, implemented per record type.
pub trait Filterable {
    type Filter;

    fn matches(&self, filter: &Self::Filter) -> bool;
}

/// Persistence contract for one record type.
pub trait Repository<R: DomainRecord>: Send + Sync {
    type Filter;

    /// New blank record with identity/timestamp fields populated, not yet
    /// persisted. Callers merge fields via the entity's `update`, then `save`.
    fn create(&self) -> DomainResult<R>;

    /// Plain absence is `Ok(None)`, never an error.
    fn get_by_id(&self, id: RecordId) -> DomainResult<Option<R>>;

    /// Records matching the structural filter, paginated via skip/limit.
    fn list_by_query(&self, query: &ListQuery<Self::Filter>) -> DomainResult<Vec<R>>;

    /// Persist the record's current in-memory state. Idempotent for an
    /// unchanged record.
    fn save(&self, record: &R) -> DomainResult<()>;

    /// Remove the record. Benign no-op when the id is already absent; callers
    /// that need a `NotFound` surface fetch the record first.
    fn delete(&self, id: RecordId) -> DomainResult<()>;
}
