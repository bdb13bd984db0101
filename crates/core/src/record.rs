//! Record identity & timestamp contract.
//!
//! Every domain record (customer, product, invoice) shares the same lifecycle:
//! an `id` assigned once at creation, a `created_at` set once, and an
//! `updated_at` rewritten on every successful partial update. The shared
//! behavior lives here as a capability trait plus a free function reused by
//! each entity's constructor — no base-class hierarchy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{DomainError, DomainResult};
use crate::id::{IdGenerator, RecordId};

/// Identity and timestamp fields carried by every domain record.
///
/// Invariants: `id` never changes across updates; `created_at` is never
/// mutated; `updated_at >= created_at` always.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional identity fields accepted by record constructors.
///
/// An empty seed is the "new record" path; a fully populated seed is the
/// "rehydrate from storage" path. Partially populated seeds are legal: any
/// absent field is defaulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordSeed {
    pub id: Option<RecordId>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fill in any identity/timestamp fields the seed left absent.
///
/// Guarantees: the returned meta has a non-empty `id`, and when both
/// timestamps were absent, `created_at == updated_at`. A seed carrying
/// `updated_at < created_at` is rejected.
pub fn apply_lifecycle_defaults(
    seed: RecordSeed,
    ids: &dyn IdGenerator,
    clock: &dyn Clock,
) -> DomainResult<RecordMeta> {
    let id = seed.id.unwrap_or_else(|| ids.generate());
    let created_at = seed.created_at.unwrap_or_else(|| clock.now());
    let updated_at = seed.updated_at.unwrap_or(created_at);

    if updated_at < created_at {
        return Err(DomainError::invariant(format!(
            "updated_at ({updated_at}) precedes created_at ({created_at})"
        )));
    }

    Ok(RecordMeta {
        id,
        created_at,
        updated_at,
    })
}

/// Capability shared by every domain record: identity plus timestamp lifecycle.
pub trait DomainRecord {
    /// Lifecycle fields, read-only.
    fn meta(&self) -> &RecordMeta;

    /// Lifecycle fields, mutable (used by `touch`; entities never rewrite
    /// `id` or `created_at` through this).
    fn meta_mut(&mut self) -> &mut RecordMeta;

    /// Blank record carrying the given lifecycle fields, all business fields
    /// at their defaults. Used by `Repository::create`.
    fn with_meta(meta: RecordMeta) -> Self
    where
        Self: Sized;

    fn id(&self) -> RecordId {
        self.meta().id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.meta().created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.meta().updated_at
    }

    /// Rewrite `updated_at`. Called by every entity's `update`, even when the
    /// patch changed no visible field.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.meta_mut().updated_at = now;
    }
}
