//! Record identifiers and the injectable generator capability.

use core::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a domain record.
///
/// Assigned once at creation and immutable thereafter; globally unique across
/// all record types (128-bit identifier, collision probability negligible).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for RecordId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<RecordId> for Uuid {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl FromStr for RecordId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid =
            Uuid::from_str(s).map_err(|e| DomainError::invalid_id(format!("RecordId: {e}")))?;
        Ok(Self(uuid))
    }
}

/// Identifier generation capability.
///
/// Isolated behind a trait so hosts inject real randomness and tests inject
/// deterministic sequences.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> RecordId;
}

/// Production generator.
///
/// Uses UUIDv7 (time-ordered). Prefer [`SequentialIdGenerator`] in tests for
/// determinism.
#[derive(Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> RecordId {
        RecordId(Uuid::now_v7())
    }
}

/// Deterministic generator for tests: yields 1, 2, 3, ... encoded as UUIDs.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self) -> RecordId {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        RecordId(Uuid::from_u128(n as u128))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_round_trips_through_display_and_from_str() {
        let id = UuidGenerator.generate();
        let parsed: RecordId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn invalid_record_id_string_is_rejected() {
        let err = "not-a-uuid".parse::<RecordId>().unwrap_err();
        match err {
            DomainError::InvalidId(_) => {}
            other => panic!("expected InvalidId, got {other:?}"),
        }
    }

    #[test]
    fn sequential_generator_is_deterministic() {
        let ids = SequentialIdGenerator::new();
        let a = ids.generate();
        let b = ids.generate();
        assert_ne!(a, b);
        assert_eq!(a, RecordId::from_uuid(Uuid::from_u128(1)));
        assert_eq!(b, RecordId::from_uuid(Uuid::from_u128(2)));
    }
}
