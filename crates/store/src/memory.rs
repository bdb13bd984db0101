use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use invoicer_core::{
    Clock, DomainError, DomainRecord, DomainResult, Filterable, IdGenerator, ListQuery, RecordId,
    Repository, RecordSeed, apply_lifecycle_defaults,
};

/// In-memory record store.
///
/// Intended for tests/dev. Not optimized for performance. Insertion order is
/// preserved so listings are deterministic before any shaping is applied.
pub struct MemoryRepository<R> {
    records: RwLock<State<R>>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

struct State<R> {
    by_id: HashMap<RecordId, R>,
    order: Vec<RecordId>,
}

impl<R> Default for State<R> {
    fn default() -> Self {
        Self {
            by_id: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<R> MemoryRepository<R> {
    pub fn new(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            records: RwLock::new(State::default()),
            ids,
            clock,
        }
    }

    fn read(&self) -> DomainResult<std::sync::RwLockReadGuard<'_, State<R>>> {
        self.records
            .read()
            .map_err(|_| DomainError::storage("lock poisoned"))
    }

    fn write(&self) -> DomainResult<std::sync::RwLockWriteGuard<'_, State<R>>> {
        self.records
            .write()
            .map_err(|_| DomainError::storage("lock poisoned"))
    }
}

impl<R> Repository<R> for MemoryRepository<R>
where
    R: DomainRecord + Filterable + Clone + Send + Sync,
    R::Filter: Send + Sync,
{
    type Filter = R::Filter;

    fn create(&self) -> DomainResult<R> {
        let meta =
            apply_lifecycle_defaults(RecordSeed::default(), self.ids.as_ref(), self.clock.as_ref())?;
        Ok(R::with_meta(meta))
    }

    fn get_by_id(&self, id: RecordId) -> DomainResult<Option<R>> {
        Ok(self.read()?.by_id.get(&id).cloned())
    }

    fn list_by_query(&self, query: &ListQuery<Self::Filter>) -> DomainResult<Vec<R>> {
        let state = self.read()?;
        let matching = state
            .order
            .iter()
            .filter_map(|id| state.by_id.get(id))
            .filter(|record| match &query.filter {
                Some(filter) => record.matches(filter),
                None => true,
            });

        Ok(matching
            .skip(query.skip.unwrap_or(0))
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    fn save(&self, record: &R) -> DomainResult<()> {
        let mut state = self.write()?;
        let id = record.id();
        if state.by_id.insert(id, record.clone()).is_none() {
            state.order.push(id);
        }
        Ok(())
    }

    fn delete(&self, id: RecordId) -> DomainResult<()> {
        let mut state = self.write()?;
        // Benign no-op when the id is already absent.
        if state.by_id.remove(&id).is_some() {
            state.order.retain(|existing| *existing != id);
        }
        Ok(())
    }
}
