//! RecordStore - in-memory, insertion-ordered CRUD storage for one record type.

use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::{ChangeKind, IdGenerator, Record, RecordChange};
use crate::clock::{Clock, SystemClock};
use crate::error::StoreError;

#[cfg(feature = "emitter")]
use super::ChangeFeed;

/// The authoritative collection for one record type.
///
/// Every mutation swaps in a new collection under the write lock, so a
/// `snapshot` taken earlier never observes a partial write. Clone-friendly
/// via Arc: clones share the collection, id generator and change feed.
pub struct RecordStore<R: Record> {
    records: Arc<RwLock<Arc<Vec<R>>>>,
    ids: Arc<IdGenerator>,
    clock: Arc<dyn Clock>,
    #[cfg(feature = "emitter")]
    changes: ChangeFeed,
}

impl<R: Record> Clone for RecordStore<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            ids: Arc::clone(&self.ids),
            clock: Arc::clone(&self.clock),
            #[cfg(feature = "emitter")]
            changes: self.changes.clone(),
        }
    }
}

impl<R: Record> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<R: Record> RecordStore<R> {
    /// Create a store seeded with `seed`, using the system clock.
    pub fn new(seed: Vec<R>) -> Self {
        Self::with_clock(seed, Arc::new(SystemClock))
    }

    /// Create a store seeded with `seed` that reads dates and times from `clock`.
    pub fn with_clock(seed: Vec<R>, clock: Arc<dyn Clock>) -> Self {
        debug!(collection = R::COLLECTION, seeded = seed.len(), "record store initialized");
        Self {
            records: Arc::new(RwLock::new(Arc::new(seed))),
            ids: Arc::new(IdGenerator::new()),
            clock,
            #[cfg(feature = "emitter")]
            changes: ChangeFeed::new(),
        }
    }

    /// Like `with_clock`, but rejects a seed with duplicate ids or a record
    /// that breaks a field rule.
    pub fn try_with_clock(seed: Vec<R>, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        check_seed(&seed)?;
        Ok(Self::with_clock(seed, clock))
    }

    /// The current date according to this store's clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    fn read(&self, operation: &'static str) -> Result<RwLockReadGuard<'_, Arc<Vec<R>>>, StoreError> {
        self.records
            .read()
            .map_err(|_| StoreError::LockPoisoned(operation))
    }

    fn write(&self, operation: &'static str) -> Result<RwLockWriteGuard<'_, Arc<Vec<R>>>, StoreError> {
        self.records
            .write()
            .map_err(|_| StoreError::LockPoisoned(operation))
    }

    /// Create a record from a draft and append it to the collection.
    ///
    /// Assigns a fresh id and `date_added`. Fails with `ValidationFailed` if
    /// a required field is blank or a field rule is broken.
    pub fn create(&self, draft: R::Draft) -> Result<R, StoreError> {
        if let Err(invalid) = R::check_draft(&draft) {
            warn!(collection = R::COLLECTION, field = invalid.field, reason = %invalid.reason, "create rejected");
            return Err(StoreError::invalid(R::COLLECTION, invalid));
        }

        let mut records = self.write("create")?;
        let id = self
            .ids
            .next(self.clock.now_millis(), records.iter().map(|r| r.id()));
        let record = R::from_draft(id, draft, self.clock.today());

        if let Err(invalid) = record.validate() {
            warn!(collection = R::COLLECTION, field = invalid.field, reason = %invalid.reason, "create rejected");
            return Err(StoreError::invalid(R::COLLECTION, invalid));
        }

        Arc::make_mut(&mut *records).push(record.clone());
        let len = records.len();
        drop(records);

        debug!(collection = R::COLLECTION, id = record.id(), len, "record created");
        self.notify(record.id(), ChangeKind::Created);
        Ok(record)
    }

    /// Merge `patch` into the record with `id`, keeping its position.
    ///
    /// Fails with `NotFound` if no such record exists; the collection is left
    /// untouched.
    pub fn update(&self, id: &str, patch: R::Patch) -> Result<R, StoreError> {
        let mut records = self.write("update")?;
        let Some(position) = records.iter().position(|r| r.id() == id) else {
            warn!(collection = R::COLLECTION, id, "update of missing record");
            return Err(StoreError::not_found(R::COLLECTION, id));
        };

        let mut merged = records[position].clone();
        merged.apply(patch);

        if let Err(invalid) = merged.validate() {
            warn!(collection = R::COLLECTION, id, field = invalid.field, reason = %invalid.reason, "update rejected");
            return Err(StoreError::invalid(R::COLLECTION, invalid));
        }

        Arc::make_mut(&mut *records)[position] = merged.clone();
        drop(records);

        debug!(collection = R::COLLECTION, id, "record updated");
        self.notify(id, ChangeKind::Updated);
        Ok(merged)
    }

    /// Remove the record with `id`. No cascade to other collections.
    ///
    /// Fails with `NotFound` if no such record exists.
    pub fn delete(&self, id: &str) -> Result<R, StoreError> {
        let mut records = self.write("delete")?;
        let Some(position) = records.iter().position(|r| r.id() == id) else {
            warn!(collection = R::COLLECTION, id, "delete of missing record");
            return Err(StoreError::not_found(R::COLLECTION, id));
        };

        let removed = Arc::make_mut(&mut *records).remove(position);
        let len = records.len();
        drop(records);

        debug!(collection = R::COLLECTION, id, len, "record deleted");
        self.notify(id, ChangeKind::Deleted);
        Ok(removed)
    }

    /// The current collection. Cheap: shares the stored vector.
    pub fn snapshot(&self) -> Result<Arc<Vec<R>>, StoreError> {
        Ok(Arc::clone(&*self.read("snapshot")?))
    }

    /// All records, in insertion order.
    pub fn list(&self) -> Result<Vec<R>, StoreError> {
        Ok(self.read("list")?.to_vec())
    }

    /// Get a record by id. Returns None if not found.
    pub fn get(&self, id: &str) -> Result<Option<R>, StoreError> {
        Ok(self.read("get")?.iter().find(|r| r.id() == id).cloned())
    }

    /// Whether a record with `id` exists.
    pub fn contains(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.read("contains")?.iter().any(|r| r.id() == id))
    }

    /// Records matching a predicate, in insertion order.
    pub fn find(&self, predicate: impl Fn(&R) -> bool) -> Result<Vec<R>, StoreError> {
        Ok(self
            .read("find")?
            .iter()
            .filter(|r| predicate(*r))
            .cloned()
            .collect())
    }

    /// The first record matching a predicate.
    pub fn find_one(&self, predicate: impl Fn(&R) -> bool) -> Result<Option<R>, StoreError> {
        Ok(self.read("find_one")?.iter().find(|r| predicate(*r)).cloned())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read("len")?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.read("is_empty")?.is_empty())
    }

    /// Register a listener called after every mutation of this store.
    #[cfg(feature = "emitter")]
    pub fn on_change<F>(&self, listener: F) -> Result<String, StoreError>
    where
        F: Fn(RecordChange) + Send + Sync + 'static,
    {
        self.changes.subscribe(R::COLLECTION, listener)
    }

    /// Remove a listener registered with `on_change`.
    #[cfg(feature = "emitter")]
    pub fn remove_listener(&self, listener_id: &str) -> Result<bool, StoreError> {
        self.changes.unsubscribe(listener_id)
    }

    fn notify(&self, id: &str, kind: ChangeKind) {
        let change = RecordChange {
            collection: R::COLLECTION.to_string(),
            id: id.to_string(),
            kind,
        };
        #[cfg(feature = "emitter")]
        self.changes.publish(change);
        #[cfg(not(feature = "emitter"))]
        let _ = change;
    }
}

/// Seed records must have unique ids and pass `Record::validate`.
fn check_seed<R: Record>(seed: &[R]) -> Result<(), StoreError> {
    let mut seen = HashSet::with_capacity(seed.len());
    for record in seed {
        if !seen.insert(record.id()) {
            warn!(collection = R::COLLECTION, id = record.id(), "seed rejected: duplicate id");
            return Err(StoreError::DuplicateId {
                collection: R::COLLECTION,
                id: record.id().to_string(),
            });
        }
        if let Err(invalid) = record.validate() {
            warn!(collection = R::COLLECTION, id = record.id(), field = invalid.field, reason = %invalid.reason, "seed rejected");
            return Err(StoreError::invalid(R::COLLECTION, invalid));
        }
    }
    Ok(())
}
