// Record store - A poller's published snapshot, swapped atomically
use crate::domain::record::Record;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// An immutable set of records together with the cycle that produced it.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub generation: u64,
    pub records: Vec<Record>,
}

impl Snapshot {
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Single-writer, multi-reader holder for the latest snapshot.
///
/// Only the owning poller (or its supervisor while the poller is down) calls
/// [`RecordStore::replace`]. Readers never block the writer and always see a
/// complete snapshot, either the old one or the new one.
#[derive(Debug)]
pub struct RecordStore {
    current: ArcSwap<Snapshot>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(Snapshot::default()),
        }
    }

    /// Publish `records` (already sorted) as the new snapshot and return its generation.
    pub fn replace(&self, records: Vec<Record>) -> u64 {
        let generation = self.current.load().generation + 1;
        self.current.store(Arc::new(Snapshot {
            generation,
            records,
        }));
        generation
    }

    /// Publish an empty snapshot; the generation keeps counting up.
    pub fn reset(&self) -> u64 {
        self.replace(Vec::new())
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
