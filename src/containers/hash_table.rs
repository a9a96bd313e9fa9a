//! Chained hash table with a fixed number of buckets
//!
//! Keys are integers and the hash is `key mod bucket_count` (Euclidean, so
//! negative keys land in a valid bucket). Collisions append to the bucket's
//! chain; putting an existing key overwrites its value in place.

use crate::checkpoint::{Checkpoint, Trace};
use crate::engine::{transition, Engine, EngineState, Progress};
use crate::errors::{VisualizerError, VisualizerResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashTable {
    buckets: Vec<Vec<(i64, i64)>>,
}

impl HashTable {
    /// Create a table with `bucket_count` empty buckets (must be non-zero)
    pub fn new(bucket_count: usize) -> VisualizerResult<Self> {
        if bucket_count == 0 {
            return Err(VisualizerError::invalid_input(
                "hash table",
                "bucket count must be at least 1",
            ));
        }
        Ok(HashTable {
            buckets: vec![Vec::new(); bucket_count],
        })
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Bucket a key hashes to
    pub fn bucket_of(&self, key: i64) -> usize {
        key.rem_euclid(self.buckets.len() as i64) as usize
    }

    pub fn bucket(&self, index: usize) -> Option<&[(i64, i64)]> {
        self.buckets.get(index).map(Vec::as_slice)
    }

    /// Total number of stored entries
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Non-animated lookup
    pub fn lookup(&self, key: i64) -> Option<i64> {
        self.buckets[self.bucket_of(key)]
            .iter()
            .find(|(k, _)| *k == key)
            .map(|&(_, v)| v)
    }

    pub fn put(&mut self, key: i64, value: i64) -> TablePut<'_> {
        let bucket = self.bucket_of(key);
        TablePut {
            table: self,
            key,
            value,
            bucket,
            slot: 0,
            phase: Phase::Hash,
            replaced: None,
            state: EngineState::Idle,
        }
    }

    pub fn get(&self, key: i64) -> TableGet<'_> {
        TableGet {
            table: self,
            key,
            bucket: self.bucket_of(key),
            slot: 0,
            phase: Phase::Hash,
            found: None,
            state: EngineState::Idle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Hash,
    Scan,
    Done,
}

fn explain_hash(trace: &mut Trace, key: i64, bucket: usize, buckets: usize) {
    trace.checkpoint(Checkpoint::ColorsReset);
    trace.explain(format!(
        "hash({}) = {} mod {} = {}",
        key, key, buckets, bucket
    ));
    trace.checkpoint(Checkpoint::BucketHighlighted { bucket, buckets });
}

/// Stepwise insert-or-update returned by [`HashTable::put`]
pub struct TablePut<'a> {
    table: &'a mut HashTable,
    key: i64,
    value: i64,
    bucket: usize,
    slot: usize,
    phase: Phase,
    replaced: Option<i64>,
    state: EngineState,
}

impl TablePut<'_> {
    /// Previous value when the key was already present
    pub fn replaced(&self) -> Option<i64> {
        self.replaced
    }

    fn store(&mut self, trace: &mut Trace) {
        let (key, value, bucket) = (self.key, self.value, self.bucket);
        let chain = &mut self.table.buckets[bucket];
        match chain.get_mut(self.slot) {
            Some(entry) => {
                self.replaced = Some(entry.1);
                entry.1 = value;
                trace.explain(format!(
                    "Key {} already lives in bucket {}, updating its value to {}.",
                    key, bucket, value
                ));
            }
            None => {
                chain.push((key, value));
                if chain.len() > 1 {
                    trace.explain(format!(
                        "Collision: appending {} -> {} to bucket {}.",
                        key, value, bucket
                    ));
                } else {
                    trace.explain(format!("Storing {} -> {} in bucket {}.", key, value, bucket));
                }
            }
        }
        trace.checkpoint(Checkpoint::BucketUpdated {
            bucket,
            entries: chain.clone(),
        });
    }
}

impl Engine for TablePut<'_> {
    fn name(&self) -> &'static str {
        "hash table put"
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn step(&mut self, trace: &mut Trace) -> Progress {
        match self.phase {
            Phase::Hash => {
                transition(self.name(), &mut self.state, EngineState::Running);
                explain_hash(trace, self.key, self.bucket, self.table.bucket_count());
                self.phase = Phase::Scan;
            }
            Phase::Scan => {
                let hit = self.table.buckets[self.bucket]
                    .get(self.slot)
                    .map(|&(k, _)| k == self.key);
                match hit {
                    Some(true) => {
                        trace.checkpoint(Checkpoint::EntryVisited {
                            bucket: self.bucket,
                            slot: self.slot,
                        });
                        self.store(trace);
                        self.phase = Phase::Done;
                    }
                    Some(false) => {
                        trace.checkpoint(Checkpoint::EntryVisited {
                            bucket: self.bucket,
                            slot: self.slot,
                        });
                        self.slot += 1;
                    }
                    None => {
                        self.store(trace);
                        self.phase = Phase::Done;
                    }
                }
            }
            Phase::Done => {}
        }

        if self.phase == Phase::Done {
            transition(self.name(), &mut self.state, EngineState::Idle);
            Progress::Complete
        } else {
            Progress::Pending
        }
    }
}

/// Stepwise lookup returned by [`HashTable::get`]
pub struct TableGet<'a> {
    table: &'a HashTable,
    key: i64,
    bucket: usize,
    slot: usize,
    phase: Phase,
    found: Option<i64>,
    state: EngineState,
}

impl TableGet<'_> {
    pub fn found(&self) -> Option<i64> {
        self.found
    }
}

impl Engine for TableGet<'_> {
    fn name(&self) -> &'static str {
        "hash table get"
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn step(&mut self, trace: &mut Trace) -> Progress {
        match self.phase {
            Phase::Hash => {
                transition(self.name(), &mut self.state, EngineState::Running);
                explain_hash(trace, self.key, self.bucket, self.table.bucket_count());
                self.phase = Phase::Scan;
            }
            Phase::Scan => match self.table.buckets[self.bucket].get(self.slot) {
                Some(&(k, v)) => {
                    trace.checkpoint(Checkpoint::EntryVisited {
                        bucket: self.bucket,
                        slot: self.slot,
                    });
                    if k == self.key {
                        self.found = Some(v);
                        trace.explain(format!("Found {} -> {}.", k, v));
                        self.phase = Phase::Done;
                    } else {
                        self.slot += 1;
                    }
                }
                None => {
                    trace.explain(format!(
                        "Bucket {} holds no entry for key {}.",
                        self.bucket, self.key
                    ));
                    self.phase = Phase::Done;
                }
            },
            Phase::Done => {}
        }

        if self.phase == Phase::Done {
            transition(self.name(), &mut self.state, EngineState::Idle);
            Progress::Complete
        } else {
            Progress::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_buckets_rejected() {
        assert!(HashTable::new(0).is_err());
    }

    #[test]
    fn test_negative_keys_hash_into_range() {
        let table = HashTable::new(8).unwrap();
        assert_eq!(table.bucket_of(-1), 7);
        assert_eq!(table.bucket_of(17), 1);
    }

    #[test]
    fn test_collision_appends_and_update_replaces() {
        let mut table = HashTable::new(4).unwrap();
        table.put(1, 10).run_to_end();
        table.put(5, 50).run_to_end();
        assert_eq!(table.bucket(1), Some(&[(1, 10), (5, 50)][..]));

        let mut put = table.put(5, 55);
        let trace = put.run_to_end();
        assert_eq!(put.replaced(), Some(50));
        let visited = trace
            .checkpoints()
            .filter(|c| matches!(c, Checkpoint::EntryVisited { .. }))
            .count();
        assert_eq!(visited, 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup(5), Some(55));
    }

    #[test]
    fn test_get_missing_key() {
        let mut table = HashTable::new(3).unwrap();
        table.put(3, 1).run_to_end();
        let mut get = table.get(6);
        get.run_to_end();
        assert_eq!(get.found(), None);
        assert_eq!(get.state(), EngineState::Idle);
    }
}
