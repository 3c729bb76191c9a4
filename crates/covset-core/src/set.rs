//! Bounded, hash-deduplicated record set

use crate::config::RecordSetConfig;
use crate::record::Record;
use crate::signal::CollisionSignal;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use tracing::debug;

/// An ordered list of [`Record`]s with unique hashes and an optional bound.
///
/// Insertion order is significant: when the set grows past `max_size` the
/// oldest records are evicted from the front. A `max_size` of 0 disables
/// the bound.
///
/// Mutations never fail on duplicate data. They return a
/// [`CollisionSignal`] describing any duplicates that were resolved; the
/// set always satisfies its invariants afterwards.
///
/// There is no internal locking. Mutations take `&mut self`, so sharing a
/// set across threads requires the caller's own synchronization.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    records: Vec<Record>,
    max_size: usize,
}

impl RecordSet {
    /// Create an empty set. `max_size = 0` means unbounded.
    pub fn new(max_size: usize) -> Self {
        Self {
            records: Vec::new(),
            max_size,
        }
    }

    pub fn from_config(config: &RecordSetConfig) -> Self {
        Self::new(config.max_size)
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order, oldest first
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn get(&self, hash: &str) -> Option<&Record> {
        self.records.iter().rev().find(|r| r.hash == hash)
    }

    pub fn contains_hash(&self, hash: &str) -> bool {
        self.get(hash).is_some()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Discard the current content and replace it with the deduplicated,
    /// bounded form of `records`.
    pub fn replace(&mut self, records: Vec<Record>) -> CollisionSignal {
        self.clean(records)
    }

    /// Append `records` after the current content and deduplicate the
    /// whole sequence. New records shadow old ones with the same hash.
    pub fn merge(&mut self, records: impl IntoIterator<Item = Record>) -> CollisionSignal {
        let mut batch = std::mem::take(&mut self.records);
        batch.extend(records);
        self.clean(batch)
    }

    /// Replace when empty, merge otherwise. This is how decoded batches are
    /// absorbed, so decoding twice accumulates.
    pub fn absorb(&mut self, records: Vec<Record>) -> CollisionSignal {
        if self.records.is_empty() {
            self.replace(records)
        } else {
            self.merge(records)
        }
    }

    /// Append a single record, replacing an existing record with the same
    /// hash.
    ///
    /// Assumes hashes are already unique: the scan runs newest to oldest and
    /// stops at the first match. The returned signal is `HASH_MATCH` when a
    /// record was replaced, plus `VALUE_DIFFERS` if its value changed.
    pub fn append(&mut self, record: Record) -> CollisionSignal {
        let mut signal = CollisionSignal::NONE;

        if let Some(pos) = self.records.iter().rposition(|r| r.hash == record.hash) {
            let existing = self.records.remove(pos);
            signal = existing.matches(&record);
            debug!(
                hash = %record.hash,
                old = existing.value,
                new = record.value,
                "Replacing existing record"
            );
        }

        self.records.push(record);
        self.reduce();
        signal
    }

    /// Deduplicate `batch` keeping the latest instance of each hash, then
    /// apply the bound. The result becomes the new content.
    fn clean(&mut self, batch: Vec<Record>) -> CollisionSignal {
        // Flags are collected newest first.
        let keep: Vec<bool> = {
            let mut seen = HashSet::with_capacity(batch.len());
            batch.iter().rev().map(|r| seen.insert(r.hash.as_str())).collect()
        };

        let mut signal = CollisionSignal::NONE;
        let mut records = Vec::with_capacity(batch.len());
        for (record, keep) in batch.into_iter().zip(keep.into_iter().rev()) {
            if keep {
                records.push(record);
            } else {
                debug!(hash = %record.hash, value = record.value, "Dropping shadowed record");
                signal |= CollisionSignal::HASH_MATCH;
            }
        }

        self.records = records;
        self.reduce();
        signal
    }

    /// Evict from the front until the bound holds
    fn reduce(&mut self) {
        if self.max_size == 0 || self.records.len() <= self.max_size {
            return;
        }

        let excess = self.records.len() - self.max_size;
        self.records.drain(..excess);
        debug!(evicted = excess, max_size = self.max_size, "Trimmed oldest records");
    }
}

impl Default for RecordSet {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Serialize for RecordSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
