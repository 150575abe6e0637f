use std::collections::VecDeque;

use hilo_core::{Label, ResultRecord};

/// A bounded history of result records, most recent first.
///
/// Pushing at capacity evicts the oldest record. Eviction is purely by age.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    records: VecDeque<ResultRecord>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Create an empty buffer holding at most `capacity` records (at least 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert a record at the front. Returns the evicted record, if any.
    pub fn push_front(&mut self, record: ResultRecord) -> Option<ResultRecord> {
        self.records.push_front(record);
        if self.records.len() > self.capacity {
            self.records.pop_back()
        } else {
            None
        }
    }

    /// The most recent record.
    pub fn latest(&self) -> Option<&ResultRecord> {
        self.records.front()
    }

    /// Iterate most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &ResultRecord> {
        self.records.iter()
    }

    /// Observed labels, most recent first.
    pub fn labels_recent_first(&self) -> Vec<Label> {
        self.records.iter().map(|r| r.label).collect()
    }

    /// Copy the records out, most recent first.
    pub fn to_vec(&self) -> Vec<ResultRecord> {
        self.records.iter().cloned().collect()
    }

    /// Maximum number of records.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
