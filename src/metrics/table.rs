//! Metrics Table - epoch-keyed, epoch-ordered storage for log records
//!
//! The table is the hand-off point between the parser and the renderer.

use super::LogRecord;

/// Epoch-sorted collection of [`LogRecord`]s with at most one record per epoch.
///
/// ## Ordering
///
/// Records are kept sorted strictly ascending by epoch at all times, so
/// column accessors return series ready for plotting.
///
/// ## Duplicates
///
/// Inserting a record for an epoch already present replaces the stored
/// record. Feeding records in file order therefore keeps the last
/// occurrence of each epoch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsTable {
    records: Vec<LogRecord>,
}

impl MetricsTable {
    /// Create a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any record with the same epoch.
    ///
    /// Returns the replaced record, if there was one.
    pub fn insert(&mut self, record: LogRecord) -> Option<LogRecord> {
        match self
            .records
            .binary_search_by_key(&record.epoch(), LogRecord::epoch)
        {
            Ok(idx) => Some(std::mem::replace(&mut self.records[idx], record)),
            Err(idx) => {
                self.records.insert(idx, record);
                None
            }
        }
    }

    /// Number of distinct epochs in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the table has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, ascending by epoch.
    #[must_use]
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Look up the record for one epoch.
    #[must_use]
    pub fn get(&self, epoch: u64) -> Option<&LogRecord> {
        self.records
            .binary_search_by_key(&epoch, LogRecord::epoch)
            .ok()
            .map(|idx| &self.records[idx])
    }

    /// Record with the lowest epoch.
    #[must_use]
    pub fn first(&self) -> Option<&LogRecord> {
        self.records.first()
    }

    /// Record with the highest epoch.
    #[must_use]
    pub fn last(&self) -> Option<&LogRecord> {
        self.records.last()
    }

    /// Record with the highest Dice coefficient (earliest epoch on ties).
    #[must_use]
    pub fn best_dice(&self) -> Option<&LogRecord> {
        self.records.iter().reduce(|best, r| {
            if r.dice() > best.dice() {
                r
            } else {
                best
            }
        })
    }

    /// Epoch column.
    #[must_use]
    pub fn epochs(&self) -> Vec<u64> {
        self.records.iter().map(LogRecord::epoch).collect()
    }

    /// Training loss column.
    #[must_use]
    pub fn train_losses(&self) -> Vec<f64> {
        self.records.iter().map(LogRecord::train_loss).collect()
    }

    /// Learning rate column.
    #[must_use]
    pub fn learning_rates(&self) -> Vec<f64> {
        self.records.iter().map(LogRecord::lr).collect()
    }

    /// Dice coefficient column.
    #[must_use]
    pub fn dice_scores(&self) -> Vec<f64> {
        self.records.iter().map(LogRecord::dice).collect()
    }
}

impl FromIterator<LogRecord> for MetricsTable {
    fn from_iter<I: IntoIterator<Item = LogRecord>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl Extend<LogRecord> for MetricsTable {
    fn extend<I: IntoIterator<Item = LogRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl<'a> IntoIterator for &'a MetricsTable {
    type Item = &'a LogRecord;
    type IntoIter = std::slice::Iter<'a, LogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
