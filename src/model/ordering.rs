//! Timestamp ordering for change entries

use std::cmp::Ordering;

use super::ChangeEntry;

/// Sort direction for change entries, keyed on the commit timestamp.
///
/// Ties between equal timestamps are left to the stable sort: entries keep
/// their input order, which for lshistory output is per-element history
/// order. No further tie-break is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryDateOrder {
    /// Oldest first
    Increasing,
    /// Newest first
    Decreasing,
}

impl EntryDateOrder {
    /// Compare two entries under this direction.
    pub fn compare(self, a: &ChangeEntry, b: &ChangeEntry) -> Ordering {
        match self {
            Self::Increasing => a.timestamp.cmp(&b.timestamp),
            Self::Decreasing => b.timestamp.cmp(&a.timestamp),
        }
    }

    /// Stable-sort entries in place under this direction.
    pub fn sort(self, entries: &mut [ChangeEntry]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }
}
