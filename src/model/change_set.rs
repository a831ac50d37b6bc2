//! Change set data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChangeEntry, EntryDateOrder};

/// Identifies the build a change set belongs to.
///
/// The host build server owns the real build record; this is the small
/// immutable slice of it the adapter needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRef {
    /// Project (job) name
    pub project: String,

    /// Build number within the project
    pub number: u64,
}

impl BuildRef {
    pub fn new(project: impl Into<String>, number: u64) -> Self {
        Self {
            project: project.into(),
            number,
        }
    }
}

/// The ordered change entries belonging to one build attempt.
///
/// Entries are sorted by the constructor, so a finalized set always
/// satisfies the configured ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    build: BuildRef,
    entries: Vec<ChangeEntry>,
}

impl ChangeSet {
    /// Create a set bound to `build`, sorting `entries` under `order`.
    pub fn new(build: BuildRef, mut entries: Vec<ChangeEntry>, order: EntryDateOrder) -> Self {
        order.sort(&mut entries);
        Self { build, entries }
    }

    pub fn build(&self) -> &BuildRef {
        &self.build
    }

    pub fn entries(&self) -> &[ChangeEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent commit timestamp among the entries.
    ///
    /// `None` for an empty set. Callers must treat that as "no usable
    /// revision state", never as epoch zero.
    pub fn latest_commit_date(&self) -> Option<DateTime<Utc>> {
        self.entries.iter().map(|e| e.timestamp).max()
    }
}
