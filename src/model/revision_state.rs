//! Revision state data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of the last known remote progress for a project.
///
/// Wraps the latest commit timestamp recorded when the previous build's
/// change set was finalized. The next polling round compares the remote
/// state against this value, strictly: entries at or before it have
/// already been seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RevisionState {
    built_time: DateTime<Utc>,
}

impl RevisionState {
    pub fn new(built_time: DateTime<Utc>) -> Self {
        Self { built_time }
    }

    pub fn built_time(&self) -> DateTime<Utc> {
        self.built_time
    }
}
