//! Change entry data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::FileElement;

/// One change event pulled from lshistory: a commit-like unit of work.
///
/// Entries are immutable once parsed; the timestamp is the comparison key
/// used everywhere else in the crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry {
    /// When the change was committed
    pub timestamp: DateTime<Utc>,

    /// User who made the change
    pub author: String,

    /// Elements touched by this change, in lshistory order
    pub files: Vec<FileElement>,

    /// Commit comment (may be empty)
    pub comment: String,
}

impl ChangeEntry {
    pub fn new(
        timestamp: DateTime<Utc>,
        author: impl Into<String>,
        files: Vec<FileElement>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            author: author.into(),
            files,
            comment: comment.into(),
        }
    }

    /// Get a display string for the comment
    pub fn display_comment(&self) -> &str {
        if self.comment.is_empty() {
            "(no comment)"
        } else {
            &self.comment
        }
    }

    /// Paths of all elements touched by this entry
    pub fn affected_paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }
}
