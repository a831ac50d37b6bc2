//! Common test utilities for integration tests.
//!
//! Provides an in-memory history fetcher and a recording changelog sink so
//! engine scenarios run without a cleartool installation.
//!
//! Note: Each integration test file compiles as a separate crate, so not
//! all helpers are used in every test file. We suppress dead_code warnings
//! at the module level.

#![allow(dead_code)]

use std::cell::RefCell;

use chrono::{DateTime, TimeZone, Utc};

use clearpoll::changelog::{ChangelogError, ChangelogSink};
use clearpoll::cleartool::ClearToolError;
use clearpoll::model::{ChangeEntry, ChangeSet, FileElement};
use clearpoll::scm::HistoryFetcher;

/// In-memory fetcher with canned history.
///
/// Applies the same strictly-after filtering the real executor does, and
/// records the since bound of every call for assertions.
pub struct FakeFetcher {
    entries: Vec<ChangeEntry>,
    view_tags: Vec<String>,
    fail: bool,
    pub seen_since: RefCell<Vec<Option<DateTime<Utc>>>>,
}

impl FakeFetcher {
    pub fn with_entries(entries: Vec<ChangeEntry>) -> Self {
        Self {
            entries,
            view_tags: vec![],
            fail: false,
            seen_since: RefCell::new(vec![]),
        }
    }

    pub fn empty() -> Self {
        Self::with_entries(vec![])
    }

    pub fn failing() -> Self {
        Self {
            entries: vec![],
            view_tags: vec![],
            fail: true,
            seen_since: RefCell::new(vec![]),
        }
    }

    pub fn with_view_tags(mut self, tags: &[&str]) -> Self {
        self.view_tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    fn filtered(&self, since: Option<DateTime<Utc>>) -> Vec<ChangeEntry> {
        self.entries
            .iter()
            .filter(|e| since.is_none_or(|bound| e.timestamp > bound))
            .cloned()
            .collect()
    }
}

impl HistoryFetcher for FakeFetcher {
    fn latest_change_timestamp(
        &self,
        _load_rules: &[String],
        since: Option<DateTime<Utc>>,
    ) -> Result<Option<DateTime<Utc>>, ClearToolError> {
        if self.fail {
            return Err(ClearToolError::ClearToolNotFound);
        }
        self.seen_since.borrow_mut().push(since);
        Ok(self.filtered(since).iter().map(|e| e.timestamp).max())
    }

    fn list_history(
        &self,
        _load_rules: &[String],
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<ChangeEntry>, ClearToolError> {
        if self.fail {
            return Err(ClearToolError::ClearToolNotFound);
        }
        self.seen_since.borrow_mut().push(since);
        Ok(self.filtered(since))
    }

    fn view_exists(&self, tag: &str) -> Result<bool, ClearToolError> {
        if self.fail {
            return Err(ClearToolError::ClearToolNotFound);
        }
        Ok(self.view_tags.iter().any(|t| t == tag))
    }
}

/// Sink that keeps the written set in memory, optionally failing.
#[derive(Default)]
pub struct RecordingSink {
    pub written: Option<ChangeSet>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            written: None,
            fail: true,
        }
    }
}

impl ChangelogSink for RecordingSink {
    fn write(&mut self, set: &ChangeSet) -> Result<(), ChangelogError> {
        if self.fail {
            return Err(ChangelogError::Io(std::io::Error::other(
                "sink rejected the changelog",
            )));
        }
        self.written = Some(set.clone());
        Ok(())
    }
}

/// Timestamp helper: 2011-06-03 at the given hour/minute.
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2011, 6, 3, hour, minute, 0).unwrap()
}

/// A minimal entry at the given time.
pub fn entry_at(ts: DateTime<Utc>, author: &str) -> ChangeEntry {
    ChangeEntry::new(
        ts,
        author,
        vec![FileElement::with_version("vobs/app/main.c", "/main/1")],
        "change",
    )
}
