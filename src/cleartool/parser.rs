//! cleartool output parser
//!
//! Parses the output of cleartool commands into structured data.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use tracing::{debug, warn};

use super::ClearToolError;
use super::constants::events;
use super::format::{FIELD_SEPARATOR, TIMESTAMP_FORMAT};
use crate::model::{ChangeEntry, FileElement};

/// Shape of the `%Nd` numeric date token (`20110603.121433`)
static DATE_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{8}\.\d{6}$").expect("Invalid date token regex"));

/// One raw lshistory record before event filtering and coalescing
#[derive(Debug)]
struct RawRecord {
    timestamp: DateTime<Utc>,
    author: String,
    element: String,
    version: String,
    event: String,
    comment: String,
}

/// How a single output line is interpreted
enum LineKind {
    /// Starts a new history record
    Record(RawRecord),
    /// Record-shaped but unusable; already warned about
    Malformed,
    /// Anything else: comment continuation or noise
    Other,
}

/// Parser for cleartool command output
pub struct Parser;

impl Parser {
    /// Parse `lshistory -fmt` output into a list of ChangeEntries
    ///
    /// Line handling:
    /// - A line whose first tab-separated field is a numeric date starts a
    ///   new record.
    /// - Any other line continues the comment of the open record (comments
    ///   may contain embedded newlines).
    /// - A stray line with no open record is skipped with a warning.
    ///
    /// Only `create version` events become entries. Consecutive records
    /// sharing timestamp, author, and comment are folded into one entry
    /// with multiple file elements, so a commit session touching several
    /// elements shows up as a single change.
    ///
    /// Fails only when the output is non-empty yet yields no records at
    /// all, which means we were not looking at lshistory output.
    pub fn parse_lshistory(output: &str) -> Result<Vec<ChangeEntry>, ClearToolError> {
        let mut records: Vec<RawRecord> = Vec::new();
        let mut saw_content = false;

        for line in output.lines() {
            match Self::classify(line) {
                LineKind::Record(record) => {
                    saw_content = true;
                    records.push(record);
                }
                LineKind::Malformed => {
                    saw_content = true;
                }
                LineKind::Other => {
                    if let Some(open) = records.last_mut() {
                        // Continuation of a multi-line comment
                        open.comment.push('\n');
                        open.comment.push_str(line);
                    } else if !line.trim().is_empty() {
                        saw_content = true;
                        warn!("skipping unrecognized lshistory line: {line}");
                    }
                }
            }
        }

        if records.is_empty() && saw_content {
            return Err(ClearToolError::ParseError(
                "lshistory output contained no parseable records".to_string(),
            ));
        }

        Ok(Self::coalesce(records))
    }

    /// Classify a single output line
    fn classify(line: &str) -> LineKind {
        let fields: Vec<&str> = line.splitn(6, FIELD_SEPARATOR).collect();

        if fields.len() < 6 || !DATE_TOKEN_REGEX.is_match(fields[0]) {
            return LineKind::Other;
        }

        let timestamp = match NaiveDateTime::parse_from_str(fields[0], TIMESTAMP_FORMAT) {
            Ok(naive) => naive.and_utc(),
            Err(e) => {
                warn!("skipping record with invalid date {:?}: {e}", fields[0]);
                return LineKind::Malformed;
            }
        };

        LineKind::Record(RawRecord {
            timestamp,
            author: fields[1].to_string(),
            element: fields[2].to_string(),
            version: fields[3].to_string(),
            event: fields[4].to_string(),
            comment: fields[5].to_string(),
        })
    }

    /// Drop non-version events and merge records from one commit session
    fn coalesce(records: Vec<RawRecord>) -> Vec<ChangeEntry> {
        let mut entries: Vec<ChangeEntry> = Vec::new();

        for record in records {
            if record.event != events::CREATE_VERSION {
                debug!(
                    "ignoring {:?} event on {}",
                    record.event, record.element
                );
                continue;
            }

            let comment = record.comment.trim_end().to_string();
            let element = FileElement::with_version(record.element, record.version);

            match entries.last_mut() {
                Some(open)
                    if open.timestamp == record.timestamp
                        && open.author == record.author
                        && open.comment == comment =>
                {
                    open.files.push(element);
                }
                _ => {
                    entries.push(ChangeEntry::new(
                        record.timestamp,
                        record.author,
                        vec![element],
                        comment,
                    ));
                }
            }
        }

        entries
    }
}
