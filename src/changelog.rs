//! Changelog file serialization
//!
//! The change set of each build is persisted next to the build record so
//! the next build can recover its watermark. The sink trait keeps the
//! engine independent of where the file lives or what it looks like.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::model::ChangeSet;

/// Errors raised while writing or reading a changelog file
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("changelog serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Destination for a finalized change set
pub trait ChangelogSink {
    fn write(&mut self, set: &ChangeSet) -> Result<(), ChangelogError>;
}

/// JSON-file changelog, one file per build
#[derive(Debug, Clone)]
pub struct JsonChangelog {
    path: PathBuf,
}

impl JsonChangelog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read back a previously written change set
    pub fn read(&self) -> Result<ChangeSet, ChangelogError> {
        let file = File::open(&self.path)?;
        let set = serde_json::from_reader(BufReader::new(file))?;
        Ok(set)
    }
}

impl ChangelogSink for JsonChangelog {
    fn write(&mut self, set: &ChangeSet) -> Result<(), ChangelogError> {
        debug!(
            "writing changelog with {} entries to {}",
            set.entries().len(),
            self.path.display()
        );
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), set)?;
        Ok(())
    }
}

/// Human-readable rendering of a change set, newest entry first.
///
/// Used by the CLI after a checkout; the ordering mirrors the set itself.
pub fn render_summary(set: &ChangeSet) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} #{}: {} entries",
        set.build().project,
        set.build().number,
        set.entries().len()
    );

    for entry in set.entries() {
        let _ = writeln!(
            out,
            "  {} {}: {}",
            entry.timestamp.format("%Y-%m-%dT%H:%M:%SZ"),
            entry.author,
            entry.display_comment()
        );
        for file in &entry.files {
            let _ = writeln!(out, "    {} @ {}", file.path, file.version);
        }
    }

    out
}
