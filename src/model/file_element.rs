//! File element data model

use serde::{Deserialize, Serialize};

/// Version label for an element whose version is not yet known.
///
/// ClearCase numbers versions from zero on each branch, so a freshly seen
/// element reports version "0" until lshistory tells us otherwise.
pub const INITIAL_VERSION: &str = "0";

/// A single file touched by a change, with its version label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileElement {
    /// Element path inside the view
    pub path: String,

    /// Version extended label (e.g. `/main/3`), or [`INITIAL_VERSION`]
    pub version: String,
}

impl FileElement {
    /// Create an element with the initial version sentinel.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: INITIAL_VERSION.to_string(),
        }
    }

    /// Create an element with a known version label.
    ///
    /// An empty label falls back to [`INITIAL_VERSION`].
    pub fn with_version(path: impl Into<String>, version: impl Into<String>) -> Self {
        let version = version.into();
        Self {
            path: path.into(),
            version: if version.is_empty() {
                INITIAL_VERSION.to_string()
            } else {
                version
            },
        }
    }
}
