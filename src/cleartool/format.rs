//! cleartool format strings for stable output parsing
//!
//! These -fmt templates ensure consistent, parseable output from cleartool
//! regardless of user configuration or locale.

use chrono::{DateTime, Utc};

/// Separator used between fields in formatted output (tab character)
///
/// cleartool expands the `\t` escapes in the -fmt string itself, so the
/// parser sees real tab characters.
pub const FIELD_SEPARATOR: char = '\t';

/// chrono format of the `%Nd` numeric date token (`20110603.121433`)
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d.%H%M%S";

/// chrono format accepted by the `-since` flag (`03-Jun-2011.12:14:33`)
pub const SINCE_FORMAT: &str = "%d-%b-%Y.%H:%M:%S";

/// Format strings for cleartool commands
pub struct Formats;

impl Formats {
    /// Template for `lshistory -fmt` output
    ///
    /// Fields (separated by tab):
    /// 1. numeric date (`%Nd`, `YYYYMMDD.HHMMSS`)
    /// 2. user (`%u`)
    /// 3. element path (`%En`)
    /// 4. version extended label (`%Vn`, e.g. `/main/3`)
    /// 5. event name (`%e`, e.g. `create version`)
    /// 6. comment (`%Nc`, may contain embedded newlines)
    ///
    /// The comment is last so that embedded newlines only produce
    /// continuation lines, which the parser folds back into the comment.
    pub fn lshistory() -> &'static str {
        r"%Nd\t%u\t%En\t%Vn\t%e\t%Nc\n"
    }

    /// Render a timestamp for the `-since` flag.
    pub fn since(ts: DateTime<Utc>) -> String {
        ts.format(SINCE_FORMAT).to_string()
    }
}
