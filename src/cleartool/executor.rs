//! cleartool command executor
//!
//! Handles running cleartool commands and capturing their output.

use std::path::PathBuf;
use std::process::Command;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::ClearToolError;
use super::constants::{self, commands, errors, flags};
use super::format::Formats;
use super::parser::Parser;
use crate::model::ChangeEntry;
use crate::scm::HistoryFetcher;

/// Executor for cleartool commands
///
/// History commands must run inside the view, so the executor carries the
/// view root and uses it as the working directory of every invocation.
#[derive(Debug, Clone, Default)]
pub struct ClearTool {
    /// Path to the view root (None = current directory)
    view_root: Option<PathBuf>,
}

impl ClearTool {
    /// Create a new executor for the current directory
    pub fn new() -> Self {
        Self { view_root: None }
    }

    /// Create a new executor rooted at a specific view path
    pub fn with_view_root(path: PathBuf) -> Self {
        Self {
            view_root: Some(path),
        }
    }

    /// Run a cleartool command with the given arguments
    pub fn run<S: AsRef<std::ffi::OsStr>>(&self, args: &[S]) -> Result<String, ClearToolError> {
        let mut cmd = Command::new(constants::CLEARTOOL_COMMAND);

        if let Some(ref path) = self.view_root {
            cmd.current_dir(path);
        }

        cmd.args(args);

        let output = cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ClearToolError::ClearToolNotFound
            } else {
                ClearToolError::IoError(e)
            }
        })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            let exit_code = output.status.code().unwrap_or(-1);

            Err(ClearToolError::CommandFailed { stderr, exit_code })
        }
    }

    /// Run `cleartool lshistory` scoped to the load rules
    pub fn lshistory_raw(
        &self,
        load_rules: &[String],
        since: Option<DateTime<Utc>>,
    ) -> Result<String, ClearToolError> {
        let args = history_args(load_rules, since);
        debug!("running lshistory with args {args:?}");
        self.run(&args)
    }

    /// Run `cleartool lsview` for a view tag
    pub fn lsview_raw(&self, tag: &str) -> Result<String, ClearToolError> {
        self.run(&[commands::LSVIEW, tag])
    }
}

/// Build the lshistory argument list
///
/// `-nco` keeps checked-out (uncommitted) versions out of the history, and
/// `-since` trims output on the tool side. The since bound is inclusive in
/// cleartool, so callers still apply the strict filter afterwards.
fn history_args(load_rules: &[String], since: Option<DateTime<Utc>>) -> Vec<String> {
    let mut args = vec![
        commands::LSHISTORY.to_string(),
        flags::RECURSE.to_string(),
        flags::NO_CHECKOUT.to_string(),
    ];

    if let Some(ts) = since {
        args.push(flags::SINCE.to_string());
        args.push(Formats::since(ts));
    }

    args.push(flags::FORMAT.to_string());
    args.push(Formats::lshistory().to_string());
    args.extend(load_rules.iter().cloned());

    args
}

impl HistoryFetcher for ClearTool {
    fn list_history(
        &self,
        load_rules: &[String],
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<ChangeEntry>, ClearToolError> {
        let raw = self.lshistory_raw(load_rules, since)?;
        let mut entries = Parser::parse_lshistory(&raw)?;

        // -since is inclusive; the contract is strictly-after
        if let Some(bound) = since {
            entries.retain(|e| e.timestamp > bound);
        }

        Ok(entries)
    }

    fn latest_change_timestamp(
        &self,
        load_rules: &[String],
        since: Option<DateTime<Utc>>,
    ) -> Result<Option<DateTime<Utc>>, ClearToolError> {
        let entries = self.list_history(load_rules, since)?;
        Ok(entries.iter().map(|e| e.timestamp).max())
    }

    fn view_exists(&self, tag: &str) -> Result<bool, ClearToolError> {
        match self.lsview_raw(tag) {
            Ok(_) => Ok(true),
            Err(ClearToolError::CommandFailed { ref stderr, .. })
                if stderr.contains(errors::NO_MATCHING_VIEW) =>
            {
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
