//! Revision-comparison and change-history reconciliation engine
//!
//! Decides whether remote history has advanced past the last build and, on
//! checkout, materializes the incremental change history as a sorted
//! change set. The host build server wires these entry points into its own
//! lifecycle and persists the results between builds.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::{debug, info};

use crate::changelog::{ChangelogError, ChangelogSink};
use crate::cleartool::ClearToolError;
use crate::config::ScmConfig;
use crate::model::{BuildRef, ChangeEntry, ChangeSet, EntryDateOrder, RevisionState};

/// System-wide presentation order for change sets: newest first.
pub const CHANGELOG_ORDER: EntryDateOrder = EntryDateOrder::Decreasing;

/// Outcome of a polling round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollingDecision {
    /// Remote history advanced past the baseline
    BuildNow,
    /// Nothing new, or the newest change is still settling
    NoChanges,
}

/// History source consumed by the engine.
///
/// Implemented by [`crate::cleartool::ClearTool`]; tests substitute an
/// in-memory fake. `since` bounds are strictly exclusive: an entry at
/// exactly `since` has already been seen.
pub trait HistoryFetcher {
    /// Newest change timestamp strictly after `since`, scoped to the rules
    fn latest_change_timestamp(
        &self,
        load_rules: &[String],
        since: Option<DateTime<Utc>>,
    ) -> Result<Option<DateTime<Utc>>, ClearToolError>;

    /// All change entries strictly after `since`, scoped to the rules
    fn list_history(
        &self,
        load_rules: &[String],
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<ChangeEntry>, ClearToolError>;

    /// Whether the tool knows the given view tag
    fn view_exists(&self, tag: &str) -> Result<bool, ClearToolError>;
}

/// Errors that fail a build attempt
#[derive(Error, Debug)]
pub enum ScmError {
    #[error("history retrieval failed: {0}")]
    Tool(#[from] ClearToolError),

    #[error("changelog write failed: {0}")]
    Changelog(#[from] ChangelogError),
}

/// The reconciliation engine, parameterized only by its configuration.
///
/// Stateless across invocations: every entry point receives the prior
/// build's data explicitly and returns what the host must persist.
#[derive(Debug, Clone)]
pub struct Scm {
    config: ScmConfig,
}

impl Scm {
    pub fn new(config: ScmConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScmConfig {
        &self.config
    }

    /// Derive the revision state recorded after a build.
    ///
    /// `None` when the build is missing or produced an empty change set;
    /// an empty set carries no usable watermark.
    pub fn calc_revision_state(&self, change_set: Option<&ChangeSet>) -> Option<RevisionState> {
        change_set
            .and_then(ChangeSet::latest_commit_date)
            .map(RevisionState::new)
    }

    /// Compare the baseline against the remote state.
    ///
    /// `quiet_period` must be non-negative: the newest remote change has
    /// to be at least that old before it triggers a build, so a commit
    /// session that is still writing versions is not picked up halfway.
    pub fn compare_remote_revision(
        &self,
        fetcher: &impl HistoryFetcher,
        baseline: Option<&RevisionState>,
        quiet_period: Duration,
        now: DateTime<Utc>,
    ) -> Result<PollingDecision, ScmError> {
        // No baseline means we have never built; always build
        let Some(baseline) = baseline else {
            info!("no baseline recorded, scheduling a build");
            return Ok(PollingDecision::BuildNow);
        };

        let built_time = baseline.built_time();
        debug!("baseline built time is {built_time}");

        let rules = self.config.load_rules_as_list();
        let Some(remote) = fetcher.latest_change_timestamp(&rules, Some(built_time))? else {
            debug!("no remote changes since {built_time}");
            return Ok(PollingDecision::NoChanges);
        };

        debug!("latest remote change is {remote}");

        let settled = remote
            .checked_add_signed(quiet_period)
            .is_some_and(|end| end < now);
        if !settled {
            info!("change at {remote} is still inside the quiet period");
            return Ok(PollingDecision::NoChanges);
        }

        if built_time < remote {
            info!("remote history advanced past the baseline, scheduling a build");
            Ok(PollingDecision::BuildNow)
        } else {
            debug!("remote history has not advanced");
            Ok(PollingDecision::NoChanges)
        }
    }

    /// Fetch the incremental history and hand it to the changelog sink.
    ///
    /// The lower bound comes from the previous build's change set, so
    /// entries the last changelog already recorded are never re-fetched.
    /// Returns the new set; this is the sole point that advances the
    /// watermark the next comparison starts from.
    pub fn checkout(
        &self,
        fetcher: &impl HistoryFetcher,
        previous: Option<&ChangeSet>,
        build: BuildRef,
        sink: &mut impl ChangelogSink,
    ) -> Result<ChangeSet, ScmError> {
        info!("checkout start for {} #{}", build.project, build.number);

        let since = previous.and_then(ChangeSet::latest_commit_date);
        let rules = self.config.load_rules_as_list();

        let entries = fetcher.list_history(&rules, since)?;
        debug!("fetched {} entries since {since:?}", entries.len());

        let set = ChangeSet::new(build, entries, CHANGELOG_ORDER);
        sink.write(&set)?;

        Ok(set)
    }
}
