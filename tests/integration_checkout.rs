//! Checkout integration tests.
//!
//! End-to-end scenarios for history retrieval, ordering, watermark
//! chaining across consecutive builds, and changelog persistence.

#[path = "common/mod.rs"]
mod common;

use common::{FakeFetcher, RecordingSink, at, entry_at};
use tempfile::tempdir;

use clearpoll::changelog::JsonChangelog;
use clearpoll::config::ScmConfig;
use clearpoll::model::BuildRef;
use clearpoll::scm::{Scm, ScmError};

fn engine() -> Scm {
    Scm::new(ScmConfig::new("nightly_view", "vobs/app"))
}

#[test]
fn test_first_checkout_takes_all_history_newest_first() {
    let fetcher = FakeFetcher::with_entries(vec![
        entry_at(at(1, 0), "a"),
        entry_at(at(2, 0), "b"),
        entry_at(at(3, 0), "c"),
    ]);
    let mut sink = RecordingSink::default();

    let set = engine()
        .checkout(&fetcher, None, BuildRef::new("nightly", 1), &mut sink)
        .unwrap();

    // No previous build: full history requested
    assert_eq!(fetcher.seen_since.borrow().as_slice(), &[None]);

    let authors: Vec<&str> = set.entries().iter().map(|e| e.author.as_str()).collect();
    assert_eq!(authors, vec!["c", "b", "a"]);
    assert_eq!(set.latest_commit_date(), Some(at(3, 0)));

    // The sink received the same finalized set
    assert_eq!(sink.written.as_ref(), Some(&set));
}

#[test]
fn test_consecutive_builds_never_duplicate_entries() {
    let fetcher = FakeFetcher::with_entries(vec![
        entry_at(at(1, 0), "a"),
        entry_at(at(2, 0), "b"),
        entry_at(at(3, 0), "c"),
    ]);
    let mut sink = RecordingSink::default();
    let scm = engine();

    let first = scm
        .checkout(&fetcher, None, BuildRef::new("nightly", 1), &mut sink)
        .unwrap();

    // Second build: lower bound is the first set's watermark
    let second = scm
        .checkout(&fetcher, Some(&first), BuildRef::new("nightly", 2), &mut sink)
        .unwrap();

    assert_eq!(
        fetcher.seen_since.borrow().as_slice(),
        &[None, Some(at(3, 0))]
    );
    assert!(second.is_empty());
    assert_eq!(second.latest_commit_date(), None);
}

#[test]
fn test_empty_previous_set_means_full_history() {
    let fetcher = FakeFetcher::with_entries(vec![entry_at(at(1, 0), "a")]);
    let mut sink = RecordingSink::default();
    let scm = engine();

    let empty_previous = scm
        .checkout(&FakeFetcher::empty(), None, BuildRef::new("nightly", 1), &mut sink)
        .unwrap();

    let set = scm
        .checkout(
            &fetcher,
            Some(&empty_previous),
            BuildRef::new("nightly", 2),
            &mut sink,
        )
        .unwrap();

    // An empty set carries no watermark, so the bound must be absent
    assert_eq!(fetcher.seen_since.borrow().as_slice(), &[None]);
    assert_eq!(set.entries().len(), 1);
}

#[test]
fn test_sink_failure_fails_the_checkout() {
    let fetcher = FakeFetcher::with_entries(vec![entry_at(at(1, 0), "a")]);
    let mut sink = RecordingSink::failing();

    let result = engine().checkout(&fetcher, None, BuildRef::new("nightly", 1), &mut sink);

    assert!(matches!(result, Err(ScmError::Changelog(_))));
}

#[test]
fn test_tool_failure_fails_the_checkout() {
    let mut sink = RecordingSink::default();

    let result = engine().checkout(
        &FakeFetcher::failing(),
        None,
        BuildRef::new("nightly", 1),
        &mut sink,
    );

    assert!(matches!(result, Err(ScmError::Tool(_))));
    assert!(sink.written.is_none());
}

#[test]
fn test_changelog_round_trips_through_json_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("changelog.json");

    let fetcher = FakeFetcher::with_entries(vec![
        entry_at(at(1, 0), "a"),
        entry_at(at(2, 0), "b"),
    ]);
    let mut sink = JsonChangelog::new(&path);

    let written = engine()
        .checkout(&fetcher, None, BuildRef::new("nightly", 7), &mut sink)
        .unwrap();

    let restored = JsonChangelog::new(&path).read().unwrap();
    assert_eq!(restored, written);
    assert_eq!(restored.build().number, 7);
    assert_eq!(restored.latest_commit_date(), Some(at(2, 0)));
}

#[test]
fn test_watermark_chain_through_changelog_files() {
    // Build N writes a changelog; build N+1 reads it back and polls from
    // its watermark. Drives the full persistence chain.
    let dir = tempdir().unwrap();
    let path = dir.path().join("changelog.json");
    let scm = engine();

    let fetcher = FakeFetcher::with_entries(vec![entry_at(at(1, 0), "a"), entry_at(at(2, 0), "b")]);
    let mut sink = JsonChangelog::new(&path);
    scm.checkout(&fetcher, None, BuildRef::new("nightly", 1), &mut sink)
        .unwrap();

    let previous = JsonChangelog::new(&path).read().unwrap();
    let baseline = scm.calc_revision_state(Some(&previous)).unwrap();
    assert_eq!(baseline.built_time(), at(2, 0));
}
