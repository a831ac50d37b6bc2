//! Clearpoll - ClearCase polling and checkout adapter
//!
//! Bridges a build-automation server to ClearCase through the cleartool
//! command line: decides when remote history has advanced enough to build,
//! and materializes the incremental change history as a changelog.
//!
//! This library provides:
//! - [`scm`]: the reconciliation engine (polling decision + checkout)
//! - [`cleartool`]: cleartool command execution and parsing
//! - [`model`]: domain models (entries, change sets, revision state)
//! - [`config`]: configuration and validation
//! - [`changelog`]: changelog file serialization

pub mod changelog;
pub mod cleartool;
pub mod config;
pub mod model;
pub mod scm;
