//! Data models for clearpoll
//!
//! This module contains tool-independent data structures representing
//! history concepts like change entries, change sets, and revision state.

mod change_set;
mod entry;
mod file_element;
mod ordering;
mod revision_state;

pub use change_set::{BuildRef, ChangeSet};
pub use entry::ChangeEntry;
pub use file_element::{FileElement, INITIAL_VERSION};
pub use ordering::EntryDateOrder;
pub use revision_state::RevisionState;
