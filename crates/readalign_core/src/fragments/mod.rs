//! Fragment synchronization engine.
//!
//! The heart of the editor: an ordered store of timed text/audio alignment
//! fragments for one chapter, plus the operations that split, merge,
//! insert, delete and re-time them.
//!
//! # Components
//!
//! - **types**: `Fragment`, `TextAnchor`, error types
//! - **store**: `FragmentStore` with identity and ordering invariants
//! - **snapper**: word-boundary snapping for text splits
//! - **split**: split-at-time and split-at-text-offset
//! - **edits**: field updates, insertion, deletion, bulk time shift
//!
//! Every operation is a synchronous in-memory transformation; the engine
//! performs no I/O and assumes the caller serializes mutations per store.
//!
//! # Usage
//!
//! ```
//! use readalign_core::fragments::{
//!     apply_time_offset, split_at_time, Fragment, FragmentStore, TextAnchor,
//! };
//!
//! let mut store = FragmentStore::from_fragments(vec![
//!     Fragment::new("f1", TextAnchor::new("c1.xhtml", "p1"), "c1.mp3", 0.0, 4.0)
//!         .with_text("first sentence here")
//!         .with_order(1),
//! ])
//! .unwrap();
//!
//! let outcome = split_at_time(&mut store, "f1", 2.0).unwrap();
//! let from_order = store.get(&outcome.second).unwrap().order;
//! apply_time_offset(&mut store, 0.25, from_order).unwrap();
//! ```

mod edits;
mod snapper;
mod split;
mod store;
mod types;

// Re-export types
pub use types::{fresh_id, Fragment, FragmentError, FragmentResult, TextAnchor};

// Re-export the store
pub use store::FragmentStore;

// Re-export operations
pub use edits::{
    apply_time_offset, delete, insert_after, merge_with_next, set_clip_range, update_fields,
    FragmentUpdate, NewFragment,
};
pub use snapper::snap;
pub use split::{split_at_time, split_at_text_offset, SplitOutcome};
