//! Fragment splitting.
//!
//! Both operations replace one fragment with two children that partition
//! its clip interval exactly and share its text anchor and audio source.
//! The parent is consumed; both children carry fresh ids. The first child
//! takes the parent's order position, the second is inserted immediately
//! after it.

use super::snapper::snap;
use super::store::FragmentStore;
use super::types::{fresh_id, Fragment, FragmentError, FragmentResult};

/// Ids of the two children produced by a split, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutcome {
    /// First child, covering the front of the parent's interval.
    pub first: String,
    /// Second child, covering the back.
    pub second: String,
}

/// Split the fragment at `id` at an explicit time.
///
/// `time` must fall strictly inside the fragment's clip interval. The
/// first child keeps the parent's text snapshot; the second starts with an
/// empty one, to be filled in by the caller once it decides how the text
/// divides (the clip times alone do not say).
pub fn split_at_time(
    store: &mut FragmentStore,
    id: &str,
    time: f64,
) -> FragmentResult<SplitOutcome> {
    let parent = store.get(id)?.clone();

    if !parent.clip_contains(time) {
        return Err(FragmentError::InvalidSplitPoint(format!(
            "time {}s outside clip ({}s, {}s) of fragment '{}'",
            time, parent.clip_begin, parent.clip_end, id
        )));
    }

    let first_text = parent.text.clone();
    replace_with_children(store, &parent, time, first_text, String::new())
}

/// Split the fragment at `id` at a character offset into its text.
///
/// The raw offset (a caret position resolved by the UI layer) is snapped
/// to the nearest word boundary first; the split time is then interpolated
/// proportionally to the character position. The children partition the
/// text snapshot at the snapped offset.
///
/// Proportional timing is approximate by construction; callers correct it
/// with direct field edits where it matters.
pub fn split_at_text_offset(
    store: &mut FragmentStore,
    id: &str,
    raw_offset: usize,
) -> FragmentResult<SplitOutcome> {
    let parent = store.get(id)?.clone();

    let offset = snap(&parent.text, raw_offset).ok_or_else(|| {
        FragmentError::InvalidSplitPoint(format!(
            "offset {} in fragment '{}' has no usable word boundary",
            raw_offset, id
        ))
    })?;

    let char_len = parent.text.chars().count();
    let ratio = offset as f64 / char_len as f64;
    let time = parent.clip_begin + ratio * (parent.clip_end - parent.clip_begin);

    // A degenerate clip interval (possible after unpaired field updates)
    // cannot produce an interior split time.
    if !parent.clip_contains(time) {
        return Err(FragmentError::InvalidSplitPoint(format!(
            "interpolated time {}s outside clip ({}s, {}s) of fragment '{}'",
            time, parent.clip_begin, parent.clip_end, id
        )));
    }

    let byte_offset = parent
        .text
        .char_indices()
        .nth(offset)
        .map(|(b, _)| b)
        .unwrap_or(parent.text.len());
    let first_text = parent.text[..byte_offset].to_string();
    let second_text = parent.text[byte_offset..].to_string();

    replace_with_children(store, &parent, time, first_text, second_text)
}

/// Swap the parent for its two children in the store.
fn replace_with_children(
    store: &mut FragmentStore,
    parent: &Fragment,
    time: f64,
    first_text: String,
    second_text: String,
) -> FragmentResult<SplitOutcome> {
    let first = Fragment::new(
        fresh_id(),
        parent.text_anchor.clone(),
        parent.audio_src.clone(),
        parent.clip_begin,
        time,
    )
    .with_text(first_text);

    let second = Fragment::new(
        fresh_id(),
        parent.text_anchor.clone(),
        parent.audio_src.clone(),
        time,
        parent.clip_end,
    )
    .with_text(second_text);

    let first_id = first.id.clone();
    let second_id = second.id.clone();

    store.replace(&parent.id, first)?;
    store.insert_after(&first_id, second)?;

    tracing::debug!(
        "Split fragment '{}' at {:.3}s into '{}' and '{}'",
        parent.id,
        time,
        first_id,
        second_id
    );

    Ok(SplitOutcome {
        first: first_id,
        second: second_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragments::types::TextAnchor;

    fn store_with(text: &str, begin: f64, end: f64) -> FragmentStore {
        FragmentStore::from_fragments(vec![
            Fragment::new(
                "f1",
                TextAnchor::new("chapter1.xhtml", "p1"),
                "audio/chapter1.mp3",
                begin,
                end,
            )
            .with_text(text)
            .with_order(1),
            Fragment::new(
                "f2",
                TextAnchor::new("chapter1.xhtml", "p2"),
                "audio/chapter1.mp3",
                end,
                end + 2.0,
            )
            .with_text("next fragment")
            .with_order(2),
        ])
        .unwrap()
    }

    #[test]
    fn split_at_time_partitions_clip() {
        let mut store = store_with("hello world", 1.0, 5.0);
        let outcome = split_at_time(&mut store, "f1", 2.5).unwrap();

        let first = store.get(&outcome.first).unwrap().clone();
        let second = store.get(&outcome.second).unwrap().clone();

        assert!((first.clip_begin - 1.0).abs() < 1e-9);
        assert!((first.clip_end - 2.5).abs() < 1e-9);
        assert!((second.clip_begin - 2.5).abs() < 1e-9);
        assert!((second.clip_end - 5.0).abs() < 1e-9);

        // No gap, no overlap.
        assert_eq!(first.clip_end, second.clip_begin);
    }

    #[test]
    fn split_children_share_anchor_and_audio() {
        let mut store = store_with("hello world", 1.0, 5.0);
        let outcome = split_at_time(&mut store, "f1", 2.0).unwrap();

        let first = store.get(&outcome.first).unwrap();
        let anchor = first.text_anchor.clone();
        let audio = first.audio_src.clone();
        let second = store.get(&outcome.second).unwrap();

        assert_eq!(second.text_anchor, anchor);
        assert_eq!(second.audio_src, audio);
        assert_eq!(anchor.element_id, "p1");
    }

    #[test]
    fn split_consumes_parent_and_mints_fresh_ids() {
        let mut store = store_with("hello world", 1.0, 5.0);
        let outcome = split_at_time(&mut store, "f1", 2.0).unwrap();

        assert!(!store.contains("f1"));
        assert_ne!(outcome.first, outcome.second);
        assert_ne!(outcome.first, "f1");
        assert_ne!(outcome.second, "f1");
    }

    #[test]
    fn split_places_children_in_parent_position() {
        let mut store = store_with("hello world", 1.0, 5.0);
        let outcome = split_at_time(&mut store, "f1", 2.0).unwrap();

        let ids: Vec<&str> = store.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec![outcome.first.as_str(), outcome.second.as_str(), "f2"]);

        let orders: Vec<u32> = store.iter().map(|f| f.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn split_at_time_rejects_out_of_range() {
        let mut store = store_with("hello world", 1.0, 5.0);
        for time in [0.5, 1.0, 5.0, 6.0] {
            let result = split_at_time(&mut store, "f1", time);
            assert!(matches!(result, Err(FragmentError::InvalidSplitPoint(_))));
        }
        assert_eq!(store.len(), 2);
        assert!(store.contains("f1"));
    }

    #[test]
    fn split_at_time_unknown_id_is_not_found() {
        let mut store = store_with("hello world", 1.0, 5.0);
        let result = split_at_time(&mut store, "missing", 2.0);
        assert!(matches!(result, Err(FragmentError::NotFound(_))));
    }

    #[test]
    fn split_at_time_keeps_text_on_first_child() {
        let mut store = store_with("hello world", 1.0, 5.0);
        let outcome = split_at_time(&mut store, "f1", 2.0).unwrap();

        assert_eq!(store.get(&outcome.first).unwrap().text, "hello world");
        assert_eq!(store.get(&outcome.second).unwrap().text, "");
    }

    #[test]
    fn split_at_text_offset_partitions_text_and_interpolates() {
        // "hello world" has 11 characters; the space at offset 5 splits
        // at ratio 5/11 of the 11-second clip: 5 seconds in.
        let mut store = store_with("hello world", 0.0, 11.0);
        let outcome = split_at_text_offset(&mut store, "f1", 5).unwrap();

        let first = store.get(&outcome.first).unwrap().clone();
        let second = store.get(&outcome.second).unwrap().clone();

        assert_eq!(first.text, "hello");
        assert_eq!(second.text, " world");
        assert!((first.clip_end - 5.0).abs() < 1e-9);
        assert_eq!(first.clip_end, second.clip_begin);
        assert_eq!(format!("{}{}", first.text, second.text), "hello world");
    }

    #[test]
    fn split_at_text_offset_snaps_mid_word() {
        // Offset 7 is mid-"world"; the nearest boundary is the space at 5.
        let mut store = store_with("hello world", 0.0, 11.0);
        let outcome = split_at_text_offset(&mut store, "f1", 7).unwrap();

        assert_eq!(store.get(&outcome.first).unwrap().text, "hello");
        assert_eq!(store.get(&outcome.second).unwrap().text, " world");
    }

    #[test]
    fn split_at_text_offset_rejects_unsnappable() {
        let mut store = store_with("unbroken", 0.0, 4.0);
        let result = split_at_text_offset(&mut store, "f1", 4);
        assert!(matches!(result, Err(FragmentError::InvalidSplitPoint(_))));
        assert!(store.contains("f1"));
    }

    #[test]
    fn split_at_text_offset_multibyte_text() {
        // "héllo wörld": character-proportional timing must use character
        // counts, not byte lengths.
        let mut store = store_with("héllo wörld", 0.0, 11.0);
        let outcome = split_at_text_offset(&mut store, "f1", 5).unwrap();

        let first = store.get(&outcome.first).unwrap().clone();
        let second = store.get(&outcome.second).unwrap().clone();
        assert_eq!(first.text, "héllo");
        assert_eq!(second.text, " wörld");
        assert!((first.clip_end - 5.0).abs() < 1e-9);
    }
}
