//! Edit operations over a fragment store.
//!
//! Field updates, insertion, deletion, merging, and bulk time shifting. All
//! operations re-establish the store's ordering invariant; none of them
//! re-time or re-text neighboring fragments on the caller's behalf.

use serde::{Deserialize, Serialize};

use super::store::FragmentStore;
use super::types::{fresh_id, Fragment, FragmentError, FragmentResult, TextAnchor};

/// A partial fragment update. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FragmentUpdate {
    /// New clip start in seconds.
    pub clip_begin: Option<f64>,
    /// New clip end in seconds.
    pub clip_end: Option<f64>,
    /// New cached text snapshot.
    pub text: Option<String>,
    /// New audio resource path.
    pub audio_src: Option<String>,
    /// New text anchor.
    pub text_anchor: Option<TextAnchor>,
}

impl FragmentUpdate {
    /// An update that only moves the clip start.
    pub fn clip_begin(secs: f64) -> Self {
        Self {
            clip_begin: Some(secs),
            ..Default::default()
        }
    }

    /// An update that only moves the clip end.
    pub fn clip_end(secs: f64) -> Self {
        Self {
            clip_end: Some(secs),
            ..Default::default()
        }
    }

    /// An update that only replaces the text snapshot.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Apply a partial update to the fragment at `id`.
///
/// Deliberately does not check `clip_begin < clip_end` on the result:
/// begin and end are commonly edited through two independent calls, and a
/// transiently inverted interval is surfaced to later readers rather than
/// rejected here. Callers wanting atomic validation use
/// [`set_clip_range`].
pub fn update_fields(
    store: &mut FragmentStore,
    id: &str,
    update: FragmentUpdate,
) -> FragmentResult<()> {
    let fragment = store.get_mut(id)?;

    if let Some(begin) = update.clip_begin {
        fragment.clip_begin = begin;
    }
    if let Some(end) = update.clip_end {
        fragment.clip_end = end;
    }
    if let Some(text) = update.text {
        fragment.text = text;
    }
    if let Some(audio_src) = update.audio_src {
        fragment.audio_src = audio_src;
    }
    if let Some(anchor) = update.text_anchor {
        fragment.text_anchor = anchor;
    }

    Ok(())
}

/// Atomically set both clip times, validating the range first.
///
/// The stricter companion to two [`update_fields`] calls: fails without
/// touching the fragment if `begin` is negative or not strictly before
/// `end`.
pub fn set_clip_range(
    store: &mut FragmentStore,
    id: &str,
    begin: f64,
    end: f64,
) -> FragmentResult<()> {
    if begin < 0.0 || begin >= end {
        return Err(FragmentError::InvalidClipRange { begin, end });
    }

    let fragment = store.get_mut(id)?;
    fragment.clip_begin = begin;
    fragment.clip_end = end;
    Ok(())
}

/// Field values for a fragment to be inserted.
#[derive(Debug, Clone)]
pub struct NewFragment {
    /// Location of the covered text.
    pub text_anchor: TextAnchor,
    /// Path to the audio resource.
    pub audio_src: String,
    /// Clip start in seconds.
    pub clip_begin: f64,
    /// Clip end in seconds.
    pub clip_end: f64,
    /// Cached text snapshot.
    pub text: String,
}

impl NewFragment {
    /// The usual insert-after default: copy anchor and audio source from
    /// the reference fragment, empty text, and a clip window of
    /// `duration_secs` starting at the reference's clip end.
    pub fn following(reference: &Fragment, duration_secs: f64) -> Self {
        Self {
            text_anchor: reference.text_anchor.clone(),
            audio_src: reference.audio_src.clone(),
            clip_begin: reference.clip_end,
            clip_end: reference.clip_end + duration_secs,
            text: String::new(),
        }
    }
}

/// Insert a new fragment immediately after the fragment at `id`.
///
/// Returns the new fragment's freshly minted id.
pub fn insert_after(
    store: &mut FragmentStore,
    id: &str,
    fields: NewFragment,
) -> FragmentResult<String> {
    let fragment = Fragment::new(
        fresh_id(),
        fields.text_anchor,
        fields.audio_src,
        fields.clip_begin,
        fields.clip_end,
    )
    .with_text(fields.text);

    let new_id = store.insert_after(id, fragment)?;
    tracing::debug!("Inserted fragment '{}' after '{}'", new_id, id);
    Ok(new_id)
}

/// Remove the fragment at `id`.
///
/// Neighboring fragments keep their clip times and `order` values.
/// Returns the removed fragment.
pub fn delete(store: &mut FragmentStore, id: &str) -> FragmentResult<Fragment> {
    let removed = store.remove(id)?;
    tracing::debug!("Deleted fragment '{}'", id);
    Ok(removed)
}

/// Merge the fragment at `id` with its successor in order.
///
/// The inverse of a split: the fragment absorbs its successor, keeping
/// its own id and order, extending its clip to the successor's end and
/// appending the successor's text. The successor is removed.
///
/// Fails if the fragment is the last in the store, or if the two
/// fragments play from different audio resources.
pub fn merge_with_next(store: &mut FragmentStore, id: &str) -> FragmentResult<()> {
    let fragment = store.get(id)?;
    let next = store
        .iter()
        .find(|f| f.order > fragment.order)
        .ok_or_else(|| FragmentError::InvalidMerge {
            id: id.to_string(),
            reason: "no fragment after it".to_string(),
        })?;

    if next.audio_src != fragment.audio_src {
        return Err(FragmentError::InvalidMerge {
            id: id.to_string(),
            reason: format!(
                "successor '{}' plays from a different audio resource",
                next.id
            ),
        });
    }

    let next_id = next.id.clone();
    let removed = store.remove(&next_id)?;

    let fragment = store.get_mut(id)?;
    fragment.clip_end = removed.clip_end;
    fragment.text.push_str(&removed.text);

    tracing::debug!("Merged fragment '{}' into '{}'", next_id, id);
    Ok(())
}

/// Shift the clip times of every fragment with `order >= from_order` by
/// `delta_secs`.
///
/// Atomic: all eligible fragments are validated before any is touched, so
/// a failure leaves the store exactly as it was. Fails if any shifted
/// clip would start before zero.
///
/// Returns the number of fragments shifted.
pub fn apply_time_offset(
    store: &mut FragmentStore,
    delta_secs: f64,
    from_order: u32,
) -> FragmentResult<usize> {
    if delta_secs == 0.0 {
        return Ok(0);
    }

    for fragment in store.iter() {
        if fragment.order >= from_order && fragment.clip_begin + delta_secs < 0.0 {
            return Err(FragmentError::InvalidTimeOffset {
                delta_secs,
                id: fragment.id.clone(),
                result_secs: fragment.clip_begin + delta_secs,
            });
        }
    }

    let mut shifted = 0;
    for fragment in store.iter_mut() {
        if fragment.order >= from_order {
            fragment.shift(delta_secs);
            shifted += 1;
        }
    }

    tracing::debug!(
        "Shifted {} fragments from order {} by {:+.3}s",
        shifted,
        from_order,
        delta_secs
    );

    Ok(shifted)
}
