//! Fragment types and error definitions.
//!
//! Provides types for representing timed text/audio alignment fragments and
//! errors that can occur during fragment operations.

use serde::{Deserialize, Serialize};

/// Reference to a location in a content document.
///
/// `element_id` may be empty when the fragment covers the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextAnchor {
    /// Path of the content document within the publication.
    pub document_path: String,
    /// Id of the target element inside the document.
    #[serde(default)]
    pub element_id: String,
}

impl TextAnchor {
    /// Create an anchor pointing at an element inside a document.
    pub fn new(document_path: impl Into<String>, element_id: impl Into<String>) -> Self {
        Self {
            document_path: document_path.into(),
            element_id: element_id.into(),
        }
    }

    /// Create an anchor covering a whole document (no element id).
    pub fn document(document_path: impl Into<String>) -> Self {
        Self {
            document_path: document_path.into(),
            element_id: String::new(),
        }
    }

    /// Parse a `path#element` source reference.
    pub fn from_src(src: &str) -> Self {
        match src.split_once('#') {
            Some((path, id)) => Self::new(path, id),
            None => Self::document(src),
        }
    }

    /// Render as a `path#element` source reference.
    ///
    /// The `#` separator is always emitted, even for an empty element id,
    /// matching the form media overlay text entries use.
    pub fn to_src(&self) -> String {
        format!("{}#{}", self.document_path, self.element_id)
    }
}

/// A single timed alignment fragment pairing a text anchor with an audio
/// clip interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    /// Opaque unique id, stable across edits.
    pub id: String,
    /// Location of the covered text in the content document.
    pub text_anchor: TextAnchor,
    /// Path to the audio resource.
    pub audio_src: String,
    /// Clip start in seconds into `audio_src`.
    pub clip_begin: f64,
    /// Clip end in seconds into `audio_src`.
    pub clip_end: f64,
    /// Cached plain-text snapshot of the covered content. May go stale
    /// after independent content edits; the engine does not correct it.
    #[serde(default)]
    pub text: String,
    /// Position in playback/document sequence within the store. Unique and
    /// strictly increasing across the store, not necessarily contiguous.
    pub order: u32,
}

impl Fragment {
    /// Create a fragment with the given identity, anchor and clip interval.
    pub fn new(
        id: impl Into<String>,
        text_anchor: TextAnchor,
        audio_src: impl Into<String>,
        clip_begin: f64,
        clip_end: f64,
    ) -> Self {
        Self {
            id: id.into(),
            text_anchor,
            audio_src: audio_src.into(),
            clip_begin,
            clip_end,
            text: String::new(),
            order: 0,
        }
    }

    /// Set the cached text snapshot.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the sequence position.
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// Clip duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.clip_end - self.clip_begin
    }

    /// Whether `time` falls strictly inside the clip interval.
    pub fn clip_contains(&self, time: f64) -> bool {
        self.clip_begin < time && time < self.clip_end
    }

    /// Shift both clip times by an offset in seconds.
    pub fn shift(&mut self, delta_secs: f64) {
        self.clip_begin += delta_secs;
        self.clip_end += delta_secs;
    }
}

/// Mint a fresh fragment id.
///
/// Ids are UUID v4 strings, unique for the lifetime of the store and beyond.
pub fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Error types for fragment operations.
#[derive(Debug, thiserror::Error)]
pub enum FragmentError {
    /// The operation referenced a fragment id absent from the store.
    #[error("No fragment with id '{0}' in store")]
    NotFound(String),

    /// A split time or text offset fell outside the valid range, or
    /// boundary snapping rejected the offset.
    #[error("Invalid split point: {0}")]
    InvalidSplitPoint(String),

    /// Inserting or replacing would duplicate an existing fragment id.
    #[error("Fragment id '{0}' already exists in store")]
    DuplicateId(String),

    /// A clip range update had `begin >= end` or a negative time.
    #[error("Invalid clip range: begin {begin}s, end {end}s")]
    InvalidClipRange { begin: f64, end: f64 },

    /// A bulk time shift would push a fragment's clip before zero.
    #[error("Offset of {delta_secs}s would move fragment '{id}' to {result_secs}s")]
    InvalidTimeOffset {
        delta_secs: f64,
        id: String,
        result_secs: f64,
    },

    /// Two fragments cannot be merged.
    #[error("Cannot merge fragment '{id}': {reason}")]
    InvalidMerge { id: String, reason: String },
}

/// Type alias for fragment operation results.
pub type FragmentResult<T> = Result<T, FragmentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_src_roundtrip() {
        let anchor = TextAnchor::from_src("chapter1.xhtml#p004");
        assert_eq!(anchor.document_path, "chapter1.xhtml");
        assert_eq!(anchor.element_id, "p004");
        assert_eq!(anchor.to_src(), "chapter1.xhtml#p004");
    }

    #[test]
    fn anchor_without_element() {
        let anchor = TextAnchor::from_src("chapter1.xhtml");
        assert_eq!(anchor.document_path, "chapter1.xhtml");
        assert_eq!(anchor.element_id, "");
        assert_eq!(anchor.to_src(), "chapter1.xhtml#");
    }

    #[test]
    fn fragment_duration_and_contains() {
        let frag = Fragment::new(
            "f1",
            TextAnchor::new("c1.xhtml", "p1"),
            "audio/c1.mp3",
            1.5,
            4.0,
        );
        assert!((frag.duration_secs() - 2.5).abs() < 1e-9);
        assert!(frag.clip_contains(2.0));
        assert!(!frag.clip_contains(1.5));
        assert!(!frag.clip_contains(4.0));
    }

    #[test]
    fn fragment_roundtrips_through_json() {
        // JSON is the interchange form toward the UI layer.
        let frag = Fragment::new(
            "f1",
            TextAnchor::new("c1.xhtml", "p1"),
            "audio/c1.mp3",
            1.5,
            4.0,
        )
        .with_text("narrated text")
        .with_order(3);

        let json = serde_json::to_string(&frag).unwrap();
        let back: Fragment = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, "f1");
        assert_eq!(back.text_anchor, frag.text_anchor);
        assert!((back.clip_end - 4.0).abs() < 1e-9);
        assert_eq!(back.text, "narrated text");
        assert_eq!(back.order, 3);
    }

    #[test]
    fn fresh_ids_are_unique() {
        let a = fresh_id();
        let b = fresh_id();
        assert_ne!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn fragment_shift_moves_both_times() {
        let mut frag = Fragment::new(
            "f1",
            TextAnchor::document("c1.xhtml"),
            "audio/c1.mp3",
            1.0,
            2.0,
        );
        frag.shift(0.5);
        assert!((frag.clip_begin - 1.5).abs() < 1e-9);
        assert!((frag.clip_end - 2.5).abs() < 1e-9);
    }
}
