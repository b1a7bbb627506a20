//! Media overlay serialization.
//!
//! Emits EPUB 3 Media Overlays SMIL: one `<seq>` per chapter carrying one
//! `<par>` per fragment in ascending order, each pairing a `<text>`
//! reference with an `<audio>` clip. Clip times always render with three
//! fractional digits and a trailing `s` unit.
//!
//! Serialization is a pure function of the ordered fragment sequence:
//! the same store produces byte-identical output every time.

use crate::fragments::{Fragment, FragmentStore};

const SMIL_NS: &str = "http://www.w3.org/ns/SMIL";
const EPUB_NS: &str = "http://www.idpf.org/2007/ops";

/// Options for writing overlay documents.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Value of the sequence's `epub:type` attribute.
    pub epub_type: String,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            epub_type: "chapter".to_string(),
        }
    }
}

/// Serialize fragments to an overlay document string.
///
/// Fragments are emitted in ascending `order` regardless of slice order.
/// Entry ids default to each fragment's own id; a fragment with an empty
/// id falls back to `par<N>` with N its 1-based position.
pub fn build_smil(fragments: &[Fragment], text_ref: &str, seq_id: &str) -> String {
    build_smil_with_options(fragments, text_ref, seq_id, &WriteOptions::default())
}

/// Serialize fragments to an overlay document string, with options.
pub fn build_smil_with_options(
    fragments: &[Fragment],
    text_ref: &str,
    seq_id: &str,
    options: &WriteOptions,
) -> String {
    let mut ordered: Vec<&Fragment> = fragments.iter().collect();
    ordered.sort_by_key(|f| f.order);

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!(
        "<smil xmlns=\"{}\" xmlns:epub=\"{}\" version=\"3.0\">\n",
        SMIL_NS, EPUB_NS
    ));
    xml.push_str("  <body>\n");
    xml.push_str(&format!(
        "    <seq id=\"{}\" epub:textref=\"{}\" epub:type=\"{}\">\n",
        escape_xml(seq_id),
        escape_xml(text_ref),
        escape_xml(&options.epub_type)
    ));

    for (i, fragment) in ordered.iter().enumerate() {
        let par_id = if fragment.id.is_empty() {
            format!("par{}", i + 1)
        } else {
            fragment.id.clone()
        };

        xml.push_str(&format!("      <par id=\"{}\">\n", escape_xml(&par_id)));
        xml.push_str(&format!(
            "        <text src=\"{}\"/>\n",
            escape_xml(&fragment.text_anchor.to_src())
        ));
        xml.push_str(&format!(
            "        <audio src=\"{}\" clipBegin=\"{}\" clipEnd=\"{}\"/>\n",
            escape_xml(&fragment.audio_src),
            format_clip(fragment.clip_begin),
            format_clip(fragment.clip_end)
        ));
        xml.push_str("      </par>\n");
    }

    xml.push_str("    </seq>\n");
    xml.push_str("  </body>\n");
    xml.push_str("</smil>\n");

    xml
}

/// Serialize a whole store to an overlay document string.
pub fn serialize_store(store: &FragmentStore, text_ref: &str, seq_id: &str) -> String {
    build_smil(store.fragments(), text_ref, seq_id)
}

/// Format a clip time in seconds as `<seconds>.<mmm>s`.
pub fn format_clip(secs: f64) -> String {
    format!("{:.3}s", secs)
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
