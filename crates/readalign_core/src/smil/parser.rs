//! Media overlay parsing.
//!
//! Decodes an EPUB 3 Media Overlays SMIL document back into fragments.
//! Structural decoding only: `order` is assigned from document position,
//! and the cached text snapshots stay empty until the content collaborator
//! supplies them. Documents in the wild vary in how they spell clip
//! values, so the clip parser accepts plain seconds (with or without the
//! `s` unit), `ms` offsets, an `npt=` prefix, and clock values.

use roxmltree::Node;

use super::error::{SmilError, SmilResult};
use crate::fragments::{Fragment, FragmentResult, FragmentStore, TextAnchor};

/// A decoded overlay document: sequence metadata plus its fragments.
#[derive(Debug, Clone, Default)]
pub struct ParsedOverlay {
    /// The sequence's `id` attribute, if present.
    pub seq_id: Option<String>,
    /// The sequence's `epub:textref` attribute, if present.
    pub text_ref: Option<String>,
    /// Fragments in document order, with sequential `order` values.
    pub fragments: Vec<Fragment>,
}

impl ParsedOverlay {
    /// Move the decoded fragments into a store.
    pub fn into_store(self) -> FragmentResult<FragmentStore> {
        FragmentStore::from_fragments(self.fragments)
    }
}

/// Parse an overlay document string.
///
/// Expects the structure the writer emits: `smil` root, `body`, one `seq`
/// carrying `par` entries that each pair a `text` reference with an
/// `audio` clip. Anything else is a `MalformedDocument`.
pub fn parse_smil(xml: &str) -> SmilResult<ParsedOverlay> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| SmilError::malformed(format!("XML parse error: {}", e)))?;

    let root = doc.root_element();
    if root.tag_name().name() != "smil" {
        return Err(SmilError::malformed("Root element must be <smil>"));
    }

    let body = root
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "body")
        .ok_or_else(|| SmilError::malformed("Missing <body> element"))?;

    // One seq per chapter document; we take the first.
    let seq = body
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "seq")
        .ok_or_else(|| SmilError::malformed("Missing <seq> element in <body>"))?;

    let seq_id = seq.attribute("id").map(|s| s.to_string());
    let text_ref = epub_attribute(&seq, "textref").map(|s| s.to_string());

    let mut fragments = Vec::new();
    for (i, par) in seq
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "par")
        .enumerate()
    {
        fragments.push(parse_par(&par, i)?);
    }

    Ok(ParsedOverlay {
        seq_id,
        text_ref,
        fragments,
    })
}

/// Parse a single `par` entry into a fragment.
fn parse_par(par: &Node, index: usize) -> SmilResult<Fragment> {
    let id = par
        .attribute("id")
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("par{}", index + 1));

    let text = par
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "text")
        .ok_or_else(|| SmilError::malformed(format!("<par id=\"{}\"> has no <text>", id)))?;
    let text_src = text.attribute("src").ok_or_else(|| {
        SmilError::malformed(format!("<text> in <par id=\"{}\"> has no src", id))
    })?;

    let audio = par
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "audio")
        .ok_or_else(|| SmilError::malformed(format!("<par id=\"{}\"> has no <audio>", id)))?;
    let audio_src = audio.attribute("src").ok_or_else(|| {
        SmilError::malformed(format!("<audio> in <par id=\"{}\"> has no src", id))
    })?;

    let clip_begin = required_clip(&audio, "clipBegin", &id)?;
    let clip_end = required_clip(&audio, "clipEnd", &id)?;

    Ok(
        Fragment::new(id, TextAnchor::from_src(text_src), audio_src, clip_begin, clip_end)
            .with_order((index + 1) as u32),
    )
}

/// Read and parse a required clip attribute off an `audio` element.
fn required_clip(audio: &Node, attribute: &str, par_id: &str) -> SmilResult<f64> {
    let value = audio.attribute(attribute).ok_or_else(|| {
        SmilError::malformed(format!(
            "<audio> in <par id=\"{}\"> has no {}",
            par_id, attribute
        ))
    })?;

    parse_clip_value(value).ok_or_else(|| {
        SmilError::malformed(format!(
            "Invalid {} value '{}' in <par id=\"{}\">",
            attribute, value, par_id
        ))
    })
}

/// Parse a SMIL clip value to seconds.
///
/// Accepted spellings: `12.345s`, `12.345`, `345ms`, `npt=12.345s`, and
/// clock values `HH:MM:SS.mmm` / `MM:SS.mmm`. Negative values are
/// rejected.
pub fn parse_clip_value(value: &str) -> Option<f64> {
    let value = value.trim();
    let value = value.strip_prefix("npt=").unwrap_or(value);

    if value.contains(':') {
        return parse_clock_value(value);
    }

    let secs = if let Some(ms) = value.strip_suffix("ms") {
        ms.trim().parse::<f64>().ok()? / 1000.0
    } else if let Some(h) = value.strip_suffix('h') {
        h.trim().parse::<f64>().ok()? * 3600.0
    } else if let Some(min) = value.strip_suffix("min") {
        min.trim().parse::<f64>().ok()? * 60.0
    } else if let Some(s) = value.strip_suffix('s') {
        s.trim().parse::<f64>().ok()?
    } else {
        value.parse::<f64>().ok()?
    };

    if secs.is_finite() && secs >= 0.0 {
        Some(secs)
    } else {
        None
    }
}

/// Parse a `HH:MM:SS.mmm` or `MM:SS.mmm` clock value to seconds.
fn parse_clock_value(value: &str) -> Option<f64> {
    let parts: Vec<&str> = value.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (h.parse::<u64>().ok()?, m.parse::<u64>().ok()?, *s),
        [m, s] => (0, m.parse::<u64>().ok()?, *s),
        _ => return None,
    };

    let secs: f64 = seconds.parse().ok()?;
    if !secs.is_finite() || secs < 0.0 {
        return None;
    }

    Some((hours * 3600 + minutes * 60) as f64 + secs)
}

/// Look up an attribute in the EPUB namespace, tolerating documents that
/// omit the namespace declaration.
fn epub_attribute<'a>(node: &'a Node, local_name: &str) -> Option<&'a str> {
    node.attribute(("http://www.idpf.org/2007/ops", local_name))
        .or_else(|| node.attribute(local_name))
}
