//! Media overlay codec.
//!
//! Converts between the in-memory fragment store and the EPUB 3 Media
//! Overlays document format (SMIL), one document per chapter.
//!
//! # Components
//!
//! - **writer**: deterministic serialization of ordered fragments
//! - **parser**: structural decoding back into fragments
//! - **error**: codec error types
//!
//! # Usage
//!
//! ```
//! use readalign_core::smil::{parse_smil, serialize_store};
//!
//! let xml = r#"<smil xmlns="http://www.w3.org/ns/SMIL" version="3.0">
//!   <body>
//!     <seq id="seq1" textref="chapter1.xhtml">
//!       <par id="f1">
//!         <text src="chapter1.xhtml#p001"/>
//!         <audio src="audio/chapter1.mp3" clipBegin="0.000s" clipEnd="2.500s"/>
//!       </par>
//!     </seq>
//!   </body>
//! </smil>"#;
//!
//! let store = parse_smil(xml).unwrap().into_store().unwrap();
//! let exported = serialize_store(&store, "chapter1.xhtml", "seq1");
//! assert!(exported.contains("clipEnd=\"2.500s\""));
//! ```

mod error;
mod parser;
mod writer;

use std::fs;
use std::path::Path;

use crate::fragments::FragmentStore;

// Re-export errors
pub use error::{SmilError, SmilResult};

// Re-export the codec
pub use parser::{parse_clip_value, parse_smil, ParsedOverlay};
pub use writer::{
    build_smil, build_smil_with_options, format_clip, serialize_store, WriteOptions,
};

/// Parse an overlay document from disk.
pub fn read_file(path: impl AsRef<Path>) -> SmilResult<ParsedOverlay> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| SmilError::read(path.to_path_buf(), e))?;
    parse_smil(&content)
}

/// Serialize a store and write it to disk.
pub fn write_file(
    store: &FragmentStore,
    path: impl AsRef<Path>,
    text_ref: &str,
    seq_id: &str,
) -> SmilResult<()> {
    let path = path.as_ref();
    let content = serialize_store(store, text_ref, seq_id);
    fs::write(path, content).map_err(|e| SmilError::write(path.to_path_buf(), e))?;
    Ok(())
}
