//! Domain types: character sets, glyph keys and glyph directory indexing.

pub mod charset;
pub mod glyph_index;
pub mod unicode;

pub use charset::{CharacterSet, CharsetRegistry, PageAssignment, RoutingTag};
pub use glyph_index::{GlyphIndex, IndexedGlyph, KeyScheme, scan_glyph_dir};
pub use unicode::{
    CodepointFormat, format_codepoint, resolve_codepoint, resolve_numeric_key, strip_extension,
};
