//! Index of a finished glyph directory.
//!
//! Font assembly consumes a directory of per-character images and needs the
//! code point of each file. Reference glyphs are named by their literal
//! character, generic glyphs by a numeric key; [`KeyScheme`] picks the
//! matching resolver.

use super::unicode::{resolve_codepoint, resolve_numeric_key};
use crate::core::constants::SUPPORTED_GLYPH_EXTENSIONS;
use crate::core::errors::GlyphError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// How glyph filenames encode their code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyScheme {
    /// `값.png`: resolved through [`resolve_codepoint`].
    Literal,
    /// `44050.png`, `U+AC12.png` or `33~125.png`: resolved through
    /// [`resolve_numeric_key`].
    Numeric,
}

/// A glyph file with its resolved code point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedGlyph {
    pub path: PathBuf,
    pub codepoint: u32,
}

/// Result of indexing one glyph directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphIndex {
    /// Resolved glyphs, sorted by code point.
    pub glyphs: Vec<IndexedGlyph>,
    /// Files whose name did not resolve.
    pub unresolved: Vec<PathBuf>,
}

impl GlyphIndex {
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Finds the glyph file for a code point.
    pub fn get(&self, codepoint: u32) -> Option<&IndexedGlyph> {
        self.glyphs
            .binary_search_by_key(&codepoint, |glyph| glyph.codepoint)
            .ok()
            .map(|idx| &self.glyphs[idx])
    }
}

/// Lists the glyph images in `dir` and resolves each name to a code point.
///
/// Files with an unresolvable name are collected in
/// [`GlyphIndex::unresolved`] instead of failing the scan. When two files
/// resolve to the same code point the first in name order is kept.
pub fn scan_glyph_dir(dir: &Path, scheme: KeyScheme) -> Result<GlyphIndex, GlyphError> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                warn!("Cannot read an entry of {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|path| path.is_file() && has_glyph_extension(path))
        .collect();
    files.sort();

    if files.is_empty() {
        warn!("No glyph images found in {}", dir.display());
    }

    let mut index = GlyphIndex::default();
    for path in files {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            index.unresolved.push(path);
            continue;
        };
        let resolved = match scheme {
            KeyScheme::Literal => resolve_codepoint(name),
            KeyScheme::Numeric => resolve_numeric_key(name),
        };
        match resolved {
            Some(codepoint) => {
                debug!("{} -> U+{:04X}", name, codepoint);
                index.glyphs.push(IndexedGlyph { path, codepoint });
            }
            None => {
                warn!("Cannot resolve a code point from '{}', skipping", name);
                index.unresolved.push(path);
            }
        }
    }

    index.glyphs.sort_by_key(|glyph| glyph.codepoint);
    index.glyphs.dedup_by_key(|glyph| glyph.codepoint);
    Ok(index)
}

fn has_glyph_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_GLYPH_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}
