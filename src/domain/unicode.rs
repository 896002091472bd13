//! Code point resolution for glyph keys.
//!
//! Glyph files are keyed either by their literal character (`값.png`) or by a
//! code point (`44050.png`, `U+AC12.png`). [`resolve_codepoint`] recovers the
//! code point from a literal key, tolerating decomposed Hangul and stray
//! characters; [`resolve_numeric_key`] reads numeric keys back.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Precomposed Hangul syllables.
pub const HANGUL_SYLLABLES: std::ops::RangeInclusive<u32> = 0xAC00..=0xD7A3;

/// Conjoining Hangul jamo.
pub const HANGUL_JAMO: std::ops::RangeInclusive<u32> = 0x1100..=0x11FF;

/// Hangul compatibility jamo.
pub const HANGUL_COMPATIBILITY_JAMO: std::ops::RangeInclusive<u32> = 0x3130..=0x318F;

/// How a code point is rendered into a filename stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodepointFormat {
    /// Decimal scalar value, e.g. `44032`.
    #[default]
    Decimal,
    /// `U+` followed by at least four upper-case hex digits, e.g. `U+AC00`.
    UPlus,
}

impl std::str::FromStr for CodepointFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "decimal" | "dec" => Ok(CodepointFormat::Decimal),
            "u+" | "uplus" | "u_plus" | "u-plus" | "hex" => Ok(CodepointFormat::UPlus),
            other => Err(format!("unknown code point format '{}'", other)),
        }
    }
}

/// Renders a code point as a filename stem.
pub fn format_codepoint(codepoint: u32, format: CodepointFormat) -> String {
    match format {
        CodepointFormat::Decimal => codepoint.to_string(),
        CodepointFormat::UPlus => format!("U+{:04X}", codepoint),
    }
}

/// Removes a trailing `.ext` from a key.
///
/// A dot at the start of the key is part of the name, so `"."` and `".png"`
/// are returned unchanged while `"..png"` becomes `"."`.
pub fn strip_extension(key: &str) -> &str {
    match key.rfind('.') {
        Some(idx) if idx > 0 => &key[..idx],
        _ => key,
    }
}

/// Resolves a glyph key to a single code point.
///
/// Tried in order, each step only when the previous one failed:
/// 1. the NFC form of the key (extension stripped) is exactly one character;
/// 2. the first precomposed Hangul syllable in the key;
/// 3. the first character, if it is a Hangul jamo or compatibility jamo.
///
/// Returns `None` when nothing matches; callers skip such keys.
pub fn resolve_codepoint(key: &str) -> Option<u32> {
    let stem = strip_extension(key);

    let mut normalized = stem.nfc();
    if let (Some(only), None) = (normalized.next(), normalized.next()) {
        return Some(u32::from(only));
    }

    if let Some(syllable) = stem
        .chars()
        .map(u32::from)
        .find(|cp| HANGUL_SYLLABLES.contains(cp))
    {
        return Some(syllable);
    }

    stem.chars()
        .next()
        .map(u32::from)
        .filter(|cp| HANGUL_JAMO.contains(cp) || HANGUL_COMPATIBILITY_JAMO.contains(cp))
}

/// Resolves a numeric glyph key: `"44032"`, `"U+AC00"` or a range `"33~125"`
/// (its start).
pub fn resolve_numeric_key(key: &str) -> Option<u32> {
    let stem = strip_extension(key);
    let start = stem.split_once('~').map_or(stem, |(start, _)| start);

    if let Some(hex) = start.strip_prefix("U+").or_else(|| start.strip_prefix("u+")) {
        return u32::from_str_radix(hex, 16).ok().filter(|cp| char::from_u32(*cp).is_some());
    }

    if start.is_empty() || !start.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    start.parse::<u32>().ok().filter(|cp| char::from_u32(*cp).is_some())
}
