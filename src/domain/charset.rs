//! Character sets and their assignment to template pages.
//!
//! Each template page carries one [`CharacterSet`]: the labels written into
//! its content cells in raster order, plus a [`RoutingTag`] deciding how the
//! resulting glyph files are named. A [`CharsetRegistry`] owns the ordered
//! sets and decides which set belongs to which page, either positionally or
//! through an explicit manifest.

use crate::core::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Output routing of a character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingTag {
    /// Synthesis reference glyphs: literal-character filenames in the
    /// reference directory.
    Reference,
    /// Everything else: code-point filenames in the output directory.
    #[default]
    Generic,
}

impl std::fmt::Display for RoutingTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoutingTag::Reference => write!(f, "reference"),
            RoutingTag::Generic => write!(f, "generic"),
        }
    }
}

/// Ordered labels expected on one template page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSet {
    pub name: String,
    #[serde(default)]
    pub routing: RoutingTag,
    /// One entry per content cell, in raster order.
    pub chars: Vec<String>,
}

impl CharacterSet {
    pub fn new(name: impl Into<String>, routing: RoutingTag, chars: Vec<String>) -> Self {
        Self {
            name: name.into(),
            routing,
            chars,
        }
    }

    /// Builds a set with one label per scalar value of `chars`.
    pub fn from_chars(name: impl Into<String>, routing: RoutingTag, chars: &str) -> Self {
        Self::new(name, routing, chars.chars().map(String::from).collect())
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// A page matched with the character set it carries.
#[derive(Debug, Clone)]
pub struct PageAssignment<'a> {
    /// Position of the page in the sorted input listing.
    pub index: usize,
    pub path: PathBuf,
    pub charset: &'a CharacterSet,
}

/// Ordered character sets plus the page → set assignment.
///
/// Without a manifest, the n-th page in sorted order takes the n-th set.
/// A manifest maps a page file name (or its stem) to a set name and makes
/// the assignment independent of file ordering; pages it does not list are
/// skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharsetRegistry {
    #[serde(default = "CharsetRegistry::template_sets")]
    sets: Vec<CharacterSet>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    manifest: BTreeMap<String, String>,
}

impl CharsetRegistry {
    /// Creates a positional registry over `sets`.
    pub fn new(sets: Vec<CharacterSet>) -> Self {
        Self {
            sets,
            manifest: BTreeMap::new(),
        }
    }

    /// Switches to explicit assignment: page name or stem → set name.
    pub fn with_manifest(mut self, manifest: BTreeMap<String, String>) -> Self {
        self.manifest = manifest;
        self
    }

    /// The eight-page Hangul handwriting template.
    pub fn hangul_template() -> Self {
        Self::new(Self::template_sets())
    }

    pub fn sets(&self) -> &[CharacterSet] {
        &self.sets
    }

    pub fn manifest(&self) -> &BTreeMap<String, String> {
        &self.manifest
    }

    /// Looks a set up by name.
    pub fn get(&self, name: &str) -> Option<&CharacterSet> {
        self.sets.iter().find(|set| set.name == name)
    }

    /// Checks names are unique, labels non-empty and manifest targets known.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sets.is_empty() {
            return Err(ConfigError::InvalidConfig {
                message: "at least one character set is required".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for set in &self.sets {
            if !seen.insert(set.name.as_str()) {
                return Err(ConfigError::InvalidConfig {
                    message: format!("duplicate character set name '{}'", set.name),
                });
            }
            if let Some(pos) = set.chars.iter().position(|label| label.is_empty()) {
                return Err(ConfigError::ValidationFailed {
                    message: format!("character set '{}' has an empty label at {}", set.name, pos),
                });
            }
        }

        for (page, set_name) in &self.manifest {
            if self.get(set_name).is_none() {
                return Err(ConfigError::InvalidConfig {
                    message: format!(
                        "manifest maps page '{}' to unknown character set '{}'",
                        page, set_name
                    ),
                });
            }
        }
        Ok(())
    }

    /// Pairs sorted page paths with their character sets.
    ///
    /// Pages without a set are logged and left out of the result.
    pub fn assign(&self, pages: &[PathBuf]) -> Vec<PageAssignment<'_>> {
        if self.manifest.is_empty() {
            self.assign_positional(pages)
        } else {
            self.assign_manifest(pages)
        }
    }

    fn assign_positional(&self, pages: &[PathBuf]) -> Vec<PageAssignment<'_>> {
        if pages.len() != self.sets.len() {
            warn!(
                "Found {} pages for {} character sets; pages are matched to sets by sorted file name only",
                pages.len(),
                self.sets.len()
            );
        }
        if pages.len() > self.sets.len() {
            for path in &pages[self.sets.len()..] {
                warn!("No character set left for page {}, skipping", path.display());
            }
        }

        pages
            .iter()
            .zip(&self.sets)
            .enumerate()
            .map(|(index, (path, charset))| PageAssignment {
                index,
                path: path.clone(),
                charset,
            })
            .collect()
    }

    fn assign_manifest(&self, pages: &[PathBuf]) -> Vec<PageAssignment<'_>> {
        pages
            .iter()
            .enumerate()
            .filter_map(|(index, path)| match self.manifest_entry(path) {
                Some(charset) => Some(PageAssignment {
                    index,
                    path: path.clone(),
                    charset,
                }),
                None => {
                    warn!("Page {} is not listed in the page manifest, skipping", path.display());
                    None
                }
            })
            .collect()
    }

    fn manifest_entry(&self, path: &Path) -> Option<&CharacterSet> {
        let by_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| self.manifest.get(name));
        let by_stem = || {
            path.file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| self.manifest.get(stem))
        };
        by_name.or_else(by_stem).and_then(|set_name| self.get(set_name))
    }

    fn template_sets() -> Vec<CharacterSet> {
        vec![
            CharacterSet::from_chars(
                "han1",
                RoutingTag::Reference,
                "값같곬곶깎꽃넋녘늪닫닭닻됩뗌략릎많몃밝밟볘뺐뽙삶섧솩쌓쐐앉얹",
            ),
            CharacterSet::from_chars(
                "han2",
                RoutingTag::Reference,
                "않앓얘얾엌옳읊죨쮜쯢춰츌퀭틔핀핥훑훟",
            ),
            CharacterSet::from_chars(
                "consonants",
                RoutingTag::Generic,
                "ㄱㄲㄳㄴㄵㄶㄷㄸㄹㄺㄻㄼㄽㄾㄿㅀㅁㅂㅃㅄㅅㅆㅇㅈㅉㅊㅋㅌㅍㅎ",
            ),
            CharacterSet::from_chars(
                "vowels",
                RoutingTag::Generic,
                "ㅏㅐㅑㅒㅓㅔㅕㅖㅗㅘㅙㅚㅛㅜㅝㅞㅟㅠㅡㅢㅣ",
            ),
            CharacterSet::from_chars(
                "symbols",
                RoutingTag::Generic,
                "!@#$%^&*()-=+/\\[]{};:'\"<>,.?~",
            ),
            CharacterSet::from_chars(
                "latin1",
                RoutingTag::Generic,
                "ABCDEFGHIJKLMNOPQRSTUVWXYZabcd",
            ),
            CharacterSet::from_chars(
                "latin2",
                RoutingTag::Generic,
                "efghijklmnopqrstuvwxyz01234567",
            ),
            CharacterSet::from_chars("digits", RoutingTag::Generic, "89"),
        ]
    }
}

impl Default for CharsetRegistry {
    fn default() -> Self {
        Self::hangul_template()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from("scans").join(n)).collect()
    }

    #[test]
    fn test_template_sets_fit_one_page_each() {
        let registry = CharsetRegistry::hangul_template();
        let lens: Vec<usize> = registry.sets().iter().map(CharacterSet::len).collect();
        assert_eq!(lens, vec![30, 18, 30, 21, 29, 30, 30, 2]);
        assert!(lens.iter().all(|&len| len <= 30));
        assert_eq!(registry.sets()[0].routing, RoutingTag::Reference);
        assert_eq!(registry.sets()[1].routing, RoutingTag::Reference);
        assert!(registry.sets()[2..].iter().all(|s| s.routing == RoutingTag::Generic));
        assert!(registry.validate().is_ok());
    }

    #[test]
    fn test_positional_assignment_skips_excess_pages() {
        let registry = CharsetRegistry::new(vec![
            CharacterSet::from_chars("a", RoutingTag::Generic, "ab"),
            CharacterSet::from_chars("b", RoutingTag::Generic, "cd"),
        ]);
        let assigned = registry.assign(&pages(&["p1.png", "p2.png", "p3.png"]));
        assert_eq!(assigned.len(), 2);
        assert_eq!(assigned[0].charset.name, "a");
        assert_eq!(assigned[1].charset.name, "b");
        assert_eq!(assigned[1].index, 1);
    }

    #[test]
    fn test_manifest_assignment_by_name_and_stem() {
        let registry = CharsetRegistry::new(vec![
            CharacterSet::from_chars("upper", RoutingTag::Generic, "AB"),
            CharacterSet::from_chars("lower", RoutingTag::Generic, "ab"),
        ])
        .with_manifest(BTreeMap::from([
            ("scan_b.jpg".to_string(), "upper".to_string()),
            ("scan_a".to_string(), "lower".to_string()),
        ]));

        let assigned = registry.assign(&pages(&["scan_a.png", "scan_b.jpg", "scan_c.png"]));
        assert_eq!(assigned.len(), 2);
        assert_eq!(assigned[0].charset.name, "lower");
        assert_eq!(assigned[0].index, 0);
        assert_eq!(assigned[1].charset.name, "upper");
    }

    #[test]
    fn test_validate_rejects_unknown_manifest_target() {
        let registry = CharsetRegistry::new(vec![CharacterSet::from_chars(
            "only",
            RoutingTag::Generic,
            "x",
        )])
        .with_manifest(BTreeMap::from([("p1".to_string(), "missing".to_string())]));
        assert!(registry.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicates_and_empty_labels() {
        let dup = CharsetRegistry::new(vec![
            CharacterSet::from_chars("x", RoutingTag::Generic, "a"),
            CharacterSet::from_chars("x", RoutingTag::Generic, "b"),
        ]);
        assert!(dup.validate().is_err());

        let empty_label = CharsetRegistry::new(vec![CharacterSet::new(
            "x",
            RoutingTag::Generic,
            vec!["a".to_string(), String::new()],
        )]);
        assert!(empty_label.validate().is_err());

        assert!(CharsetRegistry::new(Vec::new()).validate().is_err());
    }

    #[test]
    fn test_deserialize_registry() -> Result<(), serde_json::Error> {
        let registry: CharsetRegistry = serde_json::from_str(
            r#"{
                "sets": [{ "name": "ref", "routing": "reference", "chars": ["값", "같"] }],
                "manifest": { "page01": "ref" }
            }"#,
        )?;
        assert_eq!(registry.sets()[0].routing, RoutingTag::Reference);
        assert_eq!(registry.manifest().get("page01").map(String::as_str), Some("ref"));

        let defaulted: CharsetRegistry = serde_json::from_str("{}")?;
        assert_eq!(defaulted, CharsetRegistry::hangul_template());
        Ok(())
    }
}
