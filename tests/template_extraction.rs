//! End-to-end extraction of synthetic template pages.
//!
//! Pages are drawn in memory with the standard layout: every content cell is
//! filled with its own gray level, so the saved glyphs reveal which cell each
//! label was taken from.

use glyph_grid::core::config::{ExtractionConfig, LayoutParams, ParallelPolicy, ProcessorConfig};
use glyph_grid::domain::{CharacterSet, CharsetRegistry, KeyScheme, RoutingTag, scan_glyph_dir};
use glyph_grid::pipeline::TemplateExtractor;
use glyph_grid::processors::GridGeometry;
use image::{Rgb, RgbImage};
use std::collections::BTreeMap;
use std::path::Path;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const PAGE_WIDTH: u32 = 1654;
const PAGE_HEIGHT: u32 = 2339;
const LATIN: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcd";

fn cell_level(slot: usize) -> u8 {
    (40 + slot * 6) as u8
}

/// A white page whose n-th content cell is filled with `cell_level(n)`.
fn template_page(width: u32, height: u32) -> RgbImage {
    let mut page = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    let grid = GridGeometry::compute(&LayoutParams::standard(), width, height);
    for (slot, rect) in grid.content_cells().enumerate() {
        let rect = grid.to_page(&rect);
        let level = cell_level(slot);
        for y in rect.top.max(0)..rect.bottom.min(i64::from(height)) {
            for x in rect.left.max(0)..rect.right.min(i64::from(width)) {
                page.put_pixel(x as u32, y as u32, Rgb([level, level, level]));
            }
        }
    }
    page
}

fn extraction_config(root: &Path, sets: Vec<CharacterSet>) -> ExtractionConfig {
    ExtractionConfig::new()
        .with_processor(ProcessorConfig::new(root.join("out"), root.join("ref")))
        .with_registry(CharsetRegistry::new(sets))
}

fn center_level(path: &Path) -> Result<u8, Box<dyn std::error::Error>> {
    let glyph = image::open(path)?.to_rgb8();
    Ok(glyph.get_pixel(glyph.width() / 2, glyph.height() / 2).0[0])
}

#[test]
fn full_page_yields_thirty_glyphs_in_raster_order() -> TestResult {
    let dir = TempDir::new()?;
    let input = dir.path().join("pages");
    std::fs::create_dir(&input)?;
    template_page(PAGE_WIDTH, PAGE_HEIGHT).save(input.join("page_01.png"))?;

    let extractor = TemplateExtractor::new(extraction_config(
        dir.path(),
        vec![CharacterSet::from_chars("latin", RoutingTag::Generic, LATIN)],
    ))?;
    let stats = extractor.run(&input)?;

    assert_eq!(stats.pages_processed, 1);
    assert_eq!(stats.cells_saved, 30);
    assert_eq!(stats.cells_skipped + stats.cells_failed, 0);

    for (slot, label) in LATIN.chars().enumerate() {
        let path = dir.path().join("out").join(format!("{}.png", label as u32));
        let glyph = image::open(&path)?;
        assert_eq!((glyph.width(), glyph.height()), (128, 128));
        assert_eq!(center_level(&path)?, cell_level(slot), "label {}", label);
    }
    Ok(())
}

#[test]
fn rerun_overwrites_with_identical_counts() -> TestResult {
    let dir = TempDir::new()?;
    let input = dir.path().join("pages");
    std::fs::create_dir(&input)?;
    template_page(PAGE_WIDTH, PAGE_HEIGHT).save(input.join("1.png"))?;
    template_page(PAGE_WIDTH, PAGE_HEIGHT).save(input.join("2.png"))?;

    let extractor = TemplateExtractor::new(extraction_config(
        dir.path(),
        vec![
            CharacterSet::from_chars("han1", RoutingTag::Reference, "값같곬"),
            CharacterSet::from_chars("latin", RoutingTag::Generic, LATIN),
        ],
    ))?;

    let first = extractor.run(&input)?;
    let second = extractor.run(&input)?;
    assert_eq!(first.counts(), second.counts());
    assert_eq!(first.cells_saved, 33);

    let reference = scan_glyph_dir(&dir.path().join("ref"), KeyScheme::Literal)?;
    assert_eq!(reference.len(), 3);
    assert!(reference.get(0xAC12).is_some());
    let generic = scan_glyph_dir(&dir.path().join("out"), KeyScheme::Numeric)?;
    assert_eq!(generic.len(), 30);
    assert!(generic.unresolved.is_empty());
    Ok(())
}

#[test]
fn manifest_assignment_ignores_file_order() -> TestResult {
    let dir = TempDir::new()?;
    let input = dir.path().join("pages");
    std::fs::create_dir(&input)?;
    template_page(PAGE_WIDTH, PAGE_HEIGHT).save(input.join("a_scan.png"))?;
    template_page(PAGE_WIDTH, PAGE_HEIGHT).save(input.join("b_scan.png"))?;
    template_page(PAGE_WIDTH, PAGE_HEIGHT).save(input.join("c_extra.png"))?;

    let manifest = BTreeMap::from([
        ("a_scan".to_string(), "digits".to_string()),
        ("b_scan.png".to_string(), "han1".to_string()),
    ]);
    let registry = CharsetRegistry::new(vec![
        CharacterSet::from_chars("han1", RoutingTag::Reference, "값같"),
        CharacterSet::from_chars("digits", RoutingTag::Generic, "89"),
    ])
    .with_manifest(manifest);
    let config = extraction_config(dir.path(), Vec::new())
        .with_registry(registry)
        .with_parallel(ParallelPolicy::sequential());

    let stats = TemplateExtractor::new(config)?.run(&input)?;
    assert_eq!(stats.counts(), [3, 2, 1, 4, 0, 0]);

    assert!(dir.path().join("out").join("56.png").is_file());
    assert!(dir.path().join("out").join("57.png").is_file());
    let reference = dir.path().join("ref").join("같.png");
    assert_eq!(center_level(&reference)?, cell_level(1));
    Ok(())
}

#[test]
fn pages_are_normalized_before_slicing() -> TestResult {
    let dir = TempDir::new()?;
    let input = dir.path().join("pages");
    std::fs::create_dir(&input)?;
    RgbImage::from_pixel(827, 1170, Rgb([255, 255, 255])).save(input.join("small.png"))?;

    let config = extraction_config(
        dir.path(),
        vec![CharacterSet::from_chars("latin", RoutingTag::Generic, LATIN)],
    )
    .with_page_size(Some([PAGE_WIDTH, PAGE_HEIGHT]));
    let stats = TemplateExtractor::new(config)?.run(&input)?;
    assert_eq!(stats.cells_saved, 30);

    // Without normalization the small page has room for three content rows.
    let dir = TempDir::new()?;
    let input = dir.path().join("pages");
    std::fs::create_dir(&input)?;
    RgbImage::from_pixel(827, 1170, Rgb([255, 255, 255])).save(input.join("small.png"))?;
    let config = extraction_config(
        dir.path(),
        vec![CharacterSet::from_chars("latin", RoutingTag::Generic, LATIN)],
    );
    let stats = TemplateExtractor::new(config)?.run(&input)?;
    assert_eq!(stats.cells_saved, 15);
    Ok(())
}

#[test]
fn binarized_run_writes_black_and_white_glyphs() -> TestResult {
    let dir = TempDir::new()?;
    let input = dir.path().join("pages");
    std::fs::create_dir(&input)?;
    template_page(PAGE_WIDTH, PAGE_HEIGHT).save(input.join("page.png"))?;

    let processor = ProcessorConfig::new(dir.path().join("out"), dir.path().join("ref"))
        .with_transform(glyph_grid::core::config::PostCropTransform::binarize());
    let config = extraction_config(
        dir.path(),
        vec![CharacterSet::from_chars("digits", RoutingTag::Generic, "0123456789")],
    )
    .with_processor(processor);
    TemplateExtractor::new(config)?.run(&input)?;

    for digit in '0'..='9' {
        let glyph = image::open(dir.path().join("out").join(format!("{}.png", digit as u32)))?;
        let gray = glyph.to_luma8();
        assert!(gray.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }
    Ok(())
}
