//! Glyph extraction command
//!
//! Slices a directory of scanned template pages into per-character glyph
//! images.
//!
//! # Usage
//!
//! ```bash
//! glyph-grid [OPTIONS] <INPUT_DIR>
//! ```
//!
//! # Example
//!
//! ```bash
//! RUST_LOG=info glyph-grid scans/ -o output/ -r ref_chars/ --binarize --debug-dir debug/
//! ```

use clap::Parser;
use glyph_grid::core::config::{ExtractionConfig, LayoutParams, PostCropTransform};
use glyph_grid::core::constants::TEMPLATE_PAGE_SIZE;
use glyph_grid::domain::CodepointFormat;
use glyph_grid::pipeline::TemplateExtractor;
use std::path::PathBuf;
use tracing::{error, info};

/// Command-line arguments
#[derive(Parser)]
#[command(name = "glyph-grid")]
#[command(about = "Extracts handwritten glyph images from template sheet scans")]
struct Args {
    /// Directory holding the scanned template pages
    input_dir: PathBuf,

    /// JSON configuration file; command-line options override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for code-point named glyphs
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Directory for literal-character named reference glyphs
    #[arg(short, long)]
    reference_dir: Option<PathBuf>,

    /// Directory for grid and cell overlays
    #[arg(long)]
    debug_dir: Option<PathBuf>,

    /// Layout preset: standard, compact or tall-label
    #[arg(long)]
    preset: Option<String>,

    /// Scan resolution in dots per inch
    #[arg(long)]
    dpi: Option<u32>,

    /// Number of character columns
    #[arg(long)]
    cols: Option<u32>,

    /// Left margin in centimeters
    #[arg(long)]
    left_margin: Option<f64>,

    /// Right margin in centimeters
    #[arg(long)]
    right_margin: Option<f64>,

    /// Top margin in centimeters
    #[arg(long)]
    top_margin: Option<f64>,

    /// Label row height in centimeters
    #[arg(long)]
    short_row: Option<f64>,

    /// Content row height in centimeters
    #[arg(long)]
    tall_row: Option<f64>,

    /// Inward cell padding in pixels
    #[arg(long)]
    padding: Option<u32>,

    /// Glyph size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size)]
    target_size: Option<(u32, u32)>,

    /// Resample every page to WIDTHxHEIGHT before slicing
    #[arg(long, value_parser = parse_size, conflicts_with = "normalize")]
    page_size: Option<(u32, u32)>,

    /// Resample every page to the standard template size (1654x2339)
    #[arg(long)]
    normalize: bool,

    /// Binarize glyphs
    #[arg(long)]
    binarize: bool,

    /// Binarization threshold (pixels below become black)
    #[arg(long, default_value = "200")]
    threshold: u8,

    /// File naming of generic glyphs: decimal or u+
    #[arg(long)]
    codepoint_format: Option<CodepointFormat>,

    /// Maximum number of worker threads
    #[arg(long)]
    threads: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", value))?;
    let width = width
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid width '{}': {}", width, e))?;
    let height = height
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid height '{}': {}", height, e))?;
    Ok((width, height))
}

fn build_config(args: &Args) -> Result<ExtractionConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ExtractionConfig::from_json_file(path)?,
        None => ExtractionConfig::new(),
    };

    if let Some(name) = &args.preset {
        config.layout = LayoutParams::preset(name)
            .ok_or_else(|| format!("unknown layout preset '{}'", name))?;
    }

    let layout = &mut config.layout;
    if let Some(dpi) = args.dpi {
        layout.dpi = dpi;
    }
    if let Some(cols) = args.cols {
        layout.cols = cols;
    }
    if let Some(cm) = args.left_margin {
        layout.left_margin_cm = cm;
    }
    if let Some(cm) = args.right_margin {
        layout.right_margin_cm = cm;
    }
    if let Some(cm) = args.top_margin {
        layout.top_margin_cm = cm;
    }
    if let Some(cm) = args.short_row {
        layout.short_row_cm = cm;
    }
    if let Some(cm) = args.tall_row {
        layout.tall_row_cm = cm;
    }

    let processor = &mut config.processor;
    if let Some(dir) = &args.output_dir {
        processor.output_dir = dir.clone();
    }
    if let Some(dir) = &args.reference_dir {
        processor.reference_dir = dir.clone();
    }
    if let Some(padding) = args.padding {
        processor.padding = padding;
    }
    if let Some((width, height)) = args.target_size {
        processor.target_size = [width, height];
    }
    if args.binarize {
        processor.transform = PostCropTransform::Binarize {
            threshold: args.threshold,
        };
    }
    if let Some(format) = args.codepoint_format {
        processor.codepoint_format = format;
    }

    if let Some((width, height)) = args.page_size {
        config.page_size = Some([width, height]);
    } else if args.normalize {
        let (width, height) = TEMPLATE_PAGE_SIZE;
        config.page_size = Some([width, height]);
    }
    if args.debug_dir.is_some() {
        config.debug_dir = args.debug_dir.clone();
    }
    if args.threads.is_some() {
        config.parallel.max_threads = args.threads;
    }

    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    glyph_grid::utils::init_tracing();

    let args = Args::parse();

    if !args.input_dir.is_dir() {
        error!("Input directory not found: {}", args.input_dir.display());
        return Err("Input directory not found".into());
    }

    let config = build_config(&args)?;

    if args.verbose {
        let px = config.layout.to_pixels();
        info!("Layout Configuration:");
        info!("  DPI: {}", config.layout.dpi);
        info!(
            "  Margins (px): left {}, right {}, top {}",
            px.left_margin, px.right_margin, px.top_margin
        );
        info!("  Rows (px): label {}, content {}", px.short_row, px.tall_row);
        info!("  Columns: {}", px.cols);
        info!("Character sets:");
        for set in config.registry.sets() {
            info!("  {} ({}, {} labels)", set.name, set.routing, set.len());
        }
    }

    let extractor = TemplateExtractor::new(config)?;
    let stats = extractor.run(&args.input_dir)?;

    info!("{}", stats);
    info!(
        "Generic glyphs: {}",
        extractor.config().processor.output_dir.display()
    );
    info!(
        "Reference glyphs: {}",
        extractor.config().processor.reference_dir.display()
    );

    Ok(())
}
