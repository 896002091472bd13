//! Directory-level driver: pages in, glyph images out.
//!
//! [`TemplateExtractor::run`] lists the input directory, assigns a character
//! set to every page, and for each page computes the grid, maps the labels
//! onto its content cells and hands every cell to the [`CellProcessor`].
//! Pages are independent, so they are processed in parallel once the count
//! exceeds the configured threshold; the same holds for the cells of a page.
//!
//! Only a [`GlyphError::Storage`] stops a run. Unreadable pages are skipped
//! and per-cell problems are counted in the page report.

use super::observer::{PageObserver, PageView};
use super::stats::{ExtractionStats, PageReport, StatsManager};
use crate::core::config::{ConfigValidator, ExtractionConfig};
use crate::core::constants::SUPPORTED_PAGE_EXTENSIONS;
use crate::core::errors::{GlyphError, GlyphResult};
use crate::domain::{CharacterSet, PageAssignment};
use crate::processors::{CellOutcome, CellProcessor, GridGeometry, extract_cells};
use crate::utils::image::{load_page_image, resize_page};
use image::RgbImage;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// A decoded page.
#[derive(Debug, Clone)]
pub struct PageImage {
    pub path: PathBuf,
    pub stem: String,
    pub image: RgbImage,
}

impl PageImage {
    /// Wraps an already decoded page.
    pub fn new(path: impl Into<PathBuf>, image: RgbImage) -> Self {
        let path = path.into();
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "page".to_string());
        Self { path, stem, image }
    }

    /// Decodes a page from disk.
    pub fn load(path: &Path) -> GlyphResult<Self> {
        Ok(Self::new(path, load_page_image(path)?))
    }

    /// Resamples the page to `size` when one is given.
    pub fn normalized(self, size: Option<[u32; 2]>) -> GlyphResult<Self> {
        match size {
            Some([width, height]) => {
                let image = resize_page(self.image, width, height)?;
                Ok(Self { image, ..self })
            }
            None => Ok(self),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Lists the page images of `dir` in lexical order.
///
/// Only regular files with a supported extension (compared
/// case-insensitively) are returned.
pub fn discover_pages(dir: &Path) -> GlyphResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(GlyphError::invalid_input(format!(
            "input directory {} does not exist",
            dir.display()
        )));
    }

    let mut pages: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                warn!("Cannot read an entry of {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|path| path.is_file() && is_page_image(path))
        .collect();
    pages.sort();
    Ok(pages)
}

fn is_page_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_PAGE_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

/// Slices template pages into per-character glyph images.
pub struct TemplateExtractor {
    config: ExtractionConfig,
    processor: CellProcessor,
    observers: Vec<Box<dyn PageObserver>>,
}

impl TemplateExtractor {
    /// Validates `config` and builds an extractor.
    ///
    /// With the `visualization` feature, a configured `debug_dir` installs a
    /// [`DebugOverlay`](crate::utils::visualization::DebugOverlay).
    pub fn new(config: ExtractionConfig) -> GlyphResult<Self> {
        config.validate()?;
        let processor = CellProcessor::new(config.processor.clone());

        #[allow(unused_mut)]
        let mut observers: Vec<Box<dyn PageObserver>> = Vec::new();
        match &config.debug_dir {
            #[cfg(feature = "visualization")]
            Some(dir) => observers.push(Box::new(
                crate::utils::visualization::DebugOverlay::with_system_font(dir.clone()),
            )),
            #[cfg(not(feature = "visualization"))]
            Some(dir) => warn!(
                "Debug directory {} ignored: built without the visualization feature",
                dir.display()
            ),
            None => {}
        }

        Ok(Self {
            config,
            processor,
            observers,
        })
    }

    /// Adds a page observer.
    pub fn with_observer(mut self, observer: Box<dyn PageObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Grid of a page under the configured layout.
    pub fn grid_for(&self, page: &PageImage) -> GridGeometry {
        let (width, height) = page.dimensions();
        GridGeometry::compute(&self.config.layout, width, height)
    }

    /// Extracts every mapped cell of one page.
    ///
    /// # Errors
    ///
    /// Only a [`GlyphError::Storage`] from the cell processor is returned;
    /// everything else is counted in the report.
    pub fn process_page(&self, page: &PageImage, charset: &CharacterSet) -> GlyphResult<PageReport> {
        let grid = self.grid_for(page);
        let cells = extract_cells(&grid, charset);
        debug!(
            "Page {}: table {}x{} at ({}, {}), {} cells",
            page.stem,
            grid.table_width,
            grid.table_height,
            grid.table_left,
            grid.table_top,
            cells.len()
        );

        let view = PageView {
            path: &page.path,
            stem: &page.stem,
            page: &page.image,
            grid: &grid,
            cells: &cells,
        };
        for observer in &self.observers {
            observer.observe(&view);
        }

        let outcomes: Vec<CellOutcome> = if self.config.parallel.parallel_cells(cells.len()) {
            cells
                .par_iter()
                .map(|cell| self.processor.process(&page.image, &grid, cell))
                .collect::<GlyphResult<_>>()?
        } else {
            cells
                .iter()
                .map(|cell| self.processor.process(&page.image, &grid, cell))
                .collect::<GlyphResult<_>>()?
        };

        Ok(PageReport::from_outcomes(
            page.path.clone(),
            charset.name.clone(),
            outcomes,
        ))
    }

    /// Processes every page of `input_dir`.
    ///
    /// Running twice over the same output directories overwrites the glyphs
    /// and yields the same counts.
    pub fn run(&self, input_dir: &Path) -> GlyphResult<ExtractionStats> {
        let start = Instant::now();
        let pages = discover_pages(input_dir)?;
        info!("Found {} page images in {}", pages.len(), input_dir.display());

        let stats = StatsManager::new();
        stats.record_found(pages.len());

        let assignments = self.config.registry.assign(&pages);
        stats.record_skipped_pages(pages.len() - assignments.len());

        match self.config.parallel.max_threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| {
                        GlyphError::config_error_with_context(
                            "parallel.max_threads",
                            &threads.to_string(),
                            &format!("cannot build thread pool: {e}"),
                        )
                    })?;
                pool.install(|| self.run_pages(&assignments, &stats))?;
            }
            None => self.run_pages(&assignments, &stats)?,
        }

        stats.set_elapsed_ms(start.elapsed().as_secs_f64() * 1000.0);
        let result = stats.get_stats();
        info!(
            "Extraction finished: {} glyphs from {} pages",
            result.cells_saved, result.pages_processed
        );
        Ok(result)
    }

    fn run_pages(
        &self,
        assignments: &[PageAssignment<'_>],
        stats: &StatsManager,
    ) -> GlyphResult<()> {
        if self.config.parallel.parallel_pages(assignments.len()) {
            assignments
                .par_iter()
                .try_for_each(|assignment| self.run_page(assignment, stats))
        } else {
            assignments
                .iter()
                .try_for_each(|assignment| self.run_page(assignment, stats))
        }
    }

    fn run_page(&self, assignment: &PageAssignment<'_>, stats: &StatsManager) -> GlyphResult<()> {
        let page = match PageImage::load(&assignment.path)
            .and_then(|page| page.normalized(self.config.page_size))
        {
            Ok(page) => page,
            Err(e) => {
                warn!("Skipping unreadable page {}: {}", assignment.path.display(), e);
                stats.record_skipped_pages(1);
                return Ok(());
            }
        };

        let report = match self.process_page(&page, assignment.charset) {
            Ok(report) => report,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!("Skipping page {}: {}", page.stem, e);
                stats.record_skipped_pages(1);
                return Ok(());
            }
        };
        info!(
            "Page {} ({}): {} saved, {} skipped, {} failed",
            page.stem, report.charset, report.saved, report.skipped, report.failed
        );
        stats.record_page(&report);
        Ok(())
    }
}

impl std::fmt::Debug for TemplateExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateExtractor")
            .field("config", &self.config)
            .field("observers", &self.observers.len())
            .finish()
    }
}
