//! Run statistics.
//!
//! This module defines the per-page [`PageReport`], the run-wide
//! [`ExtractionStats`] and the [`StatsManager`] helper that coordinates
//! thread-safe updates while pages are processed in parallel.

use crate::processors::{CellOutcome, GlyphRecord};
use std::fmt;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

/// Outcome counters of one processed page.
#[derive(Debug, Clone, Default)]
pub struct PageReport {
    pub path: PathBuf,
    /// Name of the character set the page was read with.
    pub charset: String,
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Glyphs written for this page, in raster order.
    pub records: Vec<GlyphRecord>,
}

impl PageReport {
    /// Folds per-cell outcomes into a report.
    pub fn from_outcomes(
        path: PathBuf,
        charset: impl Into<String>,
        outcomes: Vec<CellOutcome>,
    ) -> Self {
        let mut report = Self {
            path,
            charset: charset.into(),
            ..Self::default()
        };
        for outcome in outcomes {
            match outcome {
                CellOutcome::Saved(record) => {
                    report.saved += 1;
                    report.records.push(record);
                }
                CellOutcome::Skipped { .. } => report.skipped += 1,
                CellOutcome::Failed { .. } => report.failed += 1,
            }
        }
        report
    }

    /// Number of cells that were attempted.
    pub fn total(&self) -> usize {
        self.saved + self.skipped + self.failed
    }
}

/// Statistics of one extraction run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionStats {
    /// Pages found in the input directory.
    pub pages_found: usize,
    /// Pages that went through the grid.
    pub pages_processed: usize,
    /// Pages left out: unreadable or without a character set.
    pub pages_skipped: usize,
    pub cells_saved: usize,
    pub cells_skipped: usize,
    pub cells_failed: usize,
    /// Wall-clock time of the run in milliseconds.
    pub elapsed_ms: f64,
}

impl ExtractionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells attempted across all processed pages.
    pub fn cells_total(&self) -> usize {
        self.cells_saved + self.cells_skipped + self.cells_failed
    }

    /// Returns the share of attempted cells that were saved (0.0 to 100.0).
    pub fn success_rate(&self) -> f64 {
        let total = self.cells_total();
        if total == 0 {
            0.0
        } else {
            (self.cells_saved as f64 / total as f64) * 100.0
        }
    }

    /// Counts ignoring the timing, for comparing two runs.
    pub fn counts(&self) -> [usize; 6] {
        [
            self.pages_found,
            self.pages_processed,
            self.pages_skipped,
            self.cells_saved,
            self.cells_skipped,
            self.cells_failed,
        ]
    }
}

impl fmt::Display for ExtractionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Extraction Statistics:")?;
        writeln!(
            f,
            "  Pages: {} found, {} processed, {} skipped",
            self.pages_found, self.pages_processed, self.pages_skipped
        )?;
        writeln!(
            f,
            "  Glyphs saved: {} ({:.1}%)",
            self.cells_saved,
            self.success_rate()
        )?;
        writeln!(f, "  Cells skipped: {}", self.cells_skipped)?;
        writeln!(f, "  Cells failed: {}", self.cells_failed)?;
        writeln!(f, "  Elapsed: {:.2} ms", self.elapsed_ms)?;
        Ok(())
    }
}

/// Thread-safe accumulator for run statistics.
#[derive(Debug, Default)]
pub struct StatsManager {
    stats: Mutex<ExtractionStats>,
}

impl StatsManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the counters, recovering them from a poisoned lock.
    fn lock(&self) -> MutexGuard<'_, ExtractionStats> {
        self.stats.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns a copy of the current statistics snapshot.
    pub fn get_stats(&self) -> ExtractionStats {
        self.lock().clone()
    }

    /// Records the number of pages discovered in the input directory.
    pub fn record_found(&self, pages: usize) {
        self.lock().pages_found += pages;
    }

    /// Adds a processed page.
    pub fn record_page(&self, report: &PageReport) {
        let mut stats = self.lock();
        stats.pages_processed += 1;
        stats.cells_saved += report.saved;
        stats.cells_skipped += report.skipped;
        stats.cells_failed += report.failed;
    }

    /// Adds `count` pages that were left out.
    pub fn record_skipped_pages(&self, count: usize) {
        self.lock().pages_skipped += count;
    }

    /// Sets the run duration.
    pub fn set_elapsed_ms(&self, elapsed_ms: f64) {
        self.lock().elapsed_ms = elapsed_ms;
    }
}
