//! Shared parallel processing configuration types.

use serde::{Deserialize, Serialize};

/// Controls when pages and cells are processed on the rayon pool.
///
/// Pages share nothing but idempotent directory creation, so both levels can
/// run concurrently; small batches stay sequential to keep logs readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelPolicy {
    /// Maximum number of threads to use for parallel processing.
    /// If None, rayon's global pool is used.
    #[serde(default)]
    pub max_threads: Option<usize>,

    /// Number of pages processed sequentially (<= this uses sequential).
    #[serde(default = "ParallelPolicy::default_page_threshold")]
    pub page_threshold: usize,

    /// Number of cells on one page processed sequentially (<= this uses sequential).
    #[serde(default = "ParallelPolicy::default_cell_threshold")]
    pub cell_threshold: usize,
}

impl ParallelPolicy {
    /// Create a new ParallelPolicy with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// A policy that never leaves the calling thread.
    pub fn sequential() -> Self {
        Self {
            max_threads: None,
            page_threshold: usize::MAX,
            cell_threshold: usize::MAX,
        }
    }

    /// Set the maximum number of threads.
    pub fn with_max_threads(mut self, max_threads: Option<usize>) -> Self {
        self.max_threads = max_threads;
        self
    }

    /// Set the page threshold.
    pub fn with_page_threshold(mut self, threshold: usize) -> Self {
        self.page_threshold = threshold;
        self
    }

    /// Set the cell threshold.
    pub fn with_cell_threshold(mut self, threshold: usize) -> Self {
        self.cell_threshold = threshold;
        self
    }

    /// Whether `count` pages should be processed in parallel.
    pub fn parallel_pages(&self, count: usize) -> bool {
        count > self.page_threshold
    }

    /// Whether `count` cells should be processed in parallel.
    pub fn parallel_cells(&self, count: usize) -> bool {
        count > self.cell_threshold
    }

    fn default_page_threshold() -> usize {
        1
    }

    fn default_cell_threshold() -> usize {
        crate::core::constants::DEFAULT_PARALLEL_THRESHOLD
    }
}

impl Default for ParallelPolicy {
    fn default() -> Self {
        Self {
            max_threads: None,
            page_threshold: Self::default_page_threshold(),
            cell_threshold: Self::default_cell_threshold(),
        }
    }
}
