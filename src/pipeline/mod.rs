//! The extraction pipeline.
//!
//! This module drives whole directories of template pages through the grid
//! and cell processors, collects run statistics and exposes the observer hook
//! used by the debug overlay.

mod extractor;
mod observer;
mod stats;

pub use extractor::{PageImage, TemplateExtractor, discover_pages};
pub use observer::{PageObserver, PageView};
pub use stats::{ExtractionStats, PageReport, StatsManager};
