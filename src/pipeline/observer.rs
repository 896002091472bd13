//! Read-only hooks into page processing.

use crate::processors::{GridGeometry, MappedCell};
use image::RgbImage;
use std::path::Path;

/// Everything known about a page once its cells are mapped.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    pub path: &'a Path,
    /// File stem of the page, used to name derived artifacts.
    pub stem: &'a str,
    /// The full page, after any size normalization.
    pub page: &'a RgbImage,
    pub grid: &'a GridGeometry,
    pub cells: &'a [MappedCell],
}

/// Receives every page before its cells are processed.
///
/// Observers cannot influence extraction; failures must be handled (and
/// logged) inside [`PageObserver::observe`].
pub trait PageObserver: Send + Sync {
    fn observe(&self, view: &PageView<'_>);
}
