//! Utility functions for the extraction pipeline.
//!
//! This module provides page image helpers, the debug overlay renderer and
//! logging setup.

pub mod image;
#[cfg(feature = "visualization")]
pub mod visualization;

pub use image::{crop_table, dynamic_to_rgb, load_page_image, resize_page};

/// Initializes the tracing subscriber for logging.
///
/// This function sets up the tracing subscriber with environment filter and formatting layer.
/// It's typically called at the start of an application to enable logging.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
