//! High-level facade crate for the `objarea-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the kernel crates
//! - synthetic test scenes ([`synth`])
//! - (feature-gated) helpers that decode image files to grayscale, run the
//!   measurement pipeline, and write masks and label maps back as PNG.
//!
//! ## Quickstart
//!
//! ```no_run
//! use objarea::image_io;
//! use objarea::{MeasureParams, Polarity};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = image_io::load_gray("shapes.png")?;
//! let params = MeasureParams::fixed(128).with_polarity(Polarity::Dark);
//!
//! let result = image_io::measure_image(&img, &params)?;
//! for object in result.areas.largest_first() {
//!     println!("object {}: {} px", object.label, object.pixels);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `objarea::core`: raster types (`Image`, `GrayImage`, `BinaryMask`) and logging.
//! - `objarea::measure`: threshold selection, binarization, labeling, areas, JSON I/O.
//! - `objarea::synth`: filled rectangles, ellipses and polygons; preset scenes.
//! - `objarea::image_io` (feature `image`): bridges to `image::GrayImage` and files.

pub use objarea_core as core;
pub use objarea_measure as measure;

pub use objarea_core::{BinaryMask, GrayImage, GrayImageView, Image, ImageView, Intensity};
pub use objarea_measure::{
    AreaTable, LabelMap, MeasureError, MeasureParams, MeasureResult, ObjectArea, Polarity,
    ThresholdMode,
};

pub mod synth;

#[cfg(feature = "image")]
pub mod image_io;
