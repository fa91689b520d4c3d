//! Binary object measurement on grayscale rasters.
//!
//! The crate turns a grayscale raster into per-object areas in four stages:
//!
//! 1. [`ThresholdMode::resolve`] picks a cutoff: fixed, Otsu ([`select_threshold`]), or mean.
//! 2. [`binarize`] maps samples to a 0/1 [`BinaryMask`](objarea_core::BinaryMask).
//! 3. [`label_components`] assigns dense labels to 8-connected foreground groups.
//! 4. [`compute_areas`] counts cells per label; [`to_physical`] applies a
//!    pixels-per-unit calibration.
//!
//! [`measure`] chains the four stages. All functions are pure: each returns a
//! fresh value and keeps no state between calls.

mod area;
mod binarize;
mod error;
pub mod io;
mod label;
mod measure;
mod threshold;

pub use area::{compute_areas, to_physical, AreaTable, ObjectArea};
pub use binarize::{binarize, binarize_into, count_foreground, Polarity};
pub use error::MeasureError;
pub use label::{label_components, label_components_into, LabelMap};
pub use measure::{measure, MeasureParams, MeasureResult, ObjectMeasurer};
pub use threshold::{
    histogram, mean_threshold, otsu_threshold_from_histogram, select_threshold, ThresholdMode,
    LEVELS,
};
