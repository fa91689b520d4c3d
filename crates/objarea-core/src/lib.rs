//! Raster value types shared by the `objarea-*` crates.
//!
//! This crate holds plain data: row-major images over any [`Intensity`]
//! sample type, the two-valued [`BinaryMask`], and a small logger. It has no
//! knowledge of thresholds, labels, or file formats.

mod error;
mod image;
mod logger;
mod mask;

pub use error::ImageError;
pub use image::{
    GrayImage, GrayImageView, Image, ImageView, Intensity, SampleImage, SampleImageView,
};
pub use mask::BinaryMask;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, level_for_verbosity};
