//! Bridges between `image::GrayImage`, files on disk, and the measurement kernel.

use crate::core;
use crate::measure::{self, LabelMap, MeasureError, MeasureParams, MeasureResult};
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the file and buffer helpers.
#[derive(thiserror::Error, Debug)]
pub enum MeasureImageError {
    #[error("invalid grayscale image buffer length (expected {expected} bytes, got {got})")]
    InvalidGrayBuffer { expected: usize, got: usize },

    #[error("invalid grayscale image dimensions (width={width}, height={height})")]
    InvalidGrayDimensions { width: usize, height: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Decode(#[from] ::image::ImageError),

    #[error(transparent)]
    Measure(#[from] MeasureError),
}

/// Borrow an `image::GrayImage` as the lightweight core view type.
pub fn gray_view(img: &::image::GrayImage) -> core::GrayImageView<'_> {
    core::GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Build an `image::GrayImage` from a raw row-major buffer.
pub fn gray_image_from_slice(
    width: usize,
    height: usize,
    pixels: &[u8],
) -> Result<::image::GrayImage, MeasureImageError> {
    let dims = u32::try_from(width).ok().zip(u32::try_from(height).ok());
    let Some((w, h)) = dims else {
        return Err(MeasureImageError::InvalidGrayDimensions { width, height });
    };
    let Some(expected) = width.checked_mul(height) else {
        return Err(MeasureImageError::InvalidGrayDimensions { width, height });
    };
    if pixels.len() != expected {
        return Err(MeasureImageError::InvalidGrayBuffer {
            expected,
            got: pixels.len(),
        });
    }
    ::image::GrayImage::from_raw(w, h, pixels.to_vec())
        .ok_or(MeasureImageError::InvalidGrayDimensions { width, height })
}

/// Convert a core raster into an `image::GrayImage`.
pub fn to_image(img: &core::GrayImage) -> Result<::image::GrayImage, MeasureImageError> {
    gray_image_from_slice(img.width, img.height, &img.data)
}

/// Decode any supported image file and convert it to 8-bit luma.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(path)))]
pub fn load_gray(path: impl AsRef<Path>) -> Result<::image::GrayImage, MeasureImageError> {
    Ok(::image::ImageReader::open(path)?.decode()?.to_luma8())
}

/// Write a core raster to disk; the format follows the file extension.
pub fn save_gray(img: &core::GrayImage, path: impl AsRef<Path>) -> Result<(), MeasureImageError> {
    to_image(img)?.save(path)?;
    Ok(())
}

/// Write a binary mask as a 0/255 image.
pub fn save_mask(mask: &core::BinaryMask, path: impl AsRef<Path>) -> Result<(), MeasureImageError> {
    save_gray(&mask.to_gray(), path)
}

/// Write a label map, labels stretched over the byte range.
pub fn save_labels(labels: &LabelMap, path: impl AsRef<Path>) -> Result<(), MeasureImageError> {
    save_gray(&labels.to_gray_visualization(), path)
}

/// Run the measurement pipeline on an `image::GrayImage`.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(img, params),
        fields(width = img.width(), height = img.height())
    )
)]
pub fn measure_image(
    img: &::image::GrayImage,
    params: &MeasureParams,
) -> Result<MeasureResult, MeasureError> {
    measure::measure(&gray_view(img), params)
}

/// Decode `path` and measure it.
pub fn measure_file(
    path: impl AsRef<Path>,
    params: &MeasureParams,
) -> Result<MeasureResult, MeasureImageError> {
    let img = load_gray(path)?;
    Ok(measure_image(&img, params)?)
}
