/// Errors raised while constructing raster buffers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("invalid raster buffer length (expected {expected} samples, got {got})")]
    InvalidBufferLength { expected: usize, got: usize },
    #[error("invalid raster dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },
    #[error("mask cell {index} holds {value}, expected 0 or 1")]
    InvalidMaskValue { index: usize, value: u8 },
}

pub(crate) fn checked_len(width: usize, height: usize) -> Result<usize, ImageError> {
    width
        .checked_mul(height)
        .ok_or(ImageError::InvalidDimensions { width, height })
}
