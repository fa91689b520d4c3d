use objarea_core::ImageError;

/// Errors returned by the measurement kernel.
///
/// Every variant describes a caller mistake; none is transient.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MeasureError {
    #[error("threshold {0} is outside [0, 255]")]
    InvalidThreshold(i64),
    #[error("pixels-per-unit scale must be positive and finite (got {0})")]
    InvalidScale(f64),
    #[error("input raster has zero rows or zero columns")]
    EmptyInput,
    #[error("dimension mismatch (expected {}x{}, got {}x{})", .expected.0, .expected.1, .got.0, .got.1)]
    DimensionMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    #[error(transparent)]
    Image(#[from] ImageError),
}
