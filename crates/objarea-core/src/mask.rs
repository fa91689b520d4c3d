//! Two-valued foreground/background raster.

use crate::error::{checked_len, ImageError};
use crate::image::GrayImage;

/// Row-major mask where every cell is exactly 0 (background) or 1 (foreground).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BinaryMask {
    /// All-background mask.
    pub fn zeros(width: usize, height: usize) -> Result<Self, ImageError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Wrap a 0/1 buffer. Any other cell value is rejected.
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(ImageError::InvalidBufferLength {
                expected,
                got: data.len(),
            });
        }
        if let Some((index, &value)) = data.iter().enumerate().find(|(_, v)| **v > 1) {
            return Err(ImageError::InvalidMaskValue { index, value });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a mask by evaluating `f(x, y)` for every cell in row-major order.
    pub fn from_fn(
        width: usize,
        height: usize,
        f: impl FnMut(usize, usize) -> bool,
    ) -> Result<Self, ImageError> {
        let mut mask = Self::zeros(width, height)?;
        mask.refill(f);
        Ok(mask)
    }

    /// Overwrite every cell with `f(x, y)`, row-major.
    pub fn refill(&mut self, mut f: impl FnMut(usize, usize) -> bool) {
        let width = self.width;
        if width == 0 {
            return;
        }
        for (y, row) in self.data.chunks_exact_mut(width).enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = f(x, y) as u8;
            }
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Row-major 0/1 cells.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn is_foreground(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.data[y * self.width + x] != 0
    }

    pub fn set(&mut self, x: usize, y: usize, foreground: bool) {
        assert!(x < self.width && y < self.height, "mask index out of bounds");
        self.data[y * self.width + x] = foreground as u8;
    }

    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// 0/255 rendering for export.
    pub fn to_gray(&self) -> GrayImage {
        GrayImage {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| v * 255).collect(),
        }
    }
}
