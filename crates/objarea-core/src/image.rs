use crate::error::{checked_len, ImageError};

/// Row-major raster that owns its samples.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T> {
    pub width: usize,
    pub height: usize,
    pub data: Vec<T>, // row-major, len = w*h
}

/// Borrowed row-major raster.
#[derive(Clone, Copy, Debug)]
pub struct ImageView<'a, T> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [T], // row-major, len = w*h
}

pub type GrayImage = Image<u8>;
pub type GrayImageView<'a> = ImageView<'a, u8>;
pub type SampleImage = Image<f64>;
pub type SampleImageView<'a> = ImageView<'a, f64>;

/// A scalar sample that can be placed on the [0, 255] intensity scale.
pub trait Intensity: Copy {
    /// Sample value on the [0, 255] scale. Not clamped.
    fn to_level(self) -> f64;

    /// Nearest integral level, clamped to [0, 255]. NaN maps to 0.
    #[inline]
    fn quantize(self) -> u8 {
        let v = self.to_level();
        if v.is_nan() {
            return 0;
        }
        v.round().clamp(0.0, 255.0) as u8
    }
}

impl Intensity for u8 {
    #[inline]
    fn to_level(self) -> f64 {
        self as f64
    }

    #[inline]
    fn quantize(self) -> u8 {
        self
    }
}

impl Intensity for u16 {
    #[inline]
    fn to_level(self) -> f64 {
        self as f64 / 257.0
    }
}

impl Intensity for f32 {
    #[inline]
    fn to_level(self) -> f64 {
        self as f64
    }
}

impl Intensity for f64 {
    #[inline]
    fn to_level(self) -> f64 {
        self
    }
}

impl<T> Image<T> {
    /// Wrap a row-major buffer, validating its length against `width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(ImageError::InvalidBufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl<T: Clone> Image<T> {
    pub fn new_fill(width: usize, height: usize, value: T) -> Result<Self, ImageError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![value; len],
        })
    }
}

impl<T: Intensity> Image<T> {
    /// Quantize every sample onto the byte scale.
    pub fn quantized(&self) -> GrayImage {
        self.as_view().quantized()
    }
}

impl SampleImage {
    /// Build a sample image from values in [0, 1], rescaled to [0, 255].
    pub fn from_unit_range(width: usize, height: usize, samples: &[f64]) -> Result<Self, ImageError> {
        let data = samples.iter().map(|&v| v * 255.0).collect();
        Self::from_vec(width, height, data)
    }
}

impl<'a, T> ImageView<'a, T> {
    pub fn from_slice(width: usize, height: usize, data: &'a [T]) -> Result<Self, ImageError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(ImageError::InvalidBufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Check that `data` holds exactly `width * height` samples.
    ///
    /// Views built through struct literals skip the check in [`Self::from_slice`].
    pub fn validate(&self) -> Result<(), ImageError> {
        let expected = checked_len(self.width, self.height)?;
        if self.data.len() != expected {
            return Err(ImageError::InvalidBufferLength {
                expected,
                got: self.data.len(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    pub fn row(&self, y: usize) -> &'a [T] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
}

impl<T: Intensity> ImageView<'_, T> {
    pub fn quantized(&self) -> GrayImage {
        GrayImage {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| v.quantize()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = GrayImage::from_vec(3, 2, vec![0; 5]).unwrap_err();
        assert_eq!(
            err,
            ImageError::InvalidBufferLength {
                expected: 6,
                got: 5
            }
        );
    }

    #[test]
    fn literal_view_with_short_buffer_fails_validation() {
        let data = [200u8; 3];
        let view = GrayImageView {
            width: 4,
            height: 4,
            data: &data,
        };
        assert_eq!(
            view.validate(),
            Err(ImageError::InvalidBufferLength {
                expected: 16,
                got: 3
            })
        );
        assert_eq!(GrayImageView::from_slice(3, 1, &data).map(|v| v.validate()), Ok(Ok(())));
    }

    #[test]
    fn zero_sized_image_is_constructible_but_empty() {
        let img = GrayImage::from_vec(0, 4, Vec::new()).expect("valid");
        assert!(img.is_empty());
        assert!(img.as_view().is_empty());
    }

    #[test]
    fn quantize_rounds_and_clamps() {
        assert_eq!(127.4f64.quantize(), 127);
        assert_eq!(127.5f64.quantize(), 128);
        assert_eq!((-3.0f64).quantize(), 0);
        assert_eq!(300.0f32.quantize(), 255);
        assert_eq!(f64::NAN.quantize(), 0);
        assert_eq!(u16::MAX.quantize(), 255);
    }

    #[test]
    fn unit_range_samples_are_rescaled() {
        let img = SampleImage::from_unit_range(2, 1, &[0.0, 1.0]).expect("valid");
        assert_eq!(img.data, vec![0.0, 255.0]);
        assert_eq!(img.quantized().data, vec![0, 255]);
    }

    #[test]
    fn view_accessors_are_row_major() {
        let img = GrayImage::from_vec(3, 2, vec![1, 2, 3, 4, 5, 6]).expect("valid");
        let view = img.as_view();
        assert_eq!(view.get(2, 1), Some(&6));
        assert_eq!(view.get(3, 0), None);
        assert_eq!(view.row(1), &[4, 5, 6]);
    }
}
