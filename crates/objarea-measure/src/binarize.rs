//! Fixed-cutoff binarization.

use crate::threshold::{validate_threshold, validate_view};
use crate::MeasureError;
use objarea_core::{BinaryMask, ImageView, Intensity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the cutoff counts as an object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Samples strictly above the cutoff are foreground.
    #[default]
    Bright,
    /// Samples strictly below the cutoff are foreground.
    Dark,
}

impl Polarity {
    #[inline]
    pub fn is_foreground(self, level: f64, threshold: f64) -> bool {
        match self {
            Polarity::Bright => level > threshold,
            Polarity::Dark => level < threshold,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Polarity::Bright => "bright",
            Polarity::Dark => "dark",
        })
    }
}

impl FromStr for Polarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bright" | "white" => Ok(Polarity::Bright),
            "dark" | "black" => Ok(Polarity::Dark),
            other => Err(format!("unknown polarity `{other}` (expected bright or dark)")),
        }
    }
}

/// Binarize `view` against `threshold`.
///
/// Cells on the `polarity` side of the cutoff become 1, all others 0.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(view), fields(width = view.width, height = view.height))
)]
pub fn binarize<T: Intensity>(
    view: &ImageView<'_, T>,
    threshold: i64,
    polarity: Polarity,
) -> Result<BinaryMask, MeasureError> {
    let threshold = validate_threshold(threshold)?;
    validate_view(view)?;
    let mut mask = BinaryMask::zeros(view.width, view.height)?;
    fill_mask(view, threshold, polarity, &mut mask);
    Ok(mask)
}

/// Like [`binarize`], writing into a preallocated mask of the same shape.
pub fn binarize_into<T: Intensity>(
    view: &ImageView<'_, T>,
    threshold: i64,
    polarity: Polarity,
    out: &mut BinaryMask,
) -> Result<(), MeasureError> {
    let threshold = validate_threshold(threshold)?;
    validate_view(view)?;
    if (out.width(), out.height()) != (view.width, view.height) {
        return Err(MeasureError::DimensionMismatch {
            expected: (view.width, view.height),
            got: (out.width(), out.height()),
        });
    }
    fill_mask(view, threshold, polarity, out);
    Ok(())
}

/// Number of samples on the `polarity` side of `threshold`, without building a mask.
pub fn count_foreground<T: Intensity>(
    view: &ImageView<'_, T>,
    threshold: i64,
    polarity: Polarity,
) -> Result<usize, MeasureError> {
    let threshold = validate_threshold(threshold)? as f64;
    validate_view(view)?;
    Ok(view
        .data
        .iter()
        .filter(|&&v| polarity.is_foreground(v.to_level(), threshold))
        .count())
}

fn fill_mask<T: Intensity>(
    view: &ImageView<'_, T>,
    threshold: u8,
    polarity: Polarity,
    mask: &mut BinaryMask,
) {
    let threshold = threshold as f64;
    let width = view.width;
    mask.refill(|x, y| polarity.is_foreground(view.data[y * width + x].to_level(), threshold));
}
