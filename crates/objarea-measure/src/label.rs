//! 8-connected component labeling.
//!
//! Foreground cells are grouped by flood fill seeded from a row-major scan.
//! The fill keeps an explicit work-list, so a single component covering the
//! whole raster costs heap space proportional to its size and never deepens
//! the call stack. Labels are dense, `1..=K`, in order of first discovery.

use crate::MeasureError;
use log::debug;
use objarea_core::{BinaryMask, GrayImage, ImageError};

/// Per-cell component labels. 0 is background.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelMap {
    width: usize,
    height: usize,
    labels: Vec<u32>,
    num_labels: u32,
}

impl LabelMap {
    /// All-background map, usable as a reusable buffer for [`label_components_into`].
    pub fn zeros(width: usize, height: usize) -> Result<Self, MeasureError> {
        let len = width
            .checked_mul(height)
            .ok_or(ImageError::InvalidDimensions { width, height })?;
        Ok(Self {
            width,
            height,
            labels: vec![0; len],
            num_labels: 0,
        })
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

    /// Number of components `K`; labels present are exactly `1..=K`.
    pub fn num_labels(&self) -> u32 {
        self.num_labels
    }

    /// Row-major labels.
    pub fn as_slice(&self) -> &[u32] {
        &self.labels
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.labels[y * self.width + x])
    }

    /// Stretch labels over the byte range for display: `label * 255 / K`.
    pub fn to_gray_visualization(&self) -> GrayImage {
        let max = self.num_labels as u64;
        let data = if max == 0 {
            vec![0; self.labels.len()]
        } else {
            self.labels
                .iter()
                .map(|&l| (l as u64 * 255 / max) as u8)
                .collect()
        };
        GrayImage {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

/// Label the 8-connected foreground components of `mask`.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(mask), fields(width = mask.width(), height = mask.height()))
)]
pub fn label_components(mask: &BinaryMask) -> Result<LabelMap, MeasureError> {
    if mask.is_empty() {
        return Err(MeasureError::EmptyInput);
    }
    let mut out = LabelMap::zeros(mask.width(), mask.height())?;
    label_components_into(mask, &mut out)?;
    Ok(out)
}

/// Like [`label_components`], reusing `out` as storage. Returns `K`.
///
/// Any previous contents of `out` are discarded.
pub fn label_components_into(mask: &BinaryMask, out: &mut LabelMap) -> Result<u32, MeasureError> {
    if mask.is_empty() {
        return Err(MeasureError::EmptyInput);
    }
    if (out.width, out.height) != (mask.width(), mask.height()) {
        return Err(MeasureError::DimensionMismatch {
            expected: (mask.width(), mask.height()),
            got: (out.width, out.height),
        });
    }

    let width = mask.width();
    let height = mask.height();
    let cells = mask.as_slice();
    let labels = &mut out.labels;
    labels.fill(0);

    let mut next_label = 0u32;
    let mut stack: Vec<usize> = Vec::new();

    for seed in 0..cells.len() {
        if cells[seed] == 0 || labels[seed] != 0 {
            continue;
        }
        next_label += 1;
        flood_fill(cells, labels, width, height, seed, next_label, &mut stack);
    }

    out.num_labels = next_label;
    debug!("labeled {next_label} components in {width}x{height} mask");
    Ok(next_label)
}

/// Assign `label` to every unlabeled foreground cell 8-connected to `seed`.
///
/// Cells are labeled when pushed, so each enters the work-list at most once.
fn flood_fill(
    cells: &[u8],
    labels: &mut [u32],
    width: usize,
    height: usize,
    seed: usize,
    label: u32,
    stack: &mut Vec<usize>,
) {
    labels[seed] = label;
    stack.push(seed);

    while let Some(idx) = stack.pop() {
        let x = idx % width;
        let y = idx / width;
        let x0 = x.saturating_sub(1);
        let x1 = (x + 1).min(width - 1);
        let y0 = y.saturating_sub(1);
        let y1 = (y + 1).min(height - 1);

        for ny in y0..=y1 {
            let row = ny * width;
            for nx in x0..=x1 {
                let n = row + nx;
                if cells[n] != 0 && labels[n] == 0 {
                    labels[n] = label;
                    stack.push(n);
                }
            }
        }
    }
}
