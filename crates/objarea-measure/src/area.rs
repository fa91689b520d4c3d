//! Per-object pixel areas and their physical-unit conversion.

use crate::{LabelMap, MeasureError};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Area of one labeled object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectArea {
    pub label: u32,
    /// Number of cells carrying `label`.
    pub pixels: u64,
    /// Area in squared physical units, when a scale was applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical: Option<f64>,
}

/// Object areas keyed by label, in ascending label order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AreaTable {
    objects: Vec<ObjectArea>,
    raster_pixels: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pixels_per_unit: Option<f64>,
}

impl AreaTable {
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ObjectArea> {
        self.objects.iter()
    }

    pub fn objects(&self) -> &[ObjectArea] {
        &self.objects
    }

    pub fn get(&self, label: u32) -> Option<&ObjectArea> {
        self.objects
            .binary_search_by_key(&label, |o| o.label)
            .ok()
            .map(|i| &self.objects[i])
    }

    /// Scale used by [`to_physical`], if any.
    pub fn pixels_per_unit(&self) -> Option<f64> {
        self.pixels_per_unit
    }

    /// Sum of object areas; equals the foreground cell count of the source mask.
    pub fn total_pixels(&self) -> u64 {
        self.objects.iter().map(|o| o.pixels).sum()
    }

    /// Cell count of the labeled raster, background included.
    pub fn raster_pixels(&self) -> u64 {
        self.raster_pixels
    }

    /// Share of the raster covered by objects, in percent.
    pub fn coverage_percent(&self) -> f64 {
        if self.raster_pixels == 0 {
            return 0.0;
        }
        self.total_pixels() as f64 * 100.0 / self.raster_pixels as f64
    }

    /// Share of the total object area held by `label`, in percent.
    pub fn share_percent(&self, label: u32) -> Option<f64> {
        let total = self.total_pixels();
        self.get(label)
            .map(|o| o.pixels as f64 * 100.0 / total as f64)
    }

    /// Total physical area, when a scale was applied.
    pub fn total_physical(&self) -> Option<f64> {
        self.pixels_per_unit?;
        Some(self.objects.iter().filter_map(|o| o.physical).sum())
    }

    /// Objects ordered by area, largest first; equal areas by label.
    pub fn largest_first(&self) -> Vec<ObjectArea> {
        let mut sorted = self.objects.clone();
        sorted.sort_by(|a, b| b.pixels.cmp(&a.pixels).then(a.label.cmp(&b.label)));
        sorted
    }
}

impl<'a> IntoIterator for &'a AreaTable {
    type Item = &'a ObjectArea;
    type IntoIter = std::slice::Iter<'a, ObjectArea>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}

/// Count cells per positive label. Background is excluded.
///
/// A map without objects gives an empty table.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(labels), fields(num_labels = labels.num_labels()))
)]
pub fn compute_areas(labels: &LabelMap) -> Result<AreaTable, MeasureError> {
    if labels.is_empty() {
        return Err(MeasureError::EmptyInput);
    }

    let mut counts = vec![0u64; labels.num_labels() as usize + 1];
    for &l in labels.as_slice() {
        counts[l as usize] += 1;
    }

    let objects: Vec<ObjectArea> = counts
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, c)| **c > 0)
        .map(|(label, &pixels)| ObjectArea {
            label: label as u32,
            pixels,
            physical: None,
        })
        .collect();

    if objects.is_empty() {
        warn!("no objects found");
    } else {
        debug!(
            "{} objects covering {} of {} cells",
            objects.len(),
            objects.iter().map(|o| o.pixels).sum::<u64>(),
            labels.as_slice().len()
        );
    }

    Ok(AreaTable {
        objects,
        raster_pixels: labels.as_slice().len() as u64,
        pixels_per_unit: None,
    })
}

/// Attach physical areas: `pixels / ppu^2`, with `ppu` in pixels per unit length.
pub fn to_physical(table: &AreaTable, pixels_per_unit: f64) -> Result<AreaTable, MeasureError> {
    if !pixels_per_unit.is_finite() || pixels_per_unit <= 0.0 {
        return Err(MeasureError::InvalidScale(pixels_per_unit));
    }
    let unit_cell = pixels_per_unit * pixels_per_unit;
    let objects = table
        .objects
        .iter()
        .map(|o| ObjectArea {
            physical: Some(o.pixels as f64 / unit_cell),
            ..*o
        })
        .collect();
    Ok(AreaTable {
        objects,
        raster_pixels: table.raster_pixels,
        pixels_per_unit: Some(pixels_per_unit),
    })
}
