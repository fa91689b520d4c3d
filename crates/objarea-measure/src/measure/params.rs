use crate::threshold::validate_threshold;
use crate::{MeasureError, Polarity, ThresholdMode};
use serde::{Deserialize, Serialize};

/// Configuration for a measurement run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureParams {
    /// How the binarization cutoff is chosen.
    pub threshold: ThresholdMode,
    /// Which side of the cutoff is an object.
    pub polarity: Polarity,
    /// Calibration in pixels per physical unit length. When set, areas are
    /// also reported in squared units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixels_per_unit: Option<f64>,
}

impl MeasureParams {
    /// Fixed cutoff with bright objects.
    pub fn fixed(threshold: i64) -> Self {
        Self {
            threshold: ThresholdMode::Fixed(threshold),
            ..Self::default()
        }
    }

    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    pub fn with_pixels_per_unit(mut self, pixels_per_unit: f64) -> Self {
        self.pixels_per_unit = Some(pixels_per_unit);
        self
    }

    /// Reject out-of-range thresholds and non-positive scales.
    pub fn validate(&self) -> Result<(), MeasureError> {
        if let ThresholdMode::Fixed(t) = self.threshold {
            validate_threshold(t)?;
        }
        if let Some(ppu) = self.pixels_per_unit {
            if !ppu.is_finite() || ppu <= 0.0 {
                return Err(MeasureError::InvalidScale(ppu));
            }
        }
        Ok(())
    }
}
