//! Threshold selection for binarization.

use crate::MeasureError;
use log::{debug, warn};
use objarea_core::{ImageView, Intensity};
use serde::{Deserialize, Serialize};

/// Number of intensity levels in a byte histogram.
pub const LEVELS: usize = 256;

/// How the binarization cutoff is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "mode", content = "value")]
pub enum ThresholdMode {
    /// Caller-supplied cutoff. Must lie in [0, 255].
    Fixed(i64),
    /// Otsu's between-class variance maximization.
    #[default]
    #[serde(alias = "automatic")]
    Otsu,
    /// Floor of the mean intensity.
    Mean,
}

impl ThresholdMode {
    /// Resolve the mode into a concrete cutoff for `view`.
    ///
    /// A fixed cutoff outside [0, 255] is rejected, never clamped.
    pub fn resolve<T: Intensity>(&self, view: &ImageView<'_, T>) -> Result<u8, MeasureError> {
        match *self {
            ThresholdMode::Fixed(t) => validate_threshold(t),
            ThresholdMode::Otsu => select_threshold(view),
            ThresholdMode::Mean => mean_threshold(view),
        }
    }
}

pub(crate) fn validate_threshold(threshold: i64) -> Result<u8, MeasureError> {
    u8::try_from(threshold).map_err(|_| MeasureError::InvalidThreshold(threshold))
}

/// Reject empty views and views whose buffer disagrees with their shape.
pub(crate) fn validate_view<T>(view: &ImageView<'_, T>) -> Result<(), MeasureError> {
    if view.is_empty() {
        return Err(MeasureError::EmptyInput);
    }
    view.validate()?;
    Ok(())
}

/// 256-bin occurrence histogram of the quantized samples.
pub fn histogram<T: Intensity>(view: &ImageView<'_, T>) -> [u64; LEVELS] {
    let mut hist = [0u64; LEVELS];
    for &v in view.data {
        hist[v.quantize() as usize] += 1;
    }
    hist
}

/// Optimal cutoff by Otsu's method.
///
/// Builds the histogram in one pass over the raster, then scans the 256
/// candidate cutoffs. Returns 0 when every sample falls in one bin.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(view), fields(width = view.width, height = view.height))
)]
pub fn select_threshold<T: Intensity>(view: &ImageView<'_, T>) -> Result<u8, MeasureError> {
    validate_view(view)?;
    let hist = histogram(view);
    let threshold = otsu_threshold_from_histogram(&hist);
    debug!("otsu threshold {threshold} over {} samples", view.len());
    Ok(threshold)
}

/// Otsu's cutoff from a precomputed histogram.
///
/// With `p[t]` the probability mass of level `t`, a candidate `t` splits the
/// mass into background `[0, t]` with weight `w_b` and mean `m_b`, and
/// foreground `(t, 255]` with weight `w_f = 1 - w_b` and mean `m_f`. The
/// chosen `t` maximizes `w_b * w_f * (m_b - m_f)^2`. Candidates with all the
/// mass on one side are skipped. Ties keep the lowest `t`.
pub fn otsu_threshold_from_histogram(hist: &[u64; LEVELS]) -> u8 {
    let total: u64 = hist.iter().sum();
    if total == 0 {
        return 0;
    }

    let n = total as f64;
    let mut weighted_total = 0u64;
    for (t, &h) in hist.iter().enumerate() {
        weighted_total += t as u64 * h;
    }
    let mean = weighted_total as f64 / n;

    let mut count_b = 0u64;
    let mut weighted_b = 0u64;
    let mut best: Option<(u8, f64)> = None;

    for (t, &h) in hist.iter().enumerate() {
        count_b += h;
        weighted_b += t as u64 * h;
        if count_b == 0 || count_b == total {
            continue;
        }

        let w_b = count_b as f64 / n;
        let w_f = (total - count_b) as f64 / n;
        let s_b = weighted_b as f64 / n;
        let m_b = s_b / w_b;
        let m_f = (mean - s_b) / w_f;

        let var_between = w_b * w_f * (m_b - m_f) * (m_b - m_f);
        if best.is_none_or(|(_, best_var)| var_between > best_var) {
            best = Some((t as u8, var_between));
        }
    }

    match best {
        Some((t, _)) => t,
        None => {
            warn!("histogram has a single occupied bin; no valid otsu split");
            0
        }
    }
}

/// Floor of the mean sample level, clamped to [0, 255].
pub fn mean_threshold<T: Intensity>(view: &ImageView<'_, T>) -> Result<u8, MeasureError> {
    validate_view(view)?;
    let sum: f64 = view.data.iter().map(|&v| v.to_level()).sum();
    let mean = sum / view.len() as f64;
    let threshold = if mean.is_nan() {
        0
    } else {
        mean.floor().clamp(0.0, 255.0) as u8
    };
    debug!("mean threshold {threshold} (mean level {mean:.3})");
    Ok(threshold)
}
