use super::{MeasureParams, MeasureResult};
use crate::threshold::validate_view;
use crate::{binarize, compute_areas, label_components, to_physical, MeasureError};
use log::debug;
use objarea_core::{ImageView, Intensity};

/// Measures objects in grayscale rasters with a fixed, validated configuration.
#[derive(Clone, Debug)]
pub struct ObjectMeasurer {
    params: MeasureParams,
}

impl ObjectMeasurer {
    /// Validate `params` and build a measurer.
    pub fn new(params: MeasureParams) -> Result<Self, MeasureError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &MeasureParams {
        &self.params
    }

    /// Run threshold selection, binarization, labeling, and area aggregation on `view`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "info",
            skip(self, view),
            fields(width = view.width, height = view.height, polarity = %self.params.polarity)
        )
    )]
    pub fn measure<T: Intensity>(
        &self,
        view: &ImageView<'_, T>,
    ) -> Result<MeasureResult, MeasureError> {
        validate_view(view)?;

        let threshold = self.params.threshold.resolve(view)?;
        let mask = binarize(view, threshold as i64, self.params.polarity)?;
        let labels = label_components(&mask)?;
        let mut areas = compute_areas(&labels)?;
        if let Some(ppu) = self.params.pixels_per_unit {
            areas = to_physical(&areas, ppu)?;
        }

        debug!(
            "threshold={threshold} polarity={} objects={} foreground={}",
            self.params.polarity,
            areas.len(),
            areas.total_pixels()
        );

        Ok(MeasureResult {
            threshold,
            polarity: self.params.polarity,
            mask,
            labels,
            areas,
        })
    }
}

/// One-shot measurement of `view` under `params`.
pub fn measure<T: Intensity>(
    view: &ImageView<'_, T>,
    params: &MeasureParams,
) -> Result<MeasureResult, MeasureError> {
    ObjectMeasurer::new(*params)?.measure(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Polarity, ThresholdMode};
    use objarea_core::GrayImage;

    #[test]
    fn configuration_errors_surface_before_work() {
        let img = GrayImage::from_vec(0, 0, Vec::new()).expect("valid");
        let params = MeasureParams::fixed(999);
        assert_eq!(
            measure(&img.as_view(), &params).map(|r| r.threshold),
            Err(MeasureError::InvalidThreshold(999))
        );
    }

    #[test]
    fn long_buffer_is_rejected_before_thresholding() {
        let data = vec![0u8; 10];
        let view = objarea_core::GrayImageView {
            width: 3,
            height: 3,
            data: &data,
        };
        let err = measure(&view, &MeasureParams::fixed(128)).map(|r| r.threshold);
        assert_eq!(
            err,
            Err(MeasureError::Image(objarea_core::ImageError::InvalidBufferLength {
                expected: 9,
                got: 10
            }))
        );
    }

    #[test]
    fn reports_resolved_threshold() {
        let mut data = vec![30u8; 50];
        data.extend(vec![220u8; 50]);
        let img = GrayImage::from_vec(10, 10, data).expect("valid");
        let params = MeasureParams {
            threshold: ThresholdMode::Otsu,
            polarity: Polarity::Bright,
            pixels_per_unit: None,
        };
        let res = measure(&img.as_view(), &params).expect("measure");
        assert_eq!(res.threshold, 30);
        assert_eq!(res.num_objects(), 1);
        assert_eq!(res.areas.total_pixels(), 50);
    }
}
