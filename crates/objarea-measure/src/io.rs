//! JSON configuration and report helpers for measurement runs.

use crate::{MeasureError, MeasureParams, MeasureResult, ObjectArea};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum MeasureIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// On-disk description of one measurement run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasureConfig {
    pub image_path: String,
    /// Where to write the JSON report.
    #[serde(default)]
    pub output_path: Option<String>,
    /// Where to write the label visualization.
    #[serde(default)]
    pub labels_path: Option<String>,
    /// Where to write the binary mask.
    #[serde(default)]
    pub mask_path: Option<String>,
    #[serde(flatten)]
    pub params: MeasureParams,
}

impl MeasureConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, MeasureIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), MeasureIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("objarea_report.json"))
    }
}

/// Summary of one measurement run, suitable for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasureReport {
    pub image_path: String,
    pub width: usize,
    pub height: usize,
    pub params: MeasureParams,
    #[serde(default)]
    pub threshold: Option<u8>,
    #[serde(default)]
    pub num_objects: usize,
    #[serde(default)]
    pub total_pixels: u64,
    #[serde(default)]
    pub coverage_percent: f64,
    #[serde(default)]
    pub total_physical: Option<f64>,
    #[serde(default)]
    pub objects: Vec<ObjectArea>,
    #[serde(default)]
    pub error: Option<String>,
}

impl MeasureReport {
    /// Build an empty report for an image of the given size.
    pub fn new(image_path: impl Into<String>, width: usize, height: usize, params: MeasureParams) -> Self {
        Self {
            image_path: image_path.into(),
            width,
            height,
            params,
            threshold: None,
            num_objects: 0,
            total_pixels: 0,
            coverage_percent: 0.0,
            total_physical: None,
            objects: Vec::new(),
            error: None,
        }
    }

    /// Populate report fields from a successful run.
    pub fn set_result(&mut self, res: &MeasureResult) {
        self.threshold = Some(res.threshold);
        self.num_objects = res.areas.len();
        self.total_pixels = res.areas.total_pixels();
        self.coverage_percent = res.areas.coverage_percent();
        self.total_physical = res.areas.total_physical();
        self.objects = res.areas.objects().to_vec();
        self.error = None;
    }

    /// Record a measurement error.
    pub fn set_error(&mut self, err: &MeasureError) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, MeasureIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), MeasureIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{measure, Polarity, ThresholdMode};
    use objarea_core::GrayImage;

    #[test]
    fn config_parses_flattened_params() {
        let raw = r#"{
            "image_path": "shapes.png",
            "labels_path": "shapes_labeled.png",
            "threshold": { "mode": "fixed", "value": 128 },
            "polarity": "dark",
            "pixels_per_unit": 10.0
        }"#;
        let cfg: MeasureConfig = serde_json::from_str(raw).expect("json");
        assert_eq!(cfg.image_path, "shapes.png");
        assert_eq!(cfg.params.threshold, ThresholdMode::Fixed(128));
        assert_eq!(cfg.params.polarity, Polarity::Dark);
        assert_eq!(cfg.params.pixels_per_unit, Some(10.0));
        assert_eq!(cfg.output_path(), PathBuf::from("objarea_report.json"));
    }

    #[test]
    fn config_defaults_to_automatic_threshold() {
        let cfg: MeasureConfig = serde_json::from_str(r#"{"image_path":"a.png"}"#).expect("json");
        assert_eq!(cfg.params, MeasureParams::default());
    }

    #[test]
    fn written_config_loads_back() {
        let cfg = MeasureConfig {
            image_path: "discs.png".to_string(),
            output_path: Some("discs.json".to_string()),
            labels_path: None,
            mask_path: Some("discs_mask.png".to_string()),
            params: MeasureParams {
                threshold: ThresholdMode::Mean,
                polarity: Polarity::Dark,
                pixels_per_unit: Some(37.8),
            },
        };

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        cfg.write_json(&path).expect("write");
        let loaded = MeasureConfig::load_json(&path).expect("load");

        assert_eq!(loaded.image_path, "discs.png");
        assert_eq!(loaded.output_path(), PathBuf::from("discs.json"));
        assert_eq!(loaded.labels_path, None);
        assert_eq!(loaded.mask_path.as_deref(), Some("discs_mask.png"));
        assert_eq!(loaded.params, cfg.params);
    }

    #[test]
    fn report_round_trips_through_disk() {
        let img = GrayImage::from_vec(4, 1, vec![0, 255, 0, 255]).expect("valid");
        let params = MeasureParams::fixed(100);
        let res = measure(&img.as_view(), &params).expect("measure");

        let mut report = MeasureReport::new("row.png", 4, 1, params);
        report.set_result(&res);

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.json");
        report.write_json(&path).expect("write");
        let loaded = MeasureReport::load_json(&path).expect("load");

        assert_eq!(loaded.threshold, Some(100));
        assert_eq!(loaded.num_objects, 2);
        assert_eq!(loaded.total_pixels, 2);
        assert_eq!(loaded.objects.len(), 2);
        assert!(loaded.error.is_none());
    }

    #[test]
    fn report_records_errors() {
        let mut report = MeasureReport::new("x.png", 0, 0, MeasureParams::default());
        report.set_error(&MeasureError::EmptyInput);
        assert_eq!(
            report.error.as_deref(),
            Some("input raster has zero rows or zero columns")
        );
    }
}
