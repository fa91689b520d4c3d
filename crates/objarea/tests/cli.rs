use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn objarea() -> Command {
    Command::cargo_bin("objarea").expect("binary built")
}

fn write_samples(dir: &Path) {
    objarea()
        .arg("sample")
        .arg(dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("rectangles.png"));
}

#[test]
fn sample_writes_all_presets() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_samples(dir.path());
    for name in ["discs", "rectangles", "mixed"] {
        assert!(dir.path().join(format!("{name}.png")).is_file(), "{name}");
    }
}

#[test]
fn measure_reports_dark_rectangles() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_samples(dir.path());
    let report = dir.path().join("report.json");
    let labels = dir.path().join("labels.png");
    let mask = dir.path().join("mask.png");

    objarea()
        .arg("measure")
        .arg(dir.path().join("rectangles.png"))
        .args(["--threshold", "128", "--polarity", "dark", "--ppu", "10"])
        .arg("--report")
        .arg(&report)
        .arg("--labels-out")
        .arg(&labels)
        .arg("--mask-out")
        .arg(&mask)
        .assert()
        .success()
        .stdout(predicate::str::contains("objects: 3"))
        .stdout(predicate::str::contains("object 2: 22801 px"))
        .stdout(predicate::str::contains("228.0100 unit^2"));

    assert!(labels.is_file());
    assert!(mask.is_file());

    let raw = fs::read_to_string(&report).expect("report");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(json["num_objects"], 3);
    assert_eq!(json["threshold"], 128);
    assert_eq!(json["total_pixels"], 101 * 101 + 151 * 151 + 131 * 151);
}

#[test]
fn otsu_splits_two_level_scene_at_zero() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_samples(dir.path());

    objarea()
        .arg("measure")
        .arg(dir.path().join("discs.png"))
        .args(["--otsu", "--polarity", "dark"])
        .assert()
        .success()
        .stdout(predicate::str::contains("threshold: 0 (dark objects)"))
        .stdout(predicate::str::contains("objects: 0"));

    // Bright objects at t = 0: the white background is one component.
    objarea()
        .arg("measure")
        .arg(dir.path().join("discs.png"))
        .arg("--otsu")
        .assert()
        .success()
        .stdout(predicate::str::contains("objects: 1"));
}

#[test]
fn threshold_prints_otsu_value() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_samples(dir.path());

    objarea()
        .arg("threshold")
        .arg(dir.path().join("mixed.png"))
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn out_of_range_threshold_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_samples(dir.path());

    objarea()
        .arg("measure")
        .arg(dir.path().join("discs.png"))
        .args(["--threshold", "300"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("threshold 300 is outside [0, 255]"));
}

#[test]
fn conflicting_threshold_flags_are_rejected() {
    objarea()
        .args(["measure", "x.png", "--threshold", "10", "--mean"])
        .assert()
        .failure();
}

#[test]
fn non_positive_scale_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_samples(dir.path());

    objarea()
        .arg("measure")
        .arg(dir.path().join("discs.png"))
        .args(["--ppu", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pixels-per-unit"));
}

#[test]
fn run_writes_report_from_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_samples(dir.path());
    let output = dir.path().join("out.json");
    let config = dir.path().join("config.json");
    let cfg = serde_json::json!({
        "image_path": dir.path().join("mixed.png"),
        "output_path": output,
        "labels_path": dir.path().join("mixed_labeled.png"),
        "threshold": { "mode": "fixed", "value": 128 },
        "polarity": "dark"
    });
    fs::write(&config, cfg.to_string()).expect("write config");

    objarea().arg("run").arg(&config).assert().success();

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).expect("report")).expect("json");
    assert_eq!(report["num_objects"], 2);
    assert!(report["error"].is_null());
    assert!(dir.path().join("mixed_labeled.png").is_file());
}

#[test]
fn verbose_logging_keeps_stdout_clean() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_samples(dir.path());

    objarea()
        .arg("-vv")
        .arg("threshold")
        .arg(dir.path().join("mixed.png"))
        .assert()
        .success()
        .stdout("0\n")
        .stderr(predicate::str::contains("DEBUG] objarea_measure: otsu threshold 0"));
}
