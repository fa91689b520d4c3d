use approx::assert_relative_eq;
use objarea::image_io::{
    gray_view, load_gray, measure_file, measure_image, save_gray, save_labels, save_mask, to_image,
};
use objarea::{synth, MeasureParams, Polarity};

#[test]
fn png_round_trip_preserves_samples() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("rect.png");
    let scene = synth::rectangles();

    save_gray(&scene, &path).expect("save");
    let loaded = load_gray(&path).expect("load");

    assert_eq!(loaded.as_raw(), &scene.data);
    assert_eq!(gray_view(&loaded).len(), scene.data.len());
}

#[test]
fn file_and_memory_measurements_agree() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("discs.png");
    let scene = synth::discs();
    save_gray(&scene, &path).expect("save");

    let params = MeasureParams::fixed(128)
        .with_polarity(Polarity::Dark)
        .with_pixels_per_unit(4.0);
    let from_file = measure_file(&path, &params).expect("file");
    let from_memory = measure_image(&to_image(&scene).expect("image"), &params).expect("memory");

    assert_eq!(from_file.areas, from_memory.areas);
    assert_eq!(from_file.num_objects(), 3);
    let first = from_file.areas.get(1).expect("object 1");
    assert_relative_eq!(first.physical.expect("physical"), first.pixels as f64 / 16.0);
}

#[test]
fn label_and_mask_images_are_written() {
    let dir = tempfile::tempdir().expect("tempdir");
    let params = MeasureParams::fixed(128).with_polarity(Polarity::Dark);
    let scene = synth::mixed();
    let res = measure_image(&to_image(&scene).expect("image"), &params).expect("measure");

    let labels_path = dir.path().join("labels.png");
    let mask_path = dir.path().join("mask.png");
    save_labels(&res.labels, &labels_path).expect("labels");
    save_mask(&res.mask, &mask_path).expect("mask");

    let labels = load_gray(&labels_path).expect("load labels");
    let mut levels: Vec<u8> = labels.as_raw().clone();
    levels.sort_unstable();
    levels.dedup();
    assert_eq!(levels, vec![0, 127, 255]);

    let mask = load_gray(&mask_path).expect("load mask");
    let fg = mask.as_raw().iter().filter(|&&v| v == 255).count() as u64;
    assert_eq!(fg, res.areas.total_pixels());
}
