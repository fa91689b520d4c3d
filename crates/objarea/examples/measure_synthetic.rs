use std::{env, fs, path::PathBuf};

use objarea::image_io::{save_gray, save_labels};
use objarea::measure::{measure, MeasureParams, Polarity};
use objarea::synth;

use log::{info, LevelFilter};

#[cfg(feature = "tracing")]
use objarea::core::init_tracing;
#[cfg(not(feature = "tracing"))]
use objarea::core::init_with_level;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(not(feature = "tracing"))]
    init_with_level(LevelFilter::Info)?;

    #[cfg(feature = "tracing")]
    init_tracing(LevelFilter::Info, false);

    let out_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("target/objarea_samples"));
    fs::create_dir_all(&out_dir)?;

    let params = MeasureParams::fixed(128)
        .with_polarity(Polarity::Dark)
        .with_pixels_per_unit(37.8);

    for (name, scene) in synth::presets() {
        let res = measure(&scene.as_view(), &params)?;
        info!(
            "{name}: {} objects, {} px, {:.2}% coverage",
            res.num_objects(),
            res.areas.total_pixels(),
            res.areas.coverage_percent()
        );
        for object in res.areas.largest_first() {
            info!(
                "  object {}: {} px = {:.3} cm^2",
                object.label,
                object.pixels,
                object.physical.unwrap_or_default()
            );
        }

        save_gray(&scene, out_dir.join(format!("{name}.png")))?;
        save_labels(&res.labels, out_dir.join(format!("{name}_labeled.png")))?;
    }
    Ok(())
}
