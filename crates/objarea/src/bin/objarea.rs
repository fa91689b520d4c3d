use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use objarea::image_io::{self, MeasureImageError};
use objarea::measure::io::{MeasureConfig, MeasureReport};
use objarea::measure::select_threshold;
use objarea::{synth, MeasureParams, MeasureResult, Polarity, ThresholdMode};

use log::{info, warn};
use objarea::core::level_for_verbosity;

#[derive(Parser, Debug)]
#[command(name = "objarea", version)]
#[command(about = "Measure the area of objects in grayscale images")]
struct Cli {
    /// Log verbosity: -v info, -vv debug, -vvv trace.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Threshold, label, and measure the objects in one image.
    Measure(MeasureArgs),
    /// Measure an image described by a JSON config and write a JSON report.
    Run {
        config: PathBuf,
    },
    /// Print the automatic (Otsu) threshold of an image.
    Threshold {
        image: PathBuf,
    },
    /// Write the synthetic sample scenes as PNG files.
    Sample {
        out_dir: PathBuf,
    },
}

#[derive(Args, Debug)]
struct MeasureArgs {
    image: PathBuf,

    #[command(flatten)]
    threshold: ThresholdArgs,

    /// Which side of the threshold is an object.
    #[arg(long, default_value_t = Polarity::Bright)]
    polarity: Polarity,

    /// Calibration in pixels per physical unit length.
    #[arg(long)]
    ppu: Option<f64>,

    /// Write the label visualization here.
    #[arg(long)]
    labels_out: Option<PathBuf>,

    /// Write the binary mask here.
    #[arg(long)]
    mask_out: Option<PathBuf>,

    /// Write a JSON report here.
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Args, Debug)]
#[group(multiple = false)]
struct ThresholdArgs {
    /// Fixed threshold in [0, 255].
    #[arg(long, allow_negative_numbers = true)]
    threshold: Option<i64>,

    /// Select the threshold with Otsu's method (default).
    #[arg(long)]
    otsu: bool,

    /// Use the floor of the mean intensity as threshold.
    #[arg(long)]
    mean: bool,
}

impl ThresholdArgs {
    fn mode(&self) -> ThresholdMode {
        match (self.threshold, self.otsu, self.mean) {
            (Some(t), _, _) => ThresholdMode::Fixed(t),
            (None, false, true) => ThresholdMode::Mean,
            _ => ThresholdMode::Otsu,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging(cli.verbose) {
        eprintln!("error: failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    let outcome = match cli.cmd {
        Command::Measure(args) => run_measure(&args),
        Command::Run { config } => run_config(&config),
        Command::Threshold { image } => run_threshold(&image),
        Command::Sample { out_dir } => run_sample(&out_dir),
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(verbose: u8) -> Result<(), Box<dyn std::error::Error>> {
    objarea::core::init_with_level(level_for_verbosity(verbose))?;
    Ok(())
}

/// `RUST_LOG`, when set, takes precedence over `-v`.
#[cfg(feature = "tracing")]
fn init_logging(verbose: u8) -> Result<(), Box<dyn std::error::Error>> {
    objarea::core::init_tracing(level_for_verbosity(verbose), false);
    Ok(())
}

fn run_measure(args: &MeasureArgs) -> Result<(), Box<dyn std::error::Error>> {
    let params = MeasureParams {
        threshold: args.threshold.mode(),
        polarity: args.polarity,
        pixels_per_unit: args.ppu,
    };
    params.validate()?;

    let img = image_io::load_gray(&args.image)?;
    let result = image_io::measure_image(&img, &params)?;

    print!("{}", render_summary(&args.image, &result));

    write_images(&result, args.labels_out.as_deref(), args.mask_out.as_deref())?;
    if let Some(path) = &args.report {
        let mut report = MeasureReport::new(
            args.image.to_string_lossy(),
            img.width() as usize,
            img.height() as usize,
            params,
        );
        report.set_result(&result);
        report.write_json(path)?;
        info!("report written to {}", path.display());
    }
    Ok(())
}

fn run_config(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = MeasureConfig::load_json(config_path)?;
    let img = image_io::load_gray(&cfg.image_path)?;
    let mut report = MeasureReport::new(
        cfg.image_path.clone(),
        img.width() as usize,
        img.height() as usize,
        cfg.params,
    );

    let outcome = image_io::measure_image(&img, &cfg.params);
    match &outcome {
        Ok(result) => {
            report.set_result(result);
            write_images(
                result,
                cfg.labels_path.as_deref().map(Path::new),
                cfg.mask_path.as_deref().map(Path::new),
            )?;
        }
        Err(err) => {
            warn!("measurement failed: {err}");
            report.set_error(err);
        }
    }

    let output = cfg.output_path();
    report.write_json(&output)?;
    info!("report written to {}", output.display());

    outcome?;
    Ok(())
}

fn run_threshold(image: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let img = image_io::load_gray(image)?;
    let t = select_threshold(&image_io::gray_view(&img))?;
    println!("{t}");
    Ok(())
}

fn run_sample(out_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(out_dir)?;
    for (name, img) in synth::presets() {
        let path = out_dir.join(format!("{name}.png"));
        image_io::save_gray(&img, &path)?;
        println!("{}", path.display());
    }
    Ok(())
}

fn write_images(
    result: &MeasureResult,
    labels_out: Option<&Path>,
    mask_out: Option<&Path>,
) -> Result<(), MeasureImageError> {
    if let Some(path) = labels_out {
        image_io::save_labels(&result.labels, path)?;
        info!("label image written to {}", path.display());
    }
    if let Some(path) = mask_out {
        image_io::save_mask(&result.mask, path)?;
        info!("mask written to {}", path.display());
    }
    Ok(())
}

fn render_summary(image: &Path, result: &MeasureResult) -> String {
    let areas = &result.areas;
    let mut out = String::new();
    out.push_str(&format!("image: {}\n", image.display()));
    out.push_str(&format!(
        "threshold: {} ({} objects)\n",
        result.threshold, result.polarity
    ));
    if areas.is_empty() {
        out.push_str("objects: 0\n");
        return out;
    }

    out.push_str(&format!("objects: {}\n", areas.len()));
    out.push_str(&format!("total area: {} px\n", areas.total_pixels()));
    out.push_str(&format!("image size: {} px\n", areas.raster_pixels()));
    out.push_str(&format!("coverage: {:.2}%\n", areas.coverage_percent()));
    if let (Some(total), Some(ppu)) = (areas.total_physical(), areas.pixels_per_unit()) {
        out.push_str(&format!("total physical area: {total:.4} unit^2 (ppu = {ppu})\n"));
    }

    for object in areas.largest_first() {
        let share = areas.share_percent(object.label).unwrap_or(0.0);
        out.push_str(&format!(
            "  object {}: {} px ({:.2}% of objects)",
            object.label, object.pixels, share
        ));
        if let Some(physical) = object.physical {
            out.push_str(&format!(", {physical:.4} unit^2"));
        }
        out.push('\n');
    }
    out
}
