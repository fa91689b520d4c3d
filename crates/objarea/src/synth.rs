//! Synthetic grayscale scenes for tests and demos.
//!
//! Shapes use inclusive pixel bounding boxes. Drawing clips to the canvas.

use objarea_core::{GrayImage, ImageError};

/// Canvas side used by the preset scenes.
pub const SCENE_SIZE: usize = 400;

/// Uniform canvas.
pub fn canvas(width: usize, height: usize, value: u8) -> Result<GrayImage, ImageError> {
    GrayImage::new_fill(width, height, value)
}

/// Fill the axis-aligned rectangle `[x0, x1] x [y0, y1]`.
pub fn fill_rect(img: &mut GrayImage, x0: usize, y0: usize, x1: usize, y1: usize, value: u8) {
    if img.is_empty() {
        return;
    }
    let x1 = x1.min(img.width - 1);
    let y1 = y1.min(img.height - 1);
    for y in y0..=y1 {
        let row = y * img.width;
        for x in x0..=x1 {
            img.data[row + x] = value;
        }
    }
}

/// Fill the ellipse inscribed in the bounding box `[x0, x1] x [y0, y1]`.
pub fn fill_ellipse(img: &mut GrayImage, x0: usize, y0: usize, x1: usize, y1: usize, value: u8) {
    if img.is_empty() || x1 < x0 || y1 < y0 {
        return;
    }
    let cx = (x0 + x1) as f64 / 2.0;
    let cy = (y0 + y1) as f64 / 2.0;
    let rx = ((x1 - x0) as f64 / 2.0).max(0.5);
    let ry = ((y1 - y0) as f64 / 2.0).max(0.5);

    for y in y0..=y1.min(img.height - 1) {
        let dy = (y as f64 - cy) / ry;
        for x in x0..=x1.min(img.width - 1) {
            let dx = (x as f64 - cx) / rx;
            if dx * dx + dy * dy <= 1.0 {
                img.data[y * img.width + x] = value;
            }
        }
    }
}

/// Fill a simple polygon (even-odd rule, sampled at pixel coordinates).
pub fn fill_polygon(img: &mut GrayImage, vertices: &[(f64, f64)], value: u8) {
    if img.is_empty() || vertices.len() < 3 {
        return;
    }
    let (min_y, max_y) = vertices
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
            (lo.min(y), hi.max(y))
        });
    let (min_x, max_x) = vertices
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(x, _)| {
            (lo.min(x), hi.max(x))
        });

    let y_range = min_y.max(0.0).ceil() as usize..=max_y.min((img.height - 1) as f64).floor() as usize;
    let x_lo = min_x.max(0.0).ceil() as usize;
    let x_hi = max_x.min((img.width - 1) as f64).floor() as usize;

    for y in y_range {
        let py = y as f64;
        for x in x_lo..=x_hi {
            if point_in_polygon(x as f64, py, vertices) {
                img.data[y * img.width + x] = value;
            }
        }
    }
}

fn point_in_polygon(px: f64, py: f64, vertices: &[(f64, f64)]) -> bool {
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (xi, yi) = vertices[i];
        let (xj, yj) = vertices[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Three dark discs on white.
pub fn discs() -> GrayImage {
    let mut img = white_scene();
    fill_ellipse(&mut img, 50, 50, 150, 150, 0);
    fill_ellipse(&mut img, 200, 100, 350, 250, 0);
    fill_ellipse(&mut img, 100, 250, 200, 350, 0);
    img
}

/// Three dark rectangles on white.
pub fn rectangles() -> GrayImage {
    let mut img = white_scene();
    fill_rect(&mut img, 50, 50, 150, 150, 0);
    fill_rect(&mut img, 200, 50, 350, 200, 0);
    fill_rect(&mut img, 50, 200, 180, 350, 0);
    img
}

/// A dark pentagon and a dark disc on white.
pub fn mixed() -> GrayImage {
    let mut img = white_scene();
    fill_polygon(
        &mut img,
        &[
            (100.0, 50.0),
            (200.0, 50.0),
            (250.0, 150.0),
            (150.0, 200.0),
            (50.0, 150.0),
        ],
        0,
    );
    fill_ellipse(&mut img, 200, 200, 350, 350, 0);
    img
}

/// All preset scenes with their file stems.
pub fn presets() -> Vec<(&'static str, GrayImage)> {
    vec![
        ("discs", discs()),
        ("rectangles", rectangles()),
        ("mixed", mixed()),
    ]
}

fn white_scene() -> GrayImage {
    GrayImage {
        width: SCENE_SIZE,
        height: SCENE_SIZE,
        data: vec![255; SCENE_SIZE * SCENE_SIZE],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use objarea_measure::{measure, MeasureParams, Polarity};

    fn dark_objects(img: &GrayImage) -> Vec<u64> {
        let params = MeasureParams::fixed(128).with_polarity(Polarity::Dark);
        let res = measure(&img.as_view(), &params).expect("measure");
        res.areas.iter().map(|o| o.pixels).collect()
    }

    #[test]
    fn rectangles_have_exact_areas() {
        assert_eq!(dark_objects(&rectangles()), vec![101 * 101, 151 * 151, 131 * 151]);
    }

    #[test]
    fn discs_are_three_objects_near_analytic_area() {
        let areas = dark_objects(&discs());
        assert_eq!(areas.len(), 3);
        let expected = std::f64::consts::PI * 50.0 * 50.0;
        let first = areas[0] as f64;
        assert!((first - expected).abs() / expected < 0.03, "area {first}");
    }

    #[test]
    fn mixed_scene_has_two_objects() {
        assert_eq!(dark_objects(&mixed()).len(), 2);
    }

    #[test]
    fn drawing_clips_to_canvas() {
        let mut img = canvas(10, 10, 255).expect("canvas");
        fill_rect(&mut img, 8, 8, 20, 20, 0);
        fill_ellipse(&mut img, 5, 5, 30, 30, 0);
        fill_polygon(&mut img, &[(-5.0, -5.0), (3.0, -5.0), (3.0, 3.0)], 0);
        assert_eq!(img.data[99], 0);
        assert_eq!(img.data.len(), 100);
    }

    #[test]
    fn triangle_polygon_fills_half_square() {
        let mut img = canvas(11, 11, 0).expect("canvas");
        fill_polygon(&mut img, &[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)], 1);
        let filled = img.data.iter().filter(|&&v| v == 1).count();
        assert!((50..=66).contains(&filled), "filled {filled}");
    }
}
