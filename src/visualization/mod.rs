//! Scatter plot rendering for light curves.
//!
//! Renders a light curve as a borderless PNG scatter plot using the
//! plotters library. Every call builds a fresh drawing backend, so no
//! canvas state survives between files and renders may run in parallel.

use std::path::Path;

use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use thiserror::Error;

use crate::config::{MarkerStyle, PlotConfig};
use crate::core::loaders::LightCurve;

/// Errors that can occur during rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Plotting error: {0}")]
    Plotting(String),
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Chart range used when a curve has no records, so an empty table still
/// produces a valid blank image.
const EMPTY_RANGE: (f64, f64, f64, f64) = (0.0, 1.0, 0.0, 1.0);

/// Render a light curve as a scatter plot PNG.
///
/// Each record contributes one unconnected marker at `(time, flux)`. The
/// image carries no axes, tick marks, labels, or borders: only the markers
/// on a white background, with the chart range fitted to the data and a
/// margin of one marker size around it. An empty curve produces a blank
/// image.
///
/// # Errors
///
/// Fails if the image cannot be written, including when the output
/// directory does not exist. Parent directories are not created.
pub fn render_scatter(curve: &LightCurve, output_path: &Path, config: &PlotConfig) -> Result<()> {
    let (width, height) = config.image_dimensions();
    let (x_min, x_max, y_min, y_max) = data_bounds(curve);

    let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| RenderError::Plotting(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(config.marker_size as i32)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| RenderError::Plotting(e.to_string()))?;

    // No mesh configuration: leaving it out keeps axis lines, ticks and
    // labels off the canvas entirely.

    let size = config.marker_size as i32;

    match config.marker {
        MarkerStyle::Cross => chart.draw_series(
            curve
                .iter()
                .map(|(t, f)| Cross::new((t, f), size, BLACK.stroke_width(1))),
        ),
        MarkerStyle::Circle => chart.draw_series(
            curve
                .iter()
                .map(|(t, f)| Circle::new((t, f), size, BLACK.filled())),
        ),
        MarkerStyle::Triangle => chart.draw_series(
            curve
                .iter()
                .map(|(t, f)| TriangleMarker::new((t, f), size, BLACK.filled())),
        ),
    }
    .map_err(|e| RenderError::Plotting(e.to_string()))?;

    root.present()
        .map_err(|e| RenderError::Plotting(e.to_string()))?;

    Ok(())
}

/// Compute the chart range for a curve.
///
/// The range hugs the data exactly. Degenerate spans are widened so the
/// chart always has a non-zero extent, and an empty curve falls back to a
/// unit range.
fn data_bounds(curve: &LightCurve) -> (f64, f64, f64, f64) {
    if curve.is_empty() {
        return EMPTY_RANGE;
    }

    let mut x_min = f64::MAX;
    let mut x_max = f64::MIN;
    let mut y_min = f64::MAX;
    let mut y_max = f64::MIN;

    for (t, f) in curve.iter() {
        if t < x_min {
            x_min = t;
        }
        if t > x_max {
            x_max = t;
        }
        if f < y_min {
            y_min = f;
        }
        if f > y_max {
            y_max = f;
        }
    }

    if (x_max - x_min).abs() < f64::EPSILON {
        x_min -= 1.0;
        x_max += 1.0;
    }
    if (y_max - y_min).abs() < f64::EPSILON {
        y_min -= 1.0;
        y_max += 1.0;
    }

    (x_min, x_max, y_min, y_max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Small canvas keeps the pixel assertions fast: 160x120 at 25 DPI.
    fn test_config() -> PlotConfig {
        PlotConfig {
            dpi: 25,
            ..PlotConfig::default()
        }
    }

    fn sample_curve() -> LightCurve {
        let mut curve = LightCurve::new();
        curve.push(1.0, 2.0);
        curve.push(2.0, 1.5);
        curve.push(3.0, 4.5);
        curve
    }

    fn is_blank(path: &Path) -> bool {
        let img = image::open(path).unwrap().to_rgb8();
        img.pixels().all(|p| p.0 == [255, 255, 255])
    }

    #[test]
    fn test_render_writes_markers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("curve.png");

        render_scatter(&sample_curve(), &path, &test_config()).unwrap();

        assert!(path.exists());
        assert!(!is_blank(&path));
    }

    #[test]
    fn test_image_dimensions_follow_dpi() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("curve.png");

        render_scatter(&sample_curve(), &path, &test_config()).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!(img.width(), 160);
        assert_eq!(img.height(), 120);
    }

    #[test]
    fn test_empty_curve_renders_blank_image() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.png");

        render_scatter(&LightCurve::new(), &path, &test_config()).unwrap();

        assert!(path.exists());
        assert!(is_blank(&path));
    }

    #[test]
    fn test_canvas_is_fresh_per_render() {
        // A populated render followed by an empty one must leave no
        // markers behind on the second canvas.
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.png");
        let second = dir.path().join("second.png");
        let config = test_config();

        render_scatter(&sample_curve(), &first, &config).unwrap();
        render_scatter(&LightCurve::new(), &second, &config).unwrap();

        assert!(!is_blank(&first));
        assert!(is_blank(&second));
    }

    #[test]
    fn test_single_record_renders() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("single.png");

        let mut curve = LightCurve::new();
        curve.push(5.0, 5.0);

        render_scatter(&curve, &path, &test_config()).unwrap();
        assert!(!is_blank(&path));
    }

    #[test]
    fn test_all_marker_styles_render() {
        let dir = TempDir::new().unwrap();
        let curve = sample_curve();

        for (i, marker) in [MarkerStyle::Cross, MarkerStyle::Circle, MarkerStyle::Triangle]
            .into_iter()
            .enumerate()
        {
            let path = dir.path().join(format!("m{}.png", i));
            let config = PlotConfig {
                marker,
                ..test_config()
            };
            render_scatter(&curve, &path, &config).unwrap();
            assert!(!is_blank(&path));
        }
    }

    #[test]
    fn test_missing_output_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent").join("curve.png");

        let result = render_scatter(&sample_curve(), &path, &test_config());
        assert!(matches!(result, Err(RenderError::Plotting(_))));
    }
}
