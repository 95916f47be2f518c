use std::path::Path;

use plotters::prelude::*;

use crate::error::PlotError;

// ---------------------------------------------------------------------------
// Plot description
// ---------------------------------------------------------------------------

/// The x-axis series. Line plots often run over an ordered non-numeric axis
/// (dates as text, category labels), so the axis is either numeric values or
/// ordinal positions carrying their labels.
#[derive(Debug, Clone)]
pub enum XSeries {
    Numeric(Vec<f64>),
    Ordinal(Vec<String>),
}

/// Everything the renderer needs for one chart.
#[derive(Debug, Clone)]
pub struct PlotSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x: XSeries,
    pub y: Vec<f64>,
}

/// A finished chart held as an RGB pixel buffer, ready to persist.
#[derive(Debug, Clone)]
pub struct RenderedPlot {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Renderer seam
// ---------------------------------------------------------------------------

/// The rendering collaborator. Split from the session so the session logic
/// runs under test without drawing a single pixel.
pub trait Renderer {
    /// Draw the chart into memory. Non-retryable.
    fn render(&mut self, spec: &PlotSpec) -> Result<RenderedPlot, PlotError>;

    /// Write an already-rendered chart to disk.
    fn persist(&mut self, plot: &RenderedPlot, path: &Path) -> Result<(), PlotError>;
}

// ---------------------------------------------------------------------------
// Save-name normalization
// ---------------------------------------------------------------------------

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "svg", "pdf"];

/// Append `.png` when the filename lacks a recognized image extension;
/// recognized names pass through untouched.
pub fn normalize_save_name(name: &str) -> String {
    let recognized = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false);
    if recognized {
        name.to_string()
    } else {
        format!("{name}.png")
    }
}

// ---------------------------------------------------------------------------
// Bitmap renderer (plotters)
// ---------------------------------------------------------------------------

/// Offscreen line-chart renderer backed by plotters' bitmap backend.
pub struct BitmapRenderer {
    width: u32,
    height: u32,
}

impl Default for BitmapRenderer {
    fn default() -> Self {
        BitmapRenderer {
            width: 1024,
            height: 768,
        }
    }
}

impl Renderer for BitmapRenderer {
    fn render(&mut self, spec: &PlotSpec) -> Result<RenderedPlot, PlotError> {
        let (width, height) = (self.width, self.height);
        let mut pixels = vec![0u8; (width * height * 3) as usize];
        {
            let root =
                BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| PlotError::render(e.to_string()))?;

            match &spec.x {
                XSeries::Numeric(xs) => draw_line_chart(&root, spec, xs.clone(), None)?,
                XSeries::Ordinal(labels) => {
                    let positions = (0..labels.len()).map(|i| i as f64).collect();
                    draw_line_chart(&root, spec, positions, Some(labels.clone()))?
                }
            }

            root.present()
                .map_err(|e| PlotError::render(e.to_string()))?;
        }
        Ok(RenderedPlot {
            width,
            height,
            pixels,
        })
    }

    fn persist(&mut self, plot: &RenderedPlot, path: &Path) -> Result<(), PlotError> {
        image::save_buffer(
            path,
            &plot.pixels,
            plot.width,
            plot.height,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| PlotError::save(e.to_string()))
    }
}

/// Draw the series with markers on every point, legend keyed by the y label.
/// Ordinal axes place points at 0..n and label ticks with the cell texts.
fn draw_line_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    spec: &PlotSpec,
    xs: Vec<f64>,
    tick_labels: Option<Vec<String>>,
) -> Result<(), PlotError> {
    let x_range = padded_range(&xs);
    let y_range = padded_range(&spec.y);

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(42)
        .y_label_area_size(56)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| PlotError::render(e.to_string()))?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&spec.x_label).y_desc(&spec.y_label);
    if let Some(labels) = &tick_labels {
        mesh.x_labels(labels.len().min(12))
            .x_label_formatter(&|v: &f64| {
                let idx = v.round() as isize;
                if idx >= 0 && (v - idx as f64).abs() < 1e-6 {
                    labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .draw()
            .map_err(|e| PlotError::render(e.to_string()))?;
    } else {
        mesh.draw().map_err(|e| PlotError::render(e.to_string()))?;
    }

    let points: Vec<(f64, f64)> = xs.into_iter().zip(spec.y.iter().copied()).collect();
    chart
        .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
        .map_err(|e| PlotError::render(e.to_string()))?
        .label(&spec.y_label)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], &BLUE));
    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, BLUE.filled())),
        )
        .map_err(|e| PlotError::render(e.to_string()))?;

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(|e| PlotError::render(e.to_string()))?;

    Ok(())
}

/// A usable axis range even for constant or single-point series.
fn padded_range(values: &[f64]) -> std::ops::Range<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return -1.0..1.0;
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 1.0)..(max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

// ---------------------------------------------------------------------------
// Recording renderer (tests)
// ---------------------------------------------------------------------------

/// Counts render calls and records persist paths; optionally fails either.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingRenderer {
    pub render_calls: usize,
    pub persist_calls: Vec<std::path::PathBuf>,
    pub fail_render: bool,
    pub fail_persist: bool,
}

#[cfg(test)]
impl Renderer for RecordingRenderer {
    fn render(&mut self, _spec: &PlotSpec) -> Result<RenderedPlot, PlotError> {
        self.render_calls += 1;
        if self.fail_render {
            return Err(PlotError::render("no display"));
        }
        Ok(RenderedPlot {
            width: 1,
            height: 1,
            pixels: vec![0; 3],
        })
    }

    fn persist(&mut self, _plot: &RenderedPlot, path: &Path) -> Result<(), PlotError> {
        self.persist_calls.push(path.to_path_buf());
        if self.fail_persist {
            return Err(PlotError::save("disk full"));
        }
        Ok(())
    }
}
