//! PNG rendering of plot views

use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::*;

use crate::error::{Result, WorkbenchError};
use crate::signal::PlotView;

#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub line: RGBColor,
}

impl PlotStyle {
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            background: WHITE,
            line: BLUE,
        }
    }
}

/// Render `view` as a line chart and return PNG bytes
pub fn render_png(view: &PlotView, style: &PlotStyle) -> Result<Vec<u8>> {
    if view.is_empty() {
        return Err(WorkbenchError::Render(format!(
            "'{}' has no points to plot",
            view.title
        )));
    }

    let (x_min, x_max) = view
        .xlim
        .unwrap_or_else(|| (view.x[0], view.x[view.len() - 1]));
    let (x_min, x_max) = padded(x_min, x_max);
    let (y_min, y_max) = view.y_range().map_or((-1.0, 1.0), |(lo, hi)| padded(lo, hi));

    let mut buffer = vec![0u8; rgb_buffer_len(style.width, style.height)];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(&view.title, ("sans-serif", 20).into_font())
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        chart
            .configure_mesh()
            .x_desc(view.xlabel.as_str())
            .y_desc(view.ylabel.as_str())
            .light_line_style(&BLACK.mix(0.05))
            .draw()?;

        chart.draw_series(LineSeries::new(view.points(), &style.line))?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}

/// Widen a degenerate range so the chart has a non-zero extent
fn padded(lo: f64, hi: f64) -> (f64, f64) {
    if (hi - lo).abs() < f64::EPSILON {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo, hi)
    }
}

fn rgb_buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}

fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| WorkbenchError::Render("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    DynamicImage::ImageRgb8(image).write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
