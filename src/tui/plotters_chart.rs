//! Plotters-powered `ChartSpec` widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.
//! The x-axis is categorical: dataset values are placed at their label index and
//! ticks are mapped back to the label text.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::{ChartSpec, Dataset, Rgb};

/// Render-only wrapper around a built chart.
pub struct SpecChart<'a> {
    pub spec: &'a ChartSpec,
}

impl<'a> Widget for SpecChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let n = self.spec.labels.len();
        let Some((y0, y1)) = self.spec.value_range().filter(|_| n > 0).map(pad) else {
            buf.set_string(area.x, area.y, "No data for this chart.", Style::default().fg(Color::Yellow));
            return;
        };
        let x0 = 0.0_f64;
        let x1 = (n.max(2) - 1) as f64;

        let spec = self.spec;
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Mesh lines are noise at terminal resolution; axes and labels suffice.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(6)
                .y_labels(5)
                .x_label_formatter(&|v| label_at(spec, *v))
                .y_label_formatter(&|v| format!("{v:.1}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            for ds in &spec.datasets {
                let color = rgb(ds.stroke.color);
                for run in runs(ds) {
                    if run.len() == 1 {
                        chart.draw_series(run.iter().map(|&p| Pixel::new(p, color)))?;
                    } else if ds.stroke.dashed {
                        // Every other segment of the run.
                        chart.draw_series(
                            run.windows(2)
                                .step_by(2)
                                .map(|w| PathElement::new(vec![w[0], w[1]], color)),
                        )?;
                    } else {
                        chart.draw_series(LineSeries::new(run.iter().copied(), &color))?;
                    }
                }
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Ratatui colour for legends drawn outside the Plotters area.
pub fn legend_color(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn pad((lo, hi): (f64, f64)) -> (f64, f64) {
    let (lo, hi) = if (hi - lo).abs() < 1e-12 { (lo - 0.5, hi + 0.5) } else { (lo, hi) };
    let p = (hi - lo) * 0.05;
    (lo - p, hi + p)
}

/// Maximal runs of consecutive non-null values, as (index, value) points.
fn runs(ds: &Dataset) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for (i, v) in ds.values().iter().enumerate() {
        match v.filter(|v| v.is_finite()) {
            Some(v) => current.push((i as f64, v)),
            None => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn label_at(spec: &ChartSpec, x: f64) -> String {
    let idx = x.round();
    if idx < 0.0 || (x - idx).abs() > 1e-6 {
        return String::new();
    }
    spec.labels
        .get(idx as usize)
        .map(|l| l.to_string())
        .unwrap_or_default()
}
