//! ASCII plotting of a `ChartSpec` for terminal output.
//!
//! Output is a fixed-size character grid, so the same chart always renders
//! to the same text.
//!
//! Each dataset gets its own glyph. Consecutive values are joined with that
//! glyph (every other cell for dashed strokes); a null value breaks the line.

use crate::domain::{ChartSpec, Dataset};

const GLYPHS: [char; 5] = ['*', '+', 'o', 'x', '#'];

/// Render a chart as text.
pub fn render_chart(spec: &ChartSpec, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let n = spec.labels.len();
    let Some((lo, hi)) = spec.value_range().filter(|_| n > 0) else {
        return format!("Plot: {} (no data)\n", spec.title);
    };
    let (y_min, y_max) = pad_range(lo, hi, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Lines first so data points can overlay them.
    for (idx, ds) in spec.datasets.iter().enumerate() {
        draw_dataset_lines(&mut grid, ds, glyph(idx), n, y_min, y_max);
    }
    for (idx, ds) in spec.datasets.iter().enumerate() {
        for (i, v) in ds.values().iter().enumerate() {
            if let Some(v) = v.filter(|v| v.is_finite()) {
                let x = map_x(i, n, width);
                let y = map_y(v, y_min, y_max, height);
                grid[y][x] = glyph(idx);
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} | x=[{}, {}] | y=[{y_min:.2}, {y_max:.2}]\n",
        spec.title,
        spec.labels[0],
        spec.labels[n - 1],
    ));
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    out.push_str(&legend(spec));
    out
}

fn legend(spec: &ChartSpec) -> String {
    let parts: Vec<String> = spec
        .datasets
        .iter()
        .enumerate()
        .map(|(idx, ds)| {
            if ds.stroke.dashed {
                format!("{} {} (dashed)", glyph(idx), ds.label)
            } else {
                format!("{} {}", glyph(idx), ds.label)
            }
        })
        .collect();
    format!("Legend: {}\n", parts.join("  "))
}

fn glyph(idx: usize) -> char {
    GLYPHS[idx % GLYPHS.len()]
}

fn draw_dataset_lines(grid: &mut [Vec<char>], ds: &Dataset, ch: char, n: usize, y_min: f64, y_max: f64) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev: Option<(usize, usize)> = None;
    for (i, v) in ds.values().iter().enumerate() {
        let Some(v) = v.filter(|v| v.is_finite()) else {
            prev = None;
            continue;
        };
        let x = map_x(i, n, width);
        let y = map_y(v, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, y, ch, ds.stroke.dashed);
        }
        prev = Some((x, y));
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let (min, max) = if (max - min).abs() < 1e-12 {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(i: usize, n: usize, width: usize) -> usize {
    if n < 2 {
        return 0;
    }
    let u = i as f64 / (n as f64 - 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Dashed lines only mark even steps.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char, dashed: bool) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut step = 0usize;

    loop {
        let visible = !dashed || step % 2 == 0;
        if visible
            && y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
        step += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{ChartStyle, concatenate_with_gap};
    use crate::domain::{Rgb, StrokeStyle, TimeSeries};

    #[test]
    fn plot_golden_snapshot_gap_chart() {
        let hist = TimeSeries::dense(vec![2020, 2021], vec![14.1, 14.3]);
        let pred = TimeSeries::dense(vec![2022, 2023], vec![14.5, 14.7]);
        let style = ChartStyle::new("Temperature")
            .unzeroed()
            .strokes(StrokeStyle::solid(Rgb::TEAL), StrokeStyle::dashed(Rgb::YELLOW));
        let spec = concatenate_with_gap(&hist, &pred, &style).unwrap();

        let txt = render_chart(&spec, 10, 5);
        let expected = concat!(
            "Plot: Temperature | x=[2020, 2023] | y=[14.07, 14.73]\n",
            "        ++\n",
            "      +\n",
            "\n",
            "  **\n",
            "**\n",
            "Legend: * Historical  + Predictions (dashed)\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn null_breaks_the_line() {
        let series = TimeSeries::new(vec![1, 2, 3], vec![Some(0.0), None, Some(0.0)]);
        let spec = crate::compose::align_single(&series, "s", &ChartStyle::new("flat").unzeroed()).unwrap();
        let txt = render_chart(&spec, 10, 5);
        let middle_row = txt.lines().nth(3).unwrap();
        // Only the two end points, nothing joining them.
        assert_eq!(middle_row, "*        *");
    }

    #[test]
    fn empty_chart_is_reported() {
        let spec = crate::compose::align_single(&TimeSeries::default(), "s", &ChartStyle::new("Empty")).unwrap();
        assert_eq!(render_chart(&spec, 20, 5), "Plot: Empty (no data)\n");
    }
}
