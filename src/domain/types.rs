//! Chart-facing domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built in-memory by the compositor
//! - handed to any rendering surface (ASCII plot, TUI)
//! - exported to JSON for external charting tools

use serde::{Deserialize, Serialize};

/// An ordered year -> value mapping.
///
/// `values[i]` belongs to `years[i]`; `None` marks a year with no observation
/// or prediction. Well-formed series have `years.len() == values.len()`, but
/// upstream payloads are not trusted: the compositor checks the shape before
/// building anything from a series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub years: Vec<i32>,
    pub values: Vec<Option<f64>>,
}

impl TimeSeries {
    pub fn new(years: Vec<i32>, values: Vec<Option<f64>>) -> Self {
        Self { years, values }
    }

    /// Build a series where every year has a value.
    pub fn dense(years: Vec<i32>, values: Vec<f64>) -> Self {
        Self {
            years,
            values: values.into_iter().map(Some).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// One category on the x-axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisLabel {
    Year(i32),
    Text(String),
}

impl std::fmt::Display for AxisLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AxisLabel::Year(y) => write!(f, "{y}"),
            AxisLabel::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i32> for AxisLabel {
    fn from(value: i32) -> Self {
        AxisLabel::Year(value)
    }
}

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const TEAL: Rgb = Rgb(75, 192, 192);
    pub const RED: Rgb = Rgb(255, 99, 132);
    pub const YELLOW: Rgb = Rgb(255, 206, 86);
    pub const BLUE: Rgb = Rgb(54, 162, 235);
    pub const ORANGE: Rgb = Rgb(255, 159, 64);
}

/// How a dataset's line is drawn.
///
/// The compositor never interprets this; it is passed through to whichever
/// surface draws the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Rgb,
    pub dashed: bool,
}

impl StrokeStyle {
    pub const fn solid(color: Rgb) -> Self {
        Self { color, dashed: false }
    }

    pub const fn dashed(color: Rgb) -> Self {
        Self { color, dashed: true }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(Rgb::TEAL)
    }
}

/// A named, styled series plotted as one line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub series: TimeSeries,
    pub stroke: StrokeStyle,
}

impl Dataset {
    /// Values aligned to the owning chart's labels.
    pub fn values(&self) -> &[Option<f64>] {
        &self.series.values
    }
}

/// Render-ready description of one chart.
///
/// Built fresh per render from freshly fetched data and never mutated after
/// construction; surfaces only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub labels: Vec<AxisLabel>,
    pub datasets: Vec<Dataset>,
    pub y_axis_zeroed: bool,
}

impl ChartSpec {
    /// Min/max over all non-null values, including 0 when the baseline is zeroed.
    ///
    /// Returns `None` when the chart has no finite values at all.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for ds in &self.datasets {
            for v in ds.values().iter().flatten() {
                if v.is_finite() {
                    lo = lo.min(*v);
                    hi = hi.max(*v);
                }
            }
        }
        if !(lo.is_finite() && hi.is_finite()) {
            return None;
        }
        if self.y_axis_zeroed {
            lo = lo.min(0.0);
            hi = hi.max(0.0);
        }
        Some((lo, hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(values: Vec<Option<f64>>, zeroed: bool) -> ChartSpec {
        let years = (2000..2000 + values.len() as i32).collect::<Vec<_>>();
        ChartSpec {
            title: "t".to_string(),
            labels: years.iter().copied().map(AxisLabel::Year).collect(),
            datasets: vec![Dataset {
                label: "a".to_string(),
                series: TimeSeries::new(years, values),
                stroke: StrokeStyle::default(),
            }],
            y_axis_zeroed: zeroed,
        }
    }

    #[test]
    fn value_range_skips_nulls_and_respects_zero_baseline() {
        let spec = chart(vec![Some(14.1), None, Some(14.7)], false);
        assert_eq!(spec.value_range(), Some((14.1, 14.7)));

        let spec = chart(vec![Some(14.1), None, Some(14.7)], true);
        assert_eq!(spec.value_range(), Some((0.0, 14.7)));

        let spec = chart(vec![None, None], true);
        assert_eq!(spec.value_range(), None);
    }

    #[test]
    fn axis_labels_serialize_untagged() {
        let labels = vec![AxisLabel::Year(2020), AxisLabel::Text("now".to_string())];
        let json = serde_json::to_string(&labels).unwrap();
        assert_eq!(json, r#"[2020,"now"]"#);
    }
}
