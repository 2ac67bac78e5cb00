//! Series alignment and chart construction.
//!
//! Every builder here is a pure function of its inputs: it checks the shape of
//! each series, then lays the values out on a shared x-axis. Nothing in this
//! module performs I/O or keeps state between calls.
//!
//! - `align_single`: wrap one series as a one-line chart
//! - `align_pair`: two series plotted over the same years
//! - `concatenate_with_gap`: history followed by predictions, gap-padded so the
//!   two lines meet at the boundary without overlapping
//! - `concatenate_merged`: history and predictions as one continuous line

use crate::domain::{AxisLabel, ChartSpec, Dataset, StrokeStyle, TimeSeries};

pub mod dashboard;

pub use dashboard::{ChartBatch, ChartEntry, build_dashboard};

/// Dataset label used for the historical half of a gap-padded chart.
pub const HISTORICAL_LABEL: &str = "Historical";
/// Dataset label used for the predicted half of a gap-padded chart.
pub const PREDICTED_LABEL: &str = "Predictions";

/// Upstream data that cannot be laid out on an axis.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("series '{label}' has {years} years but {values} values")]
    LengthMismatch {
        label: String,
        years: usize,
        values: usize,
    },
    #[error("series '{left}' ({left_len} years) and '{right}' ({right_len} years) do not share an x-axis")]
    AxisMismatch {
        left: String,
        left_len: usize,
        right: String,
        right_len: usize,
    },
}

/// Presentation options that the compositor passes through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub title: String,
    pub y_axis_zeroed: bool,
    pub primary: StrokeStyle,
    pub secondary: StrokeStyle,
}

impl ChartStyle {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            y_axis_zeroed: true,
            primary: StrokeStyle::default(),
            secondary: StrokeStyle::solid(crate::domain::Rgb::RED),
        }
    }

    /// Let the y-axis start at the data minimum instead of zero.
    pub fn unzeroed(mut self) -> Self {
        self.y_axis_zeroed = false;
        self
    }

    pub fn strokes(mut self, primary: StrokeStyle, secondary: StrokeStyle) -> Self {
        self.primary = primary;
        self.secondary = secondary;
        self
    }
}

/// Check `len(years) == len(values)` for one series.
pub fn check_shape(series: &TimeSeries, label: &str) -> Result<(), ShapeError> {
    if series.years.len() != series.values.len() {
        return Err(ShapeError::LengthMismatch {
            label: label.to_string(),
            years: series.years.len(),
            values: series.values.len(),
        });
    }
    Ok(())
}

/// One-dataset chart over `series.years`.
pub fn align_single(series: &TimeSeries, label: &str, style: &ChartStyle) -> Result<ChartSpec, ShapeError> {
    check_shape(series, label)?;
    Ok(single(series, label, style.primary, style))
}

/// Two-dataset chart over a shared year axis.
///
/// Both series are expected to cover the same years (the same history plotted
/// two ways); the axis is taken from `a`.
pub fn align_pair(
    a: &TimeSeries,
    label_a: &str,
    b: &TimeSeries,
    label_b: &str,
    style: &ChartStyle,
) -> Result<ChartSpec, ShapeError> {
    check_shape(a, label_a)?;
    check_shape(b, label_b)?;
    if a.years.len() != b.years.len() {
        return Err(ShapeError::AxisMismatch {
            left: label_a.to_string(),
            left_len: a.years.len(),
            right: label_b.to_string(),
            right_len: b.years.len(),
        });
    }

    Ok(ChartSpec {
        title: style.title.clone(),
        labels: year_labels(&a.years),
        datasets: vec![
            dataset(label_a, a.clone(), style.primary),
            dataset(label_b, TimeSeries::new(a.years.clone(), b.values.clone()), style.secondary),
        ],
        y_axis_zeroed: style.y_axis_zeroed,
    })
}

/// History followed by predictions on one axis, each padded with nulls over
/// the other's range.
///
/// For every slot exactly one of the two datasets carries the slot: the
/// historical line stops at the boundary and the predicted line starts there.
/// Years are concatenated as given; overlapping years are not merged.
///
/// If either input is empty the result is the single-dataset chart over the
/// other one.
pub fn concatenate_with_gap(
    historical: &TimeSeries,
    predicted: &TimeSeries,
    style: &ChartStyle,
) -> Result<ChartSpec, ShapeError> {
    check_shape(historical, HISTORICAL_LABEL)?;
    check_shape(predicted, PREDICTED_LABEL)?;

    if predicted.is_empty() {
        return Ok(single(historical, HISTORICAL_LABEL, style.primary, style));
    }
    if historical.is_empty() {
        return Ok(single(predicted, PREDICTED_LABEL, style.secondary, style));
    }

    let years = joined_years(historical, predicted);
    let n_hist = historical.len();
    let n_pred = predicted.len();

    let mut hist_values = Vec::with_capacity(years.len());
    hist_values.extend_from_slice(&historical.values);
    hist_values.resize(n_hist + n_pred, None);

    let mut pred_values = vec![None; n_hist];
    pred_values.extend_from_slice(&predicted.values);

    Ok(ChartSpec {
        title: style.title.clone(),
        labels: year_labels(&years),
        datasets: vec![
            dataset(HISTORICAL_LABEL, TimeSeries::new(years.clone(), hist_values), style.primary),
            dataset(PREDICTED_LABEL, TimeSeries::new(years, pred_values), style.secondary),
        ],
        y_axis_zeroed: style.y_axis_zeroed,
    })
}

/// History and predictions as one continuous line.
pub fn concatenate_merged(
    historical: &TimeSeries,
    predicted: &TimeSeries,
    label: &str,
    style: &ChartStyle,
) -> Result<ChartSpec, ShapeError> {
    check_shape(historical, HISTORICAL_LABEL)?;
    check_shape(predicted, PREDICTED_LABEL)?;

    let years = joined_years(historical, predicted);
    let mut values = historical.values.clone();
    values.extend_from_slice(&predicted.values);

    Ok(single(&TimeSeries::new(years, values), label, style.primary, style))
}

fn single(series: &TimeSeries, label: &str, stroke: StrokeStyle, style: &ChartStyle) -> ChartSpec {
    ChartSpec {
        title: style.title.clone(),
        labels: year_labels(&series.years),
        datasets: vec![dataset(label, series.clone(), stroke)],
        y_axis_zeroed: style.y_axis_zeroed,
    }
}

fn dataset(label: &str, series: TimeSeries, stroke: StrokeStyle) -> Dataset {
    Dataset {
        label: label.to_string(),
        series,
        stroke,
    }
}

fn joined_years(a: &TimeSeries, b: &TimeSeries) -> Vec<i32> {
    let mut years = Vec::with_capacity(a.len() + b.len());
    years.extend_from_slice(&a.years);
    years.extend_from_slice(&b.years);
    years
}

fn year_labels(years: &[i32]) -> Vec<AxisLabel> {
    years.iter().copied().map(AxisLabel::Year).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hist() -> TimeSeries {
        TimeSeries::dense(vec![2020, 2021], vec![14.1, 14.3])
    }

    fn pred() -> TimeSeries {
        TimeSeries::dense(vec![2022, 2023], vec![14.5, 14.7])
    }

    fn style() -> ChartStyle {
        ChartStyle::new("Temperature")
    }

    #[test]
    fn concatenate_with_gap_example() {
        let spec = concatenate_with_gap(&hist(), &pred(), &style()).unwrap();
        assert_eq!(
            spec.labels,
            vec![
                AxisLabel::Year(2020),
                AxisLabel::Year(2021),
                AxisLabel::Year(2022),
                AxisLabel::Year(2023)
            ]
        );
        assert_eq!(spec.datasets.len(), 2);
        assert_eq!(spec.datasets[0].label, HISTORICAL_LABEL);
        assert_eq!(spec.datasets[0].values(), &[Some(14.1), Some(14.3), None, None]);
        assert_eq!(spec.datasets[1].label, PREDICTED_LABEL);
        assert_eq!(spec.datasets[1].values(), &[None, None, Some(14.5), Some(14.7)]);
    }

    #[test]
    fn concatenate_with_gap_exactly_one_side_per_slot() {
        let cases = [
            (TimeSeries::dense(vec![1990], vec![1.0]), TimeSeries::dense((2000..2010).collect(), vec![2.0; 10])),
            (TimeSeries::dense((1900..1950).collect(), vec![0.5; 50]), TimeSeries::dense(vec![2025], vec![3.0])),
            (hist(), pred()),
        ];
        for (h, p) in cases {
            let spec = concatenate_with_gap(&h, &p, &style()).unwrap();
            assert_eq!(spec.labels.len(), h.len() + p.len());
            let a = spec.datasets[0].values();
            let b = spec.datasets[1].values();
            assert_eq!(a.len(), spec.labels.len());
            assert_eq!(b.len(), spec.labels.len());
            for i in 0..spec.labels.len() {
                assert!(a[i].is_some() != b[i].is_some(), "slot {i} must belong to exactly one side");
            }
        }
    }

    #[test]
    fn null_observation_keeps_its_historical_slot() {
        let h = TimeSeries::new(vec![2020, 2021], vec![Some(14.1), None]);
        let spec = concatenate_with_gap(&h, &pred(), &style()).unwrap();
        let n_hist = h.len();
        let hist_side = spec.datasets[0].values();
        let pred_side = spec.datasets[1].values();

        assert_eq!(hist_side, &[Some(14.1), None, None, None]);
        assert!(pred_side[..n_hist].iter().all(Option::is_none));
        assert!(hist_side[n_hist..].iter().all(Option::is_none));
        // The null year is carried by neither line.
        assert!(hist_side[1].is_none() && pred_side[1].is_none());
        assert_eq!(pred_side[n_hist..], [Some(14.5), Some(14.7)]);
    }

    #[test]
    fn concatenate_with_gap_does_not_deduplicate_overlap() {
        let overlap = TimeSeries::dense(vec![2021, 2022], vec![14.4, 14.6]);
        let spec = concatenate_with_gap(&hist(), &overlap, &style()).unwrap();
        assert_eq!(spec.labels.len(), 4);
        assert_eq!(spec.labels[1], AxisLabel::Year(2021));
        assert_eq!(spec.labels[2], AxisLabel::Year(2021));
    }

    #[test]
    fn empty_predictions_degenerate_to_single() {
        let empty = TimeSeries::default();
        let spec = concatenate_with_gap(&hist(), &empty, &style()).unwrap();
        let single = align_single(&hist(), HISTORICAL_LABEL, &style()).unwrap();
        assert_eq!(spec, single);
        assert_eq!(spec.datasets.len(), 1);
        assert!(spec.datasets[0].values().iter().all(Option::is_some));
    }

    #[test]
    fn empty_history_keeps_prediction_stroke() {
        let s = style().strokes(StrokeStyle::default(), StrokeStyle::dashed(crate::domain::Rgb::YELLOW));
        let spec = concatenate_with_gap(&TimeSeries::default(), &pred(), &s).unwrap();
        assert_eq!(spec.datasets.len(), 1);
        assert_eq!(spec.datasets[0].label, PREDICTED_LABEL);
        assert!(spec.datasets[0].stroke.dashed);
        assert_eq!(spec.labels.len(), 2);
    }

    #[test]
    fn align_single_rejects_ragged_series() {
        let ragged = TimeSeries::new(vec![2020, 2021], vec![Some(1.0)]);
        let err = align_single(&ragged, "Observed", &style()).unwrap_err();
        assert_eq!(
            err,
            ShapeError::LengthMismatch {
                label: "Observed".to_string(),
                years: 2,
                values: 1
            }
        );
    }

    #[test]
    fn align_pair_rejects_different_axes() {
        let short = TimeSeries::dense(vec![2020], vec![1.0]);
        let err = align_pair(&hist(), "Observed", &short, "Anthropogenic", &style()).unwrap_err();
        assert!(matches!(err, ShapeError::AxisMismatch { left_len: 2, right_len: 1, .. }));
    }

    #[test]
    fn align_pair_shares_axis_and_strokes() {
        let other = TimeSeries::dense(vec![2020, 2021], vec![0.9, 1.0]);
        let spec = align_pair(&hist(), "Observed", &other, "Anthropogenic", &style()).unwrap();
        assert_eq!(spec.labels.len(), 2);
        assert_eq!(spec.datasets[0].stroke, style().primary);
        assert_eq!(spec.datasets[1].stroke, style().secondary);
        assert_eq!(spec.datasets[1].values(), &[Some(0.9), Some(1.0)]);
        assert!(spec.y_axis_zeroed);
    }

    #[test]
    fn concatenate_with_gap_rejects_ragged_prediction() {
        let ragged = TimeSeries::new(vec![2022], vec![]);
        assert!(concatenate_with_gap(&hist(), &ragged, &style()).is_err());
    }

    #[test]
    fn concatenate_merged_is_one_line() {
        let spec = concatenate_merged(&hist(), &pred(), "Temperature", &style().unzeroed()).unwrap();
        assert_eq!(spec.datasets.len(), 1);
        assert_eq!(spec.datasets[0].values(), &[Some(14.1), Some(14.3), Some(14.5), Some(14.7)]);
        assert!(!spec.y_axis_zeroed);
    }
}
