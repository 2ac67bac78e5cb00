//! The fixed set of dashboard charts.
//!
//! Each chart is built independently from the fetched batch. A malformed
//! series only costs the chart that uses it; the rest are still built.

use tracing::{debug, warn};

use super::{
    ChartStyle, ShapeError, align_pair, align_single, concatenate_merged, concatenate_with_gap,
};
use crate::domain::{
    ChartSpec, PredictionSeries, Rgb, SeaLevelHistory, StrokeStyle, TemperatureHistory,
};

/// All series needed to build the dashboard, fetched together.
#[derive(Debug, Clone, Default)]
pub struct ChartBatch {
    pub temperature: TemperatureHistory,
    pub sea_level: SeaLevelHistory,
    pub temperature_predictions: PredictionSeries,
    pub sea_level_predictions: PredictionSeries,
}

/// One dashboard slot: the chart, or why it could not be built.
#[derive(Debug, Clone)]
pub struct ChartEntry {
    /// 1-based position on the dashboard.
    pub id: usize,
    pub title: String,
    pub chart: Result<ChartSpec, ShapeError>,
}

/// Number of charts on the dashboard.
pub const CHART_COUNT: usize = 9;

/// Build every dashboard chart from one batch.
pub fn build_dashboard(batch: &ChartBatch) -> Vec<ChartEntry> {
    let temp_obs = batch.temperature.observed();
    let temp_anthro = batch.temperature.anthropogenic();
    let sea = batch.sea_level.gmsl();
    let temp_pred = batch.temperature_predictions.series();
    let sea_pred = batch.sea_level_predictions.series();

    vec![
        chart(1, ChartStyle::new("Historical Observed Temperature (°C)"), |s| {
            align_single(&temp_obs, "Observed", s)
        }),
        chart(2, ChartStyle::new("Historical Anthropogenic Temperature (°C)"), |s| {
            align_single(&temp_anthro, "Anthropogenic", s)
        }),
        chart(3, ChartStyle::new("Temperature Comparison"), |s| {
            align_pair(&temp_obs, "Observed", &temp_anthro, "Anthropogenic", s)
        }),
        chart(4, ChartStyle::new("Historical Sea Level (mm)").unzeroed(), |s| {
            align_single(&sea, "GMSL", s)
        }),
        chart(5, ChartStyle::new("Temperature Predictions 2025-2050 (°C)").unzeroed(), |s| {
            align_single(&temp_pred, "Predicted", s)
        }),
        chart(6, ChartStyle::new("Sea Level Predictions 2025-2050 (mm)").unzeroed(), |s| {
            align_single(&sea_pred, "Predicted", s)
        }),
        chart(
            7,
            ChartStyle::new("Temperature: Historical + Predictions")
                .strokes(StrokeStyle::solid(Rgb::TEAL), StrokeStyle::dashed(Rgb::YELLOW)),
            |s| concatenate_with_gap(&temp_obs, &temp_pred, s),
        ),
        chart(
            8,
            ChartStyle::new("Sea Level: Historical + Predictions")
                .unzeroed()
                .strokes(StrokeStyle::solid(Rgb::BLUE), StrokeStyle::dashed(Rgb::ORANGE)),
            |s| concatenate_with_gap(&sea, &sea_pred, s),
        ),
        chart(9, ChartStyle::new("Complete Temperature Trend (°C)").unzeroed(), |s| {
            concatenate_merged(&temp_obs, &temp_pred, "Temperature", s)
        }),
    ]
}

fn chart(
    id: usize,
    style: ChartStyle,
    build: impl FnOnce(&ChartStyle) -> Result<ChartSpec, ShapeError>,
) -> ChartEntry {
    let chart = build(&style);
    match &chart {
        Ok(spec) => debug!(chart = id, points = spec.labels.len(), "built chart"),
        Err(err) => warn!(chart = id, title = %style.title, error = %err, "skipping chart"),
    }
    ChartEntry {
        id,
        title: style.title,
        chart,
    }
}
