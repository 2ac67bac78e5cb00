//! Read/write dashboard chart files.
//!
//! A chart file is the "portable" representation of one dashboard build:
//! - every chart spec that was built (labels, datasets, strokes)
//! - the charts that were skipped and why
//! - run metadata (API base, generation time)
//!
//! It can be handed to an external charting tool or re-plotted later with
//! `climate plot --file`.

use std::fs::File;
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::compose::ChartEntry;
use crate::domain::ChartSpec;
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartFile {
    pub tool: String,
    pub generated_at: String,
    pub api_base: String,
    pub charts: Vec<ExportedChart>,
    #[serde(default)]
    pub skipped: Vec<SkippedChart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedChart {
    pub id: usize,
    pub spec: ChartSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedChart {
    pub id: usize,
    pub title: String,
    pub reason: String,
}

impl ChartFile {
    pub fn from_entries(entries: &[ChartEntry], api_base: &str) -> Self {
        let mut charts = Vec::new();
        let mut skipped = Vec::new();
        for entry in entries {
            match &entry.chart {
                Ok(spec) => charts.push(ExportedChart {
                    id: entry.id,
                    spec: spec.clone(),
                }),
                Err(err) => skipped.push(SkippedChart {
                    id: entry.id,
                    title: entry.title.clone(),
                    reason: err.to_string(),
                }),
            }
        }
        Self {
            tool: "climate".to_string(),
            generated_at: Local::now().to_rfc3339(),
            api_base: api_base.to_string(),
            charts,
            skipped,
        }
    }

    pub fn chart(&self, id: usize) -> Option<&ChartSpec> {
        self.charts.iter().find(|c| c.id == id).map(|c| &c.spec)
    }
}

/// Write a chart file.
pub fn write_chart_json(path: &Path, file: &ChartFile) -> Result<(), AppError> {
    let out = File::create(path)
        .map_err(|e| AppError::usage(format!("Failed to create chart JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(out, file)
        .map_err(|e| AppError::usage(format!("Failed to write chart JSON: {e}")))?;

    Ok(())
}

/// Read a chart file.
pub fn read_chart_json(path: &Path) -> Result<ChartFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::usage(format!("Failed to open chart JSON '{}': {e}", path.display())))?;
    let charts: ChartFile =
        serde_json::from_reader(file).map_err(|e| AppError::usage(format!("Invalid chart JSON: {e}")))?;
    for chart in &charts.charts {
        check_chart(chart)?;
    }
    Ok(charts)
}

/// Every dataset must have one year and one value per axis label.
fn check_chart(chart: &ExportedChart) -> Result<(), AppError> {
    let n = chart.spec.labels.len();
    for ds in &chart.spec.datasets {
        let (years, values) = (ds.series.years.len(), ds.series.values.len());
        if years != n || values != n {
            return Err(AppError::usage(format!(
                "Invalid chart JSON: chart {} dataset '{}' has {years} years and {values} values for {n} labels",
                chart.id, ds.label
            )));
        }
    }
    Ok(())
}
