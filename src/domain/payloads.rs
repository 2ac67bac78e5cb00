//! JSON payloads served by the climate API.
//!
//! Field names follow the wire format exactly; everything that the backend may
//! omit (error bodies, optional metadata) is defaulted so that a failure body
//! still decodes into something we can show.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::TimeSeries;

/// `GET /temperature`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemperatureHistory {
    #[serde(default)]
    pub years: Vec<i32>,
    #[serde(default)]
    pub observed_c: Vec<Option<f64>>,
    #[serde(default)]
    pub anthropogenic_c: Vec<Option<f64>>,
}

impl TemperatureHistory {
    pub fn observed(&self) -> TimeSeries {
        TimeSeries::new(self.years.clone(), self.observed_c.clone())
    }

    pub fn anthropogenic(&self) -> TimeSeries {
        TimeSeries::new(self.years.clone(), self.anthropogenic_c.clone())
    }
}

/// `GET /sea-level`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeaLevelHistory {
    #[serde(default)]
    pub years: Vec<i32>,
    #[serde(default)]
    pub gmsl: Vec<Option<f64>>,
}

impl SeaLevelHistory {
    pub fn gmsl(&self) -> TimeSeries {
        TimeSeries::new(self.years.clone(), self.gmsl.clone())
    }
}

/// `GET /temperature-predictions` and `GET /sea-level-predictions`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionSeries {
    #[serde(default)]
    pub years: Vec<i32>,
    #[serde(default)]
    pub predictions: Vec<Option<f64>>,
}

impl PredictionSeries {
    pub fn series(&self) -> TimeSeries {
        TimeSeries::new(self.years.clone(), self.predictions.clone())
    }
}

/// `GET /news`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsFeed {
    #[serde(default)]
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(rename = "publishedAt", default, deserialize_with = "null_as_default")]
    pub published_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
}

/// NewsAPI passes fields through as `null`; treat that like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `GET /admin/database-status`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub database_path: Option<String>,
    #[serde(default)]
    pub database_exists: Option<bool>,
    #[serde(default)]
    pub database_size_bytes: Option<u64>,
    #[serde(default)]
    pub database_size_mb: Option<f64>,
    #[serde(default)]
    pub tables: Vec<String>,
    #[serde(default)]
    pub table_counts: BTreeMap<String, u64>,
}

impl DatabaseStatus {
    pub fn is_success(&self) -> bool {
        self.status == "success" && self.connected
    }
}

/// `GET /admin/read-database`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseContents {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub tables: Vec<String>,
    #[serde(default)]
    pub data: BTreeMap<String, TableDump>,
}

impl DatabaseContents {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Table dumps in the order the server listed them.
    ///
    /// Tables present in `data` but missing from `tables` follow in name order.
    pub fn ordered_tables(&self) -> Vec<(&str, &TableDump)> {
        let mut out: Vec<(&str, &TableDump)> = self
            .tables
            .iter()
            .filter_map(|name| self.data.get(name).map(|dump| (name.as_str(), dump)))
            .collect();
        for (name, dump) in &self.data {
            if !self.tables.iter().any(|t| t == name) {
                out.push((name.as_str(), dump));
            }
        }
        out
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableDump {
    #[serde(default)]
    pub columns: Vec<ColumnInfo>,
    #[serde(default)]
    pub sample_data: Vec<Map<String, Value>>,
    #[serde(default)]
    pub showing_rows: u64,
    #[serde(default)]
    pub total_rows: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// `GET /admin/api-details`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiDetails {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub total_endpoints: usize,
    #[serde(default)]
    pub endpoints: Vec<EndpointInfo>,
    #[serde(default)]
    pub news_api: Option<NewsApiStatus>,
    #[serde(default)]
    pub server_info: Option<ServerInfo>,
}

impl ApiDetails {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointInfo {
    pub path: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsApiStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub key_configured: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerInfo {
    #[serde(rename = "flask_version", default)]
    pub server_version: String,
    #[serde(default)]
    pub python_version: String,
    #[serde(default)]
    pub cors_enabled: bool,
}
