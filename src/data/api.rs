//! HTTP client for the climate API.

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::compose::ChartBatch;
use crate::config::ApiConfig;
use crate::domain::{
    ApiDetails, DatabaseContents, DatabaseStatus, NewsFeed, PredictionSeries, SeaLevelHistory,
    TemperatureHistory,
};
use crate::error::AppError;

pub const PATH_TEMPERATURE: &str = "/temperature";
pub const PATH_SEA_LEVEL: &str = "/sea-level";
pub const PATH_TEMPERATURE_PREDICTIONS: &str = "/temperature-predictions";
pub const PATH_SEA_LEVEL_PREDICTIONS: &str = "/sea-level-predictions";
pub const PATH_NEWS: &str = "/news";
pub const PATH_DATABASE_STATUS: &str = "/admin/database-status";
pub const PATH_READ_DATABASE: &str = "/admin/read-database";
pub const PATH_API_DETAILS: &str = "/admin/api-details";

pub struct ClimateClient {
    client: Client,
    config: ApiConfig,
}

impl ClimateClient {
    pub fn new(config: ApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::io(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn fetch_temperature(&self) -> Result<TemperatureHistory, AppError> {
        self.get_json(PATH_TEMPERATURE)
    }

    pub fn fetch_sea_level(&self) -> Result<SeaLevelHistory, AppError> {
        self.get_json(PATH_SEA_LEVEL)
    }

    pub fn fetch_temperature_predictions(&self) -> Result<PredictionSeries, AppError> {
        self.get_json(PATH_TEMPERATURE_PREDICTIONS)
    }

    pub fn fetch_sea_level_predictions(&self) -> Result<PredictionSeries, AppError> {
        self.get_json(PATH_SEA_LEVEL_PREDICTIONS)
    }

    pub fn fetch_news(&self) -> Result<NewsFeed, AppError> {
        self.get_json(PATH_NEWS)
    }

    pub fn fetch_database_status(&self) -> Result<DatabaseStatus, AppError> {
        self.get_admin_json(PATH_DATABASE_STATUS)
    }

    pub fn fetch_database_contents(&self) -> Result<DatabaseContents, AppError> {
        self.get_admin_json(PATH_READ_DATABASE)
    }

    pub fn fetch_api_details(&self) -> Result<ApiDetails, AppError> {
        self.get_admin_json(PATH_API_DETAILS)
    }

    /// Fetch every chart series in parallel.
    ///
    /// Yields all four payloads or the first error; a partial batch is never
    /// returned.
    pub fn fetch_chart_batch(&self) -> Result<ChartBatch, AppError> {
        let ((temperature, sea_level), (temperature_predictions, sea_level_predictions)) = rayon::join(
            || rayon::join(|| self.fetch_temperature(), || self.fetch_sea_level()),
            || {
                rayon::join(
                    || self.fetch_temperature_predictions(),
                    || self.fetch_sea_level_predictions(),
                )
            },
        );

        let batch = assemble_batch(temperature, sea_level, temperature_predictions, sea_level_predictions)?;
        info!(
            temperature_years = batch.temperature.years.len(),
            sea_level_years = batch.sea_level.years.len(),
            "fetched chart batch"
        );
        Ok(batch)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = self.config.endpoint(path);
        debug!(%url, "GET");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AppError::io(format!("Request to {url} failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::io(format!(
                "Request to {url} failed with status {}.",
                resp.status()
            )));
        }

        resp.json()
            .map_err(|e| AppError::io(format!("Failed to parse response from {url}: {e}")))
    }

    /// Admin endpoints answer failures with a JSON body (`status: "error"`),
    /// which is decoded like a success so the caller can show it.
    fn get_admin_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = self.config.endpoint(path);
        debug!(%url, "GET (admin)");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AppError::io(format!("Request to {url} failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| AppError::io(format!("Failed to read response from {url}: {e}")))?;

        serde_json::from_str(&body).map_err(|e| {
            AppError::io(format!(
                "Failed to parse response from {url} (status {status}): {e}"
            ))
        })
    }
}

fn assemble_batch(
    temperature: Result<TemperatureHistory, AppError>,
    sea_level: Result<SeaLevelHistory, AppError>,
    temperature_predictions: Result<PredictionSeries, AppError>,
    sea_level_predictions: Result<PredictionSeries, AppError>,
) -> Result<ChartBatch, AppError> {
    Ok(ChartBatch {
        temperature: temperature?,
        sea_level: sea_level?,
        temperature_predictions: temperature_predictions?,
        sea_level_predictions: sea_level_predictions?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_is_all_or_first_error() {
        let ok = assemble_batch(
            Ok(TemperatureHistory::default()),
            Ok(SeaLevelHistory::default()),
            Ok(PredictionSeries::default()),
            Ok(PredictionSeries::default()),
        );
        assert!(ok.is_ok());

        let err = assemble_batch(
            Ok(TemperatureHistory::default()),
            Err(AppError::io("sea level down")),
            Ok(PredictionSeries::default()),
            Err(AppError::io("predictions down")),
        )
        .unwrap_err();
        assert_eq!(err.message(), "sea level down");
    }

    #[test]
    #[ignore = "opens real TCP connections to 127.0.0.1:9"]
    fn unreachable_server_fails_the_batch() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9/api".to_string(),
            timeout: std::time::Duration::from_secs(2),
        };
        let client = ClimateClient::new(config).unwrap();
        let err = client.fetch_chart_batch().unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_IO);
        assert!(err.message().contains("127.0.0.1:9"));
    }
}
