//! Runtime configuration.
//!
//! Values come from the environment (optionally via a `.env` file) and can be
//! overridden by CLI flags. The resolved `ApiConfig` is passed explicitly to the
//! HTTP client; nothing reads the environment after start-up.

use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

const ENV_API_BASE: &str = "CLIMATE_API_BASE";
const ENV_TIMEOUT: &str = "CLIMATE_HTTP_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to, without trailing slash.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Load from `.env` / process environment, then apply an optional base URL override.
    pub fn from_env(base_override: Option<&str>) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base = base_override
            .map(str::to_string)
            .or_else(|| std::env::var(ENV_API_BASE).ok());
        let timeout = std::env::var(ENV_TIMEOUT).ok();
        Self::resolve(base.as_deref(), timeout.as_deref())
    }

    fn resolve(base: Option<&str>, timeout: Option<&str>) -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(base) = base {
            config.base_url = normalize_base(base)?;
        }

        if let Some(raw) = timeout {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                AppError::usage(format!("Invalid {ENV_TIMEOUT} '{raw}': {e}"))
            })?;
            if secs == 0 {
                return Err(AppError::usage(format!("{ENV_TIMEOUT} must be > 0.")));
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Full URL for an endpoint path such as `/temperature`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(AppError::usage("API base URL must not be empty."));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(AppError::usage(format!(
            "API base URL must start with http:// or https:// (got: {trimmed})."
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_set() {
        let config = ApiConfig::resolve(None, None).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.endpoint("/temperature"), "http://127.0.0.1:5000/api/temperature");
    }

    #[test]
    fn base_is_trimmed_and_validated() {
        let config = ApiConfig::resolve(Some(" https://climate.example/api/ "), Some("3")).unwrap();
        assert_eq!(config.base_url, "https://climate.example/api");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.endpoint("news"), "https://climate.example/api/news");

        assert!(ApiConfig::resolve(Some("ftp://x"), None).is_err());
        assert!(ApiConfig::resolve(Some("   "), None).is_err());
    }

    #[test]
    fn bad_timeout_is_a_usage_error() {
        let err = ApiConfig::resolve(None, Some("soon")).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_USAGE);
        assert!(ApiConfig::resolve(None, Some("0")).is_err());
    }
}
