//! Passthrough to a third-party (OpenWeatherMap-compatible) weather API

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::extract::ApiQuery;
use crate::state::AppState;

/// Thin client for the provider's `/weather` endpoint
#[derive(Clone, Debug)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Why a provider lookup did not produce data
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("weather provider answered with status {0}")]
    Provider(reqwest::StatusCode),

    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url, api_key)
    }

    /// Uses a preconfigured HTTP client (timeouts, proxy settings)
    pub fn with_http(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Fetches current conditions for `location` and returns the provider's JSON untouched
    pub async fn current(&self, location: &str) -> Result<Value, WeatherError> {
        let response = self
            .http
            .get(format!("{}/weather", self.base_url))
            .query(&[("q", location), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Provider(status));
        }

        Ok(response.json::<Value>().await?)
    }
}

#[derive(Deserialize, Debug)]
pub struct WeatherParams {
    pub location: Option<String>,
}

/// `GET /api/weather?location=...`
///
/// # Response
///
/// - **200 OK** - provider JSON, passed through
/// - **400 Bad Request** - `location` missing or empty
/// - **404 Not Found** - provider rejected the lookup
/// - **500 Internal Server Error** - provider unreachable or returned garbage
pub async fn get_weather(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<WeatherParams>,
) -> Result<Json<Value>, ApiError> {
    let location = match params.location.filter(|l| !l.is_empty()) {
        Some(location) => location,
        None => {
            return Err(ApiError::BadRequest(
                "Location parameter is required".to_string(),
            ))
        }
    };

    match state.weather.current(&location).await {
        Ok(data) => {
            tracing::info!(%location, "retrieved weather data");
            Ok(Json(data))
        }
        Err(WeatherError::Provider(status)) => {
            tracing::warn!(%location, %status, "weather provider rejected lookup");
            Err(ApiError::not_found(format!(
                "Error retrieving data for location={location}"
            )))
        }
        Err(err) => Err(ApiError::internal(
            err,
            format!("Error retrieving data for location={location}"),
        )),
    }
}
