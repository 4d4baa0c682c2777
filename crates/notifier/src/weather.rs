//! OpenWeatherMap client.
//!
//! Fetches current conditions for a city and maps the response `main`
//! object onto a [`WeatherSnapshot`]. Values are left in the API's default
//! units.

use async_trait::async_trait;
use serde::Deserialize;
use weather_core::weather::WeatherSnapshot;

use crate::cycle::WeatherSource;

/// Errors from the weather API client.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The weather API returned a non-2xx status code.
    #[error("Weather API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Current-conditions response, reduced to the fields the engine watches.
#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: ObservedValues,
}

#[derive(Debug, Deserialize)]
struct ObservedValues {
    temp: Option<f64>,
    pressure: Option<f64>,
    humidity: Option<f64>,
}

impl From<ObservedValues> for WeatherSnapshot {
    fn from(values: ObservedValues) -> Self {
        WeatherSnapshot {
            temperature: values.temp,
            pressure: values.pressure,
            humidity: values.humidity,
        }
    }
}

/// HTTP client for the OpenWeatherMap current-weather endpoint.
pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    /// Create a new client.
    ///
    /// * `base_url` - API base URL, e.g. `https://api.openweathermap.org/data/2.5`.
    /// * `api_key` - OpenWeatherMap API key.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn fetch_weather(
        &self,
        city: &str,
        country_code: Option<&str>,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let location = match country_code {
            Some(code) if !code.is_empty() => format!("{city},{code}"),
            _ => city.to_string(),
        };

        let response = self
            .client
            .get(format!("{}/weather", self.base_url))
            .query(&[("q", location.as_str()), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: WeatherResponse = response.json().await?;
        Ok(parsed.main.into())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
