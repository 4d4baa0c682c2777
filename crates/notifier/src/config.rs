use std::time::Duration;

/// Default seconds between notification cycles.
const DEFAULT_NOTIFY_INTERVAL_SECS: u64 = 60;

/// Default deadline for a single notification cycle.
const DEFAULT_CYCLE_TIMEOUT_SECS: u64 = 300;

/// Default OpenWeatherMap API base URL.
const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Notifier daemon configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Base URL of the subscription API, e.g. `http://localhost:3000/api/v1`.
    pub subscription_api_url: String,
    /// Base URL of the weather API.
    pub weather_api_url: String,
    /// API key for the weather API.
    pub weather_api_key: String,
    /// Time between notification cycles.
    pub notify_interval: Duration,
    /// Deadline for one full cycle; a hung external call cannot block the
    /// loop past this.
    pub cycle_timeout: Duration,
}

impl NotifierConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                 | Required | Default                                    |
    /// |-------------------------|----------|--------------------------------------------|
    /// | `SUBSCRIPTION_API_URL`  | yes      | —                                          |
    /// | `WEATHER_API_KEY`       | yes      | —                                          |
    /// | `WEATHER_API_URL`       | no       | `https://api.openweathermap.org/data/2.5`  |
    /// | `NOTIFY_INTERVAL_SECS`  | no       | `60`                                       |
    /// | `CYCLE_TIMEOUT_SECS`    | no       | `300`                                      |
    pub fn from_env() -> Self {
        let subscription_api_url =
            std::env::var("SUBSCRIPTION_API_URL").expect("SUBSCRIPTION_API_URL must be set");

        let weather_api_key =
            std::env::var("WEATHER_API_KEY").expect("WEATHER_API_KEY must be set");

        let weather_api_url = std::env::var("WEATHER_API_URL")
            .unwrap_or_else(|_| DEFAULT_WEATHER_API_URL.to_string());

        let notify_interval_secs: u64 = std::env::var("NOTIFY_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_NOTIFY_INTERVAL_SECS);

        let cycle_timeout_secs: u64 = std::env::var("CYCLE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CYCLE_TIMEOUT_SECS);

        Self {
            subscription_api_url,
            weather_api_url,
            weather_api_key,
            notify_interval: Duration::from_secs(notify_interval_secs),
            cycle_timeout: Duration::from_secs(cycle_timeout_secs),
        }
    }
}
