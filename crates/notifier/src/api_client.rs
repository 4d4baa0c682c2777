//! REST client for the subscription API.
//!
//! Fetches the full subscription list the notification cycle evaluates,
//! using [`reqwest`].

use async_trait::async_trait;
use weather_core::subscription::Subscription;

use crate::cycle::SubscriptionSource;

/// Errors from the subscription API client.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The subscription API returned a non-2xx status code.
    #[error("Subscription API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// HTTP client for the subscription API.
pub struct ApiSubscriptionSource {
    client: reqwest::Client,
    base_url: String,
}

impl ApiSubscriptionSource {
    /// Create a new client.
    ///
    /// * `base_url` - API base URL, e.g. `http://localhost:3000/api/v1`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across clients).
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl SubscriptionSource for ApiSubscriptionSource {
    async fn fetch_subscriptions(&self) -> Result<Vec<Subscription>, FetchError> {
        let response = self
            .client
            .get(format!("{}/subscriptions", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
