//! `weather-notifier` -- periodic weather alert notification daemon.
//!
//! Fetches subscriptions from the subscription API, evaluates each one
//! against current weather from OpenWeatherMap, and emails subscribers
//! whose alert conditions are crossed. Runs one cycle per interval.
//!
//! # Environment variables
//!
//! | Variable                | Required | Default | Description                                   |
//! |-------------------------|----------|---------|-----------------------------------------------|
//! | `SUBSCRIPTION_API_URL`  | yes      | --      | Subscription API base URL, e.g. `http://host:3000/api/v1` |
//! | `WEATHER_API_KEY`       | yes      | --      | OpenWeatherMap API key                        |
//! | `SMTP_HOST`             | yes      | --      | SMTP server hostname                          |
//! | `WEATHER_API_URL`       | no       | OpenWeatherMap `/data/2.5` | Weather API base URL       |
//! | `NOTIFY_INTERVAL_SECS`  | no       | `60`    | Seconds between notification cycles           |
//! | `CYCLE_TIMEOUT_SECS`    | no       | `300`   | Deadline for one cycle                        |
//! | `SMTP_PORT`, `SMTP_FROM`, `SMTP_USER`, `SMTP_PASSWORD` | no | see `email` module | SMTP details |

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weather_notifier::api_client::ApiSubscriptionSource;
use weather_notifier::config::NotifierConfig;
use weather_notifier::cycle;
use weather_notifier::email::{EmailConfig, SmtpMailer};
use weather_notifier::weather::OpenWeatherClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_notifier=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = NotifierConfig::from_env();

    let Some(email_config) = EmailConfig::from_env() else {
        tracing::error!("SMTP_HOST environment variable is required");
        std::process::exit(1);
    };

    tracing::info!(
        subscription_api_url = %config.subscription_api_url,
        weather_api_url = %config.weather_api_url,
        interval_secs = config.notify_interval.as_secs(),
        "Starting weather-notifier",
    );

    let subscriptions = ApiSubscriptionSource::new(config.subscription_api_url.clone());
    let weather = OpenWeatherClient::new(
        config.weather_api_url.clone(),
        config.weather_api_key.clone(),
    );
    let mailer = SmtpMailer::new(email_config);

    let cancel = CancellationToken::new();
    let shutdown_cancel = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_cancel.cancel();
    });

    cycle::run(&config, &subscriptions, &weather, &mailer, cancel).await;

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the daemon shuts
/// down cleanly whether stopped interactively or by a process manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
