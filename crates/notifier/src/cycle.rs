//! The notification cycle orchestrator.
//!
//! One cycle fetches every subscription, and for each one fetches current
//! weather, runs the evaluation engine, and emails the subscriber. The
//! collaborators (subscription source, weather source, email sender) are
//! injected through the traits below, so tests substitute in-memory stubs.
//!
//! A failure for one subscription is logged and never aborts the rest of
//! the cycle.

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use weather_core::alert::{generate_alerts, EvalError};
use weather_core::message::{format_notification_body, notification_subject};
use weather_core::subscription::Subscription;
use weather_core::weather::WeatherSnapshot;

use crate::api_client::FetchError;
use crate::config::NotifierConfig;
use crate::email::EmailError;
use crate::weather::WeatherError;

// ---------------------------------------------------------------------------
// Collaborator interfaces
// ---------------------------------------------------------------------------

/// Yields the subscriptions a cycle evaluates.
#[async_trait]
pub trait SubscriptionSource: Send + Sync {
    async fn fetch_subscriptions(&self) -> Result<Vec<Subscription>, FetchError>;
}

/// Fetches one weather snapshot for a location.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch_weather(
        &self,
        city: &str,
        country_code: Option<&str>,
    ) -> Result<WeatherSnapshot, WeatherError>;
}

/// Sends one notification email.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError>;
}

// ---------------------------------------------------------------------------
// Cycle
// ---------------------------------------------------------------------------

/// Outcome counters for one notification cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Subscriptions fetched this cycle.
    pub subscriptions: usize,
    /// Emails successfully handed to the sender.
    pub emails_sent: usize,
    /// Subscriptions that failed (weather fetch, evaluation, or send).
    pub failures: usize,
}

/// Why a single subscription could not be notified.
#[derive(Debug, thiserror::Error)]
enum NotifyError {
    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Email(#[from] EmailError),
}

/// Run one notification cycle over all subscriptions.
///
/// Returns `Err` only if the subscription list itself cannot be fetched;
/// per-subscription failures are counted in the returned stats.
pub async fn run_cycle(
    subscriptions: &dyn SubscriptionSource,
    weather: &dyn WeatherSource,
    mailer: &dyn EmailSender,
) -> Result<CycleStats, FetchError> {
    tracing::debug!("Fetching subscriptions");
    let subs = subscriptions.fetch_subscriptions().await?;

    let mut stats = CycleStats {
        subscriptions: subs.len(),
        ..CycleStats::default()
    };

    for subscription in &subs {
        match notify_subscription(subscription, weather, mailer).await {
            Ok(()) => stats.emails_sent += 1,
            Err(e) => {
                stats.failures += 1;
                tracing::error!(
                    error = %e,
                    email = %subscription.email,
                    city = %subscription.city,
                    country_code = subscription.country_code.as_deref().unwrap_or(""),
                    "Failed to notify subscription"
                );
            }
        }
    }

    Ok(stats)
}

/// Evaluate one subscription and send its notification email.
///
/// The email is sent even when no condition triggered; the body then simply
/// contains no alert lines.
async fn notify_subscription(
    subscription: &Subscription,
    weather: &dyn WeatherSource,
    mailer: &dyn EmailSender,
) -> Result<(), NotifyError> {
    let country_code = subscription.country_code.as_deref();

    let snapshot = weather
        .fetch_weather(&subscription.city, country_code)
        .await?;
    tracing::debug!(
        city = %subscription.city,
        ?snapshot,
        "Fetched weather conditions"
    );

    let alerts = generate_alerts(&subscription.conditions, &snapshot)?;
    tracing::info!(
        email = %subscription.email,
        city = %subscription.city,
        alert_count = alerts.len(),
        "Generated alerts"
    );

    let body = format_notification_body(&alerts, &subscription.city, country_code);
    let subject = notification_subject(&subscription.city);

    mailer.send(&subscription.email, &subject, &body).await?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Daemon loop
// ---------------------------------------------------------------------------

/// Run notification cycles on a fixed interval until cancelled.
///
/// Each cycle is bounded by the configured deadline so a hung external call
/// cannot block the loop indefinitely.
pub async fn run(
    config: &NotifierConfig,
    subscriptions: &dyn SubscriptionSource,
    weather: &dyn WeatherSource,
    mailer: &dyn EmailSender,
    cancel: CancellationToken,
) {
    tracing::info!(
        interval_secs = config.notify_interval.as_secs(),
        cycle_timeout_secs = config.cycle_timeout.as_secs(),
        "Notification loop started"
    );

    let mut interval = tokio::time::interval(config.notify_interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Notification loop stopping");
                break;
            }
            _ = interval.tick() => {
                run_cycle_with_deadline(config.cycle_timeout, subscriptions, weather, mailer).await;
            }
        }
    }
}

/// Run one cycle under a deadline, logging the outcome.
async fn run_cycle_with_deadline(
    deadline: Duration,
    subscriptions: &dyn SubscriptionSource,
    weather: &dyn WeatherSource,
    mailer: &dyn EmailSender,
) {
    match tokio::time::timeout(deadline, run_cycle(subscriptions, weather, mailer)).await {
        Ok(Ok(stats)) => {
            tracing::info!(
                subscriptions = stats.subscriptions,
                emails_sent = stats.emails_sent,
                failures = stats.failures,
                "Notification cycle complete"
            );
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Failed to fetch subscriptions, skipping cycle");
        }
        Err(_) => {
            tracing::error!(
                timeout_secs = deadline.as_secs(),
                "Notification cycle timed out"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
