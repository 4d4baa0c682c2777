//! Notification message formatting.
//!
//! Deterministic string rendering of triggered alerts. The observed value
//! and threshold are rendered with `f64` display formatting, so whole
//! numbers appear without a trailing `.0` (`25`, not `25.0`).

use crate::alert::Alert;

/// Greeting line at the top of every notification body.
const GREETING: &str = "Hi,";

/// Sign-off block at the bottom of every notification body.
const SIGN_OFF: &str = "Best regards,\nThe Weather Notifier Team";

/// Render the location a message refers to: the city alone, or
/// `"{city}, {country_code}"` when a non-empty country code is present.
pub fn format_location(city: &str, country_code: Option<&str>) -> String {
    match country_code {
        Some(code) if !code.is_empty() => format!("{city}, {code}"),
        _ => city.to_string(),
    }
}

/// Render a single triggered alert as a human-readable sentence.
pub fn format_alert(alert: &Alert, city: &str, country_code: Option<&str>) -> String {
    let location = format_location(city, country_code);
    format!(
        "The {} in {} is now {}. This is {} your threshold of {}",
        alert.attribute,
        location,
        alert.observed_value,
        alert.op.phrase(),
        alert.threshold
    )
}

/// Render the full notification body: greeting, one line per alert in input
/// order, sign-off.
///
/// An empty alert list produces a body with zero alert lines. Whether to
/// send such a notification at all is the caller's decision — the cycle
/// orchestrator sends regardless, as the system always has.
pub fn format_notification_body(alerts: &[Alert], city: &str, country_code: Option<&str>) -> String {
    let location = format_location(city, country_code);

    let mut body = format!("{GREETING}\n\nYour weather alerts for {location}:\n\n");
    for alert in alerts {
        body.push_str(&format_alert(alert, city, country_code));
        body.push('\n');
    }
    body.push_str(&format!("\n{SIGN_OFF}\n"));
    body
}

/// Subject line for a notification email.
pub fn notification_subject(city: &str) -> String {
    format!("Weather Notification for {city}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{ConditionOp, WeatherAttribute};

    fn temp_alert() -> Alert {
        Alert {
            attribute: WeatherAttribute::Temp,
            op: ConditionOp::Gt,
            threshold: 20.0,
            observed_value: 25.0,
        }
    }

    #[test]
    fn alert_message_matches_expected_wording() {
        let message = format_alert(&temp_alert(), "London", None);
        assert_eq!(
            message,
            "The temp in London is now 25. This is greater than your threshold of 20"
        );
    }

    #[test]
    fn location_includes_country_code_when_present() {
        assert_eq!(format_location("Copenhagen", Some("DK")), "Copenhagen, DK");
    }

    #[test]
    fn location_is_city_alone_when_country_code_absent_or_empty() {
        assert_eq!(format_location("Copenhagen", None), "Copenhagen");
        assert_eq!(format_location("Copenhagen", Some("")), "Copenhagen");
    }

    #[test]
    fn fractional_values_render_in_full() {
        let alert = Alert {
            attribute: WeatherAttribute::Pressure,
            op: ConditionOp::Lte,
            threshold: 1013.25,
            observed_value: 1002.5,
        };
        let message = format_alert(&alert, "Oslo", Some("NO"));
        assert_eq!(
            message,
            "The pressure in Oslo, NO is now 1002.5. This is less than or equal to your threshold of 1013.25"
        );
    }

    #[test]
    fn formatting_is_deterministic() {
        let a = format_alert(&temp_alert(), "London", Some("GB"));
        let b = format_alert(&temp_alert(), "London", Some("GB"));
        assert_eq!(a, b);
    }

    #[test]
    fn body_contains_one_line_per_alert_in_order() {
        let alerts = vec![
            temp_alert(),
            Alert {
                attribute: WeatherAttribute::Humidity,
                op: ConditionOp::Lt,
                threshold: 30.0,
                observed_value: 20.0,
            },
        ];
        let body = format_notification_body(&alerts, "London", Some("GB"));

        let temp_pos = body.find("The temp in London, GB").unwrap();
        let humidity_pos = body.find("The humidity in London, GB").unwrap();
        assert!(temp_pos < humidity_pos);
    }

    #[test]
    fn empty_alert_list_produces_body_without_alert_lines() {
        let body = format_notification_body(&[], "London", None);
        assert!(body.starts_with("Hi,"));
        assert!(body.contains("Your weather alerts for London:"));
        assert!(!body.contains("is now"));
        assert!(body.contains("Best regards,"));
    }

    #[test]
    fn subject_names_the_city() {
        assert_eq!(
            notification_subject("London"),
            "Weather Notification for London"
        );
    }
}
