//! The subscription shape the notification cycle evaluates.
//!
//! This is a plain data shape, deliberately decoupled from the persistence
//! rows in `weather-db` — the evaluation engine never sees a database or
//! HTTP framework type.

use serde::{Deserialize, Serialize};

use crate::condition::AlertCondition;

/// A weather-alert subscription as consumed by the notification cycle.
///
/// Deserializes from the subscription API's JSON representation; fields the
/// cycle does not need (row ids, public uuids) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub email: String,
    pub city: String,
    #[serde(default)]
    pub country_code: Option<String>,
    pub conditions: Vec<AlertCondition>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{ConditionOp, WeatherAttribute};

    #[test]
    fn deserializes_api_payload_ignoring_extra_fields() {
        let payload = serde_json::json!({
            "subscription_uuid": "dae77ff3-6d26-4c56-ba22-4eb137e9be92",
            "email": "tester@test.com",
            "city": "London",
            "country_code": "GB",
            "conditions": [
                {"condition": "temp", "op": "gt", "threshold": 0, "condition_uuid": "b1e9"},
                {"condition": "pressure", "op": "lt", "threshold": 5}
            ]
        });

        let subscription: Subscription = serde_json::from_value(payload).unwrap();

        assert_eq!(subscription.email, "tester@test.com");
        assert_eq!(subscription.city, "London");
        assert_eq!(subscription.country_code.as_deref(), Some("GB"));
        assert_eq!(subscription.conditions.len(), 2);
        assert_eq!(subscription.conditions[0].attribute, WeatherAttribute::Temp);
        assert_eq!(subscription.conditions[1].op, ConditionOp::Lt);
    }

    #[test]
    fn country_code_defaults_to_none_when_missing() {
        let payload = serde_json::json!({
            "email": "tester@test.com",
            "city": "London",
            "conditions": []
        });

        let subscription: Subscription = serde_json::from_value(payload).unwrap();
        assert_eq!(subscription.country_code, None);
    }
}
