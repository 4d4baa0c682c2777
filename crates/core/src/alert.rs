//! The alert evaluation engine: comparator and alert-set generator.
//!
//! Pure logic — no database access, no I/O. The caller is responsible for
//! fetching subscriptions and weather snapshots and passing them in.

use serde::Serialize;

use crate::condition::{AlertCondition, ConditionOp, WeatherAttribute};
use crate::weather::WeatherSnapshot;

/// A triggered alert: the condition that matched plus the observed value at
/// trigger time.
///
/// Created only by [`compare`] when a condition matches; consumed by the
/// message formatter; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub attribute: WeatherAttribute,
    pub op: ConditionOp,
    pub threshold: f64,
    pub observed_value: f64,
}

/// Errors from the evaluation engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// A condition references an attribute the snapshot does not carry.
    /// Should not happen with a validated snapshot, but is a defined error
    /// rather than a panic.
    #[error("snapshot has no value for attribute {attribute}")]
    AttributeNotFound { attribute: WeatherAttribute },
}

/// Evaluate a single condition against a snapshot.
///
/// Returns `Ok(Some(alert))` if the condition matched, `Ok(None)` if it did
/// not (a normal outcome, not an error), and `Err` if the snapshot lacks the
/// watched attribute.
pub fn compare(
    condition: &AlertCondition,
    snapshot: &WeatherSnapshot,
) -> Result<Option<Alert>, EvalError> {
    let observed = snapshot
        .value_of(condition.attribute)
        .ok_or(EvalError::AttributeNotFound {
            attribute: condition.attribute,
        })?;

    if condition.op.compare(observed, condition.threshold) {
        Ok(Some(Alert {
            attribute: condition.attribute,
            op: condition.op,
            threshold: condition.threshold,
            observed_value: observed,
        }))
    } else {
        Ok(None)
    }
}

/// Evaluate every condition against the snapshot, in input order.
///
/// The returned alerts preserve the relative order of the conditions that
/// triggered them. Conditions are not deduplicated: two conditions on the
/// same attribute can both trigger. An empty result is normal.
pub fn generate_alerts(
    conditions: &[AlertCondition],
    snapshot: &WeatherSnapshot,
) -> Result<Vec<Alert>, EvalError> {
    let mut alerts = Vec::new();
    for condition in conditions {
        if let Some(alert) = compare(condition, snapshot)? {
            alerts.push(alert);
        }
    }
    Ok(alerts)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn snapshot(temp: f64, pressure: f64, humidity: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature: Some(temp),
            pressure: Some(pressure),
            humidity: Some(humidity),
        }
    }

    fn condition(attribute: WeatherAttribute, op: ConditionOp, threshold: f64) -> AlertCondition {
        AlertCondition {
            attribute,
            op,
            threshold,
        }
    }

    #[test]
    fn matching_condition_produces_alert_with_observed_value() {
        let cond = condition(WeatherAttribute::Temp, ConditionOp::Gt, 20.0);
        let snap = snapshot(25.0, 1000.0, 50.0);

        let alert = compare(&cond, &snap).unwrap().unwrap();

        assert_eq!(alert.attribute, WeatherAttribute::Temp);
        assert_eq!(alert.op, ConditionOp::Gt);
        assert_eq!(alert.threshold, 20.0);
        assert_eq!(alert.observed_value, 25.0);
    }

    #[test]
    fn non_matching_condition_produces_nothing() {
        let cond = condition(WeatherAttribute::Humidity, ConditionOp::Lt, 5.0);
        let snap = snapshot(25.0, 1000.0, 50.0);

        assert_eq!(compare(&cond, &snap).unwrap(), None);
    }

    #[test]
    fn missing_attribute_is_a_defined_error() {
        let cond = condition(WeatherAttribute::Pressure, ConditionOp::Gt, 900.0);
        let snap = WeatherSnapshot {
            temperature: Some(25.0),
            ..Default::default()
        };

        assert_matches!(
            compare(&cond, &snap),
            Err(EvalError::AttributeNotFound {
                attribute: WeatherAttribute::Pressure
            })
        );
    }

    #[test]
    fn exact_equality_triggers_eq() {
        let cond = condition(WeatherAttribute::Humidity, ConditionOp::Eq, 50.0);
        let snap = snapshot(25.0, 1000.0, 50.0);

        assert!(compare(&cond, &snap).unwrap().is_some());
    }

    #[test]
    fn near_equality_does_not_trigger_eq() {
        let cond = condition(WeatherAttribute::Humidity, ConditionOp::Eq, 50.0);
        let snap = snapshot(25.0, 1000.0, 50.0001);

        assert_eq!(compare(&cond, &snap).unwrap(), None);
    }

    #[test]
    fn generate_alerts_keeps_only_matches_in_order() {
        let conditions = vec![
            condition(WeatherAttribute::Temp, ConditionOp::Gt, 20.0),
            condition(WeatherAttribute::Pressure, ConditionOp::Lt, 900.0),
        ];
        let snap = snapshot(25.0, 1000.0, 50.0);

        let alerts = generate_alerts(&conditions, &snap).unwrap();

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].attribute, WeatherAttribute::Temp);
    }

    #[test]
    fn generate_alerts_preserves_input_order() {
        let conditions = vec![
            condition(WeatherAttribute::Humidity, ConditionOp::Gt, 10.0),
            condition(WeatherAttribute::Temp, ConditionOp::Gt, 20.0),
            condition(WeatherAttribute::Pressure, ConditionOp::Gte, 1000.0),
        ];
        let snap = snapshot(25.0, 1000.0, 50.0);

        let alerts = generate_alerts(&conditions, &snap).unwrap();

        let attributes: Vec<_> = alerts.iter().map(|a| a.attribute).collect();
        assert_eq!(
            attributes,
            vec![
                WeatherAttribute::Humidity,
                WeatherAttribute::Temp,
                WeatherAttribute::Pressure
            ]
        );
    }

    #[test]
    fn duplicate_attributes_are_not_deduplicated() {
        let conditions = vec![
            condition(WeatherAttribute::Temp, ConditionOp::Gt, 20.0),
            condition(WeatherAttribute::Temp, ConditionOp::Gt, 24.0),
        ];
        let snap = snapshot(25.0, 1000.0, 50.0);

        let alerts = generate_alerts(&conditions, &snap).unwrap();

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].threshold, 20.0);
        assert_eq!(alerts[1].threshold, 24.0);
    }

    #[test]
    fn empty_condition_list_yields_no_alerts() {
        let snap = snapshot(25.0, 1000.0, 50.0);
        assert!(generate_alerts(&[], &snap).unwrap().is_empty());
    }

    #[test]
    fn output_never_exceeds_input_length() {
        let conditions = vec![
            condition(WeatherAttribute::Temp, ConditionOp::Gt, 0.0),
            condition(WeatherAttribute::Pressure, ConditionOp::Gt, 0.0),
            condition(WeatherAttribute::Humidity, ConditionOp::Gt, 0.0),
        ];
        let snap = snapshot(25.0, 1000.0, 50.0);

        let alerts = generate_alerts(&conditions, &snap).unwrap();
        assert!(alerts.len() <= conditions.len());
    }
}
