//! Alert conditions: watched attributes, comparison operators, thresholds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// WeatherAttribute
// ---------------------------------------------------------------------------

/// An observed weather quantity a condition can watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherAttribute {
    Temp,
    Pressure,
    Humidity,
}

impl WeatherAttribute {
    /// Canonical lowercase name, as stored and rendered.
    pub fn as_str(self) -> &'static str {
        match self {
            WeatherAttribute::Temp => "temp",
            WeatherAttribute::Pressure => "pressure",
            WeatherAttribute::Humidity => "humidity",
        }
    }
}

impl fmt::Display for WeatherAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeatherAttribute {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temp" => Ok(WeatherAttribute::Temp),
            "pressure" => Ok(WeatherAttribute::Pressure),
            "humidity" => Ok(WeatherAttribute::Humidity),
            other => Err(UnknownKind {
                what: "attribute",
                value: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// ConditionOp
// ---------------------------------------------------------------------------

/// Comparison operator applied to `(observed, threshold)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionOp {
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
}

impl ConditionOp {
    /// Canonical lowercase name, as stored.
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionOp::Gt => "gt",
            ConditionOp::Gte => "gte",
            ConditionOp::Lt => "lt",
            ConditionOp::Lte => "lte",
            ConditionOp::Eq => "eq",
        }
    }

    /// Apply the operator to an observed value and a threshold.
    ///
    /// `Eq` is exact floating-point equality, matching the behaviour the
    /// system has always had for equality conditions.
    pub fn compare(self, observed: f64, threshold: f64) -> bool {
        match self {
            ConditionOp::Gt => observed > threshold,
            ConditionOp::Gte => observed >= threshold,
            ConditionOp::Lt => observed < threshold,
            ConditionOp::Lte => observed <= threshold,
            ConditionOp::Eq => observed == threshold,
        }
    }

    /// Human-readable phrase used in notification messages.
    pub fn phrase(self) -> &'static str {
        match self {
            ConditionOp::Gt => "greater than",
            ConditionOp::Gte => "greater than or equal to",
            ConditionOp::Lt => "less than",
            ConditionOp::Lte => "less than or equal to",
            ConditionOp::Eq => "equal to",
        }
    }
}

impl fmt::Display for ConditionOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionOp {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gt" => Ok(ConditionOp::Gt),
            "gte" => Ok(ConditionOp::Gte),
            "lt" => Ok(ConditionOp::Lt),
            "lte" => Ok(ConditionOp::Lte),
            "eq" => Ok(ConditionOp::Eq),
            other => Err(UnknownKind {
                what: "operator",
                value: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// AlertCondition
// ---------------------------------------------------------------------------

/// A single alert rule: watch `attribute`, compare against `threshold`
/// with `op`.
///
/// The JSON key for the watched attribute is `condition`, the name the
/// subscription API has always used on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertCondition {
    #[serde(rename = "condition")]
    pub attribute: WeatherAttribute,
    pub op: ConditionOp,
    pub threshold: f64,
}

/// Error returned when a stored attribute or operator string is not one of
/// the recognized kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {what}: {value}")]
pub struct UnknownKind {
    pub what: &'static str,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
