//! Subscription entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;
use weather_core::condition::{ConditionOp, WeatherAttribute};
use weather_core::types::{DbId, Timestamp};

/// A row from the `subscriptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscription {
    pub id: DbId,
    pub subscription_uuid: Uuid,
    pub email: String,
    pub city: String,
    pub country_code: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `conditions` table.
///
/// `condition` is the watched attribute and `op` the comparison operator,
/// stored as their canonical lowercase names (the
/// [`WeatherAttribute`] / [`ConditionOp`] vocabulary). Unknown values never
/// reach these columns: API payloads deserialize through the enums.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Condition {
    pub id: DbId,
    pub subscription_id: DbId,
    pub condition_uuid: Uuid,
    pub condition: String,
    pub op: String,
    pub threshold: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A subscription together with its conditions, in the API's wire shape:
/// the subscription fields at the top level, conditions nested.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionWithConditions {
    #[serde(flatten)]
    pub subscription: Subscription,
    pub conditions: Vec<Condition>,
}

/// DTO for creating a new subscription.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSubscription {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(equal = 2))]
    pub country_code: Option<String>,
    pub conditions: Vec<ConditionInput>,
}

/// DTO for one condition in a create payload.
///
/// Deserializing `attribute`/`op` through the core enums rejects unknown
/// kinds at the boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct ConditionInput {
    #[serde(rename = "condition")]
    pub attribute: WeatherAttribute,
    pub op: ConditionOp,
    pub threshold: f64,
}

/// DTO for updating an existing subscription. Scalar fields are optional;
/// each supplied condition is updated in place by its `condition_uuid`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSubscription {
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,
    #[validate(length(equal = 2))]
    pub country_code: Option<String>,
    #[serde(default)]
    pub conditions: Vec<UpdateCondition>,
}

/// DTO for one condition in an update payload.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCondition {
    pub condition_uuid: Uuid,
    #[serde(rename = "condition")]
    pub attribute: WeatherAttribute,
    pub op: ConditionOp,
    pub threshold: f64,
}
