//! Repository for the `subscriptions` and `conditions` tables.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;
use weather_core::types::DbId;

use crate::models::subscription::{
    Condition, CreateSubscription, Subscription, SubscriptionWithConditions, UpdateSubscription,
};

/// Column list for `subscriptions` queries.
const SUBSCRIPTION_COLUMNS: &str =
    "id, subscription_uuid, email, city, country_code, created_at, updated_at";

/// Column list for `conditions` queries.
const CONDITION_COLUMNS: &str =
    "id, subscription_id, condition_uuid, condition, op, threshold, created_at, updated_at";

/// Error type for subscription updates, which can fail on a missing
/// subscription or a missing condition, not just on the database.
#[derive(Debug, thiserror::Error)]
pub enum SubscriptionUpdateError {
    #[error(transparent)]
    Db(#[from] sqlx::Error),

    #[error("Subscription {0} not found")]
    SubscriptionNotFound(Uuid),

    #[error("Condition {0} not found")]
    ConditionNotFound(Uuid),
}

/// Provides CRUD operations for subscriptions and their conditions.
pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Insert a subscription and its conditions in one transaction,
    /// generating fresh public UUIDs, and return the created rows.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubscription,
    ) -> Result<SubscriptionWithConditions, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO subscriptions (subscription_uuid, email, city, country_code)
             VALUES ($1, $2, $3, $4)
             RETURNING {SUBSCRIPTION_COLUMNS}"
        );
        let subscription = sqlx::query_as::<_, Subscription>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.email)
            .bind(&input.city)
            .bind(&input.country_code)
            .fetch_one(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO conditions (subscription_id, condition_uuid, condition, op, threshold)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {CONDITION_COLUMNS}"
        );
        let mut conditions = Vec::with_capacity(input.conditions.len());
        for condition in &input.conditions {
            let row = sqlx::query_as::<_, Condition>(&query)
                .bind(subscription.id)
                .bind(Uuid::new_v4())
                .bind(condition.attribute.as_str())
                .bind(condition.op.as_str())
                .bind(condition.threshold)
                .fetch_one(&mut *tx)
                .await?;
            conditions.push(row);
        }

        tx.commit().await?;

        Ok(SubscriptionWithConditions {
            subscription,
            conditions,
        })
    }

    /// List all subscriptions with their conditions, oldest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<SubscriptionWithConditions>, sqlx::Error> {
        let query = format!("SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions ORDER BY id");
        let subscriptions = sqlx::query_as::<_, Subscription>(&query)
            .fetch_all(pool)
            .await?;

        let query = format!("SELECT {CONDITION_COLUMNS} FROM conditions ORDER BY id");
        let conditions = sqlx::query_as::<_, Condition>(&query)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<Condition>> = HashMap::new();
        for condition in conditions {
            grouped
                .entry(condition.subscription_id)
                .or_default()
                .push(condition);
        }

        Ok(subscriptions
            .into_iter()
            .map(|subscription| {
                let conditions = grouped.remove(&subscription.id).unwrap_or_default();
                SubscriptionWithConditions {
                    subscription,
                    conditions,
                }
            })
            .collect())
    }

    /// Find a subscription by its public UUID.
    pub async fn find_by_uuid(
        pool: &PgPool,
        subscription_uuid: Uuid,
    ) -> Result<Option<SubscriptionWithConditions>, sqlx::Error> {
        let query = format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE subscription_uuid = $1"
        );
        let Some(subscription) = sqlx::query_as::<_, Subscription>(&query)
            .bind(subscription_uuid)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let conditions = conditions_for(pool, subscription.id).await?;

        Ok(Some(SubscriptionWithConditions {
            subscription,
            conditions,
        }))
    }

    /// Update a subscription by its public UUID.
    ///
    /// Each supplied condition is updated in place by its `condition_uuid`;
    /// a missing condition or subscription aborts the whole update (the
    /// transaction rolls back).
    pub async fn update_by_uuid(
        pool: &PgPool,
        subscription_uuid: Uuid,
        input: &UpdateSubscription,
    ) -> Result<SubscriptionWithConditions, SubscriptionUpdateError> {
        let mut tx = pool.begin().await?;

        for condition in &input.conditions {
            let result = sqlx::query(
                "UPDATE conditions
                 SET condition = $2, op = $3, threshold = $4, updated_at = NOW()
                 WHERE condition_uuid = $1",
            )
            .bind(condition.condition_uuid)
            .bind(condition.attribute.as_str())
            .bind(condition.op.as_str())
            .bind(condition.threshold)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(SubscriptionUpdateError::ConditionNotFound(
                    condition.condition_uuid,
                ));
            }
        }

        let query = format!(
            "UPDATE subscriptions
             SET email = COALESCE($2, email),
                 city = COALESCE($3, city),
                 country_code = COALESCE($4, country_code),
                 updated_at = NOW()
             WHERE subscription_uuid = $1
             RETURNING {SUBSCRIPTION_COLUMNS}"
        );
        let Some(subscription) = sqlx::query_as::<_, Subscription>(&query)
            .bind(subscription_uuid)
            .bind(&input.email)
            .bind(&input.city)
            .bind(&input.country_code)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Err(SubscriptionUpdateError::SubscriptionNotFound(
                subscription_uuid,
            ));
        };

        let conditions = conditions_for(&mut *tx, subscription.id).await?;

        tx.commit().await?;

        Ok(SubscriptionWithConditions {
            subscription,
            conditions,
        })
    }

    /// Delete a subscription by its public UUID. Conditions cascade.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete_by_uuid(
        pool: &PgPool,
        subscription_uuid: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE subscription_uuid = $1")
            .bind(subscription_uuid)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Fetch the conditions belonging to a subscription, in insertion order.
async fn conditions_for<'e, E>(
    executor: E,
    subscription_id: DbId,
) -> Result<Vec<Condition>, sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    let query =
        format!("SELECT {CONDITION_COLUMNS} FROM conditions WHERE subscription_id = $1 ORDER BY id");
    sqlx::query_as::<_, Condition>(&query)
        .bind(subscription_id)
        .fetch_all(executor)
        .await
}
