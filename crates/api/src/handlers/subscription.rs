//! Handlers for the `/subscriptions` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use validator::Validate;
use weather_core::error::CoreError;
use weather_db::models::subscription::{
    CreateSubscription, SubscriptionWithConditions, UpdateSubscription,
};
use weather_db::repositories::SubscriptionRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/subscriptions
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSubscription>,
) -> AppResult<(StatusCode, Json<SubscriptionWithConditions>)> {
    input.validate()?;
    let subscription = SubscriptionRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(subscription)))
}

/// GET /api/v1/subscriptions
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SubscriptionWithConditions>>> {
    let subscriptions = SubscriptionRepo::list_all(&state.pool).await?;
    Ok(Json(subscriptions))
}

/// GET /api/v1/subscriptions/{subscription_uuid}
pub async fn get_by_uuid(
    State(state): State<AppState>,
    Path(subscription_uuid): Path<Uuid>,
) -> AppResult<Json<SubscriptionWithConditions>> {
    let subscription = SubscriptionRepo::find_by_uuid(&state.pool, subscription_uuid)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subscription",
            uuid: subscription_uuid,
        }))?;
    Ok(Json(subscription))
}

/// PUT /api/v1/subscriptions/{subscription_uuid}
pub async fn update(
    State(state): State<AppState>,
    Path(subscription_uuid): Path<Uuid>,
    Json(input): Json<UpdateSubscription>,
) -> AppResult<Json<SubscriptionWithConditions>> {
    input.validate()?;
    let subscription =
        SubscriptionRepo::update_by_uuid(&state.pool, subscription_uuid, &input).await?;
    Ok(Json(subscription))
}

/// DELETE /api/v1/subscriptions/{subscription_uuid}
pub async fn delete(
    State(state): State<AppState>,
    Path(subscription_uuid): Path<Uuid>,
) -> AppResult<StatusCode> {
    let deleted = SubscriptionRepo::delete_by_uuid(&state.pool, subscription_uuid).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Subscription",
            uuid: subscription_uuid,
        }))
    }
}
