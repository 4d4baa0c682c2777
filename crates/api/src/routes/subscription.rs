//! Route definitions for the `/subscriptions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::subscription;
use crate::state::AppState;

/// Routes mounted at `/subscriptions`.
///
/// ```text
/// GET    /                       -> list
/// POST   /                       -> create
/// GET    /{subscription_uuid}    -> get_by_uuid
/// PUT    /{subscription_uuid}    -> update
/// DELETE /{subscription_uuid}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(subscription::list).post(subscription::create))
        .route(
            "/{subscription_uuid}",
            get(subscription::get_by_uuid)
                .put(subscription::update)
                .delete(subscription::delete),
        )
}
