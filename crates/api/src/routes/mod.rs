pub mod health;
pub mod premium_feature;
pub mod user;
pub mod user_activity;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /premium-features    list, create, update, delete
/// /users               list, delete
/// /user-activities     list, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/premium-features", premium_feature::router())
        .nest("/users", user::router())
        .nest("/user-activities", user_activity::router())
}
