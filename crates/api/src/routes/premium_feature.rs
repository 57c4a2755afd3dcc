use axum::routing::{get, put};
use axum::Router;

use crate::handlers::premium_feature;
use crate::state::AppState;

/// Routes mounted at `/premium-features`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(premium_feature::list).post(premium_feature::create))
        .route(
            "/{id}",
            put(premium_feature::update).delete(premium_feature::delete),
        )
}
