use axum::routing::{get, put};
use axum::Router;

use crate::handlers::user_activity;
use crate::state::AppState;

/// Routes mounted at `/user-activities`.
///
/// ```text
/// GET    /             -> list
/// POST   /             -> create
/// GET    /today-count  -> today_count
/// PUT    /{id}         -> update
/// DELETE /{id}         -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user_activity::list).post(user_activity::create))
        .route("/today-count", get(user_activity::today_count))
        .route("/{id}", put(user_activity::update).delete(user_activity::delete))
}
