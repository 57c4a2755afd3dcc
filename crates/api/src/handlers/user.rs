//! Handlers for the `/users` resource.

use amora_core::clock::DayWindow;
use amora_core::paging::Paging;
use amora_core::types::DbId;
use amora_db::models::user::{RecommendedUser, User, UserInput};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::actor::Actor;
use crate::query::UserParams;
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<UserParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<Paginated<User>>>> {
    let Query(params) = params?;
    let paging = Paging::from(params);
    let (items, total) = state
        .services
        .users
        .list(&state.request_token(), paging.clone())
        .await?;
    Ok(Json(DataResponse {
        data: Paginated::new(items, total, &paging),
    }))
}

/// PUT /api/v1/users/{id}
///
/// Sparse update. Sending `premiumFeatureId` subscribes the user.
pub async fn update(
    State(state): State<AppState>,
    actor: Actor,
    id: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id?;
    let Json(input) = payload?;
    input.validate()?;
    if input.premium_feature_id > 0 {
        tracing::info!(user_id = id, feature_id = input.premium_feature_id, "Subscribing user");
    }
    state
        .services
        .users
        .update(&state.request_token(), actor.0, input, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    actor: Actor,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id?;
    state
        .services
        .users
        .delete(&state.request_token(), actor.0, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/recommendation
///
/// Next profile for the acting user among those they have not swiped on
/// today. `data` is `null` when nobody is left.
pub async fn recommendation(
    State(state): State<AppState>,
    actor: Actor,
) -> AppResult<Json<DataResponse<Option<RecommendedUser>>>> {
    let window = DayWindow::today(state.services.clock.as_ref());
    let data = state
        .services
        .user_queries
        .recommended(&state.request_token(), actor.0, window)
        .await?;
    Ok(Json(DataResponse { data }))
}
