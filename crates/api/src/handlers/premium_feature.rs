//! Handlers for the `/premium-features` resource.

use amora_core::paging::Paging;
use amora_core::types::DbId;
use amora_db::models::premium_feature::{PremiumFeature, PremiumFeatureInput};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::actor::Actor;
use crate::query::PremiumFeatureParams;
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

/// GET /api/v1/premium-features
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<PremiumFeatureParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<Paginated<PremiumFeature>>>> {
    let Query(params) = params?;
    let paging = Paging::from(params);
    let (items, total) = state
        .services
        .premium_features
        .list(&state.request_token(), paging.clone())
        .await?;
    Ok(Json(DataResponse {
        data: Paginated::new(items, total, &paging),
    }))
}

/// POST /api/v1/premium-features
pub async fn create(
    State(state): State<AppState>,
    actor: Actor,
    payload: Result<Json<PremiumFeatureInput>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(input) = payload?;
    input.validate()?;
    state
        .services
        .premium_features
        .create(&state.request_token(), actor.0, input)
        .await?;
    Ok(StatusCode::CREATED)
}

/// PUT /api/v1/premium-features/{id}
///
/// Empty strings leave the stored value unchanged.
pub async fn update(
    State(state): State<AppState>,
    actor: Actor,
    id: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<PremiumFeatureInput>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id?;
    let Json(input) = payload?;
    input.validate()?;
    state
        .services
        .premium_features
        .update(&state.request_token(), actor.0, input, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/premium-features/{id}
pub async fn delete(
    State(state): State<AppState>,
    actor: Actor,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id?;
    state
        .services
        .premium_features
        .delete(&state.request_token(), actor.0, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
