//! Handlers for the `/user-activities` resource.

use amora_core::clock::DayWindow;
use amora_core::paging::Paging;
use amora_core::types::DbId;
use amora_db::models::user_activity::{UserActivity, UserActivityInput};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::actor::Actor;
use crate::query::UserActivityParams;
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SwipeCount {
    pub count: i64,
}

/// A swipe targets exactly one user: either passed or liked, never both,
/// and never the swiping user.
fn check_swipe(input: &UserActivityInput, creating: bool) -> AppResult<()> {
    let passed = input.passed_user_id > 0;
    let liked = input.liked_user_id > 0;
    if passed && liked {
        return Err(AppError::BadRequest(
            "Set passedUserId or likedUserId, not both".to_string(),
        ));
    }
    if creating && !passed && !liked {
        return Err(AppError::BadRequest(
            "One of passedUserId or likedUserId is required".to_string(),
        ));
    }
    let target = input.passed_user_id.max(input.liked_user_id);
    if input.user_id > 0 && target == input.user_id {
        return Err(AppError::BadRequest("Users cannot swipe on themselves".to_string()));
    }
    Ok(())
}

/// GET /api/v1/user-activities
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<UserActivityParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<Paginated<UserActivity>>>> {
    let Query(params) = params?;
    let paging = Paging::from(params);
    let (items, total) = state
        .services
        .user_activities
        .list(&state.request_token(), paging.clone())
        .await?;
    Ok(Json(DataResponse {
        data: Paginated::new(items, total, &paging),
    }))
}

/// POST /api/v1/user-activities
///
/// Records a pass or a like. `userId` defaults to the acting user.
pub async fn create(
    State(state): State<AppState>,
    actor: Actor,
    payload: Result<Json<UserActivityInput>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(mut input) = payload?;
    if input.user_id == 0 {
        input.user_id = actor.0;
    }
    check_swipe(&input, true)?;
    state
        .services
        .user_activities
        .create(&state.request_token(), actor.0, input)
        .await?;
    Ok(StatusCode::CREATED)
}

/// PUT /api/v1/user-activities/{id}
pub async fn update(
    State(state): State<AppState>,
    actor: Actor,
    id: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<UserActivityInput>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id?;
    let Json(input) = payload?;
    check_swipe(&input, false)?;
    state
        .services
        .user_activities
        .update(&state.request_token(), actor.0, input, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/user-activities/{id}
pub async fn delete(
    State(state): State<AppState>,
    actor: Actor,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id?;
    state
        .services
        .user_activities
        .delete(&state.request_token(), actor.0, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/user-activities/today-count
///
/// How many swipes the acting user made since midnight UTC.
pub async fn today_count(
    State(state): State<AppState>,
    actor: Actor,
) -> AppResult<Json<DataResponse<SwipeCount>>> {
    let window = DayWindow::today(state.services.clock.as_ref());
    let count = state
        .services
        .activity_queries
        .count_in_window(&state.request_token(), actor.0, window)
        .await?;
    Ok(Json(DataResponse {
        data: SwipeCount { count },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(user_id: DbId, passed: DbId, liked: DbId) -> UserActivityInput {
        UserActivityInput {
            user_id,
            passed_user_id: passed,
            liked_user_id: liked,
            ..Default::default()
        }
    }

    #[test]
    fn create_needs_exactly_one_target() {
        assert!(check_swipe(&swipe(1, 2, 0), true).is_ok());
        assert!(check_swipe(&swipe(1, 0, 2), true).is_ok());
        assert!(check_swipe(&swipe(1, 0, 0), true).is_err());
        assert!(check_swipe(&swipe(1, 2, 3), true).is_err());
    }

    #[test]
    fn update_may_leave_targets_unchanged() {
        assert!(check_swipe(&swipe(0, 0, 0), false).is_ok());
        assert!(check_swipe(&swipe(0, 2, 3), false).is_err());
    }

    #[test]
    fn self_swipe_is_rejected() {
        assert!(check_swipe(&swipe(4, 0, 4), true).is_err());
        assert!(check_swipe(&swipe(4, 4, 0), false).is_err());
    }
}
