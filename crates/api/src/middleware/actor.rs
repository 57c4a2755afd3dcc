//! Acting-identity extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use amora_core::error::CoreError;
use amora_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the authenticated user id. Authentication itself happens
/// upstream; this service trusts the header.
pub const ACTOR_HEADER: &str = "x-user-id";

/// The user performing the request, recorded in audit columns.
///
/// ```ignore
/// async fn delete(actor: Actor, Path(id): Path<DbId>) -> AppResult<StatusCode> {
///     tracing::info!(actor = actor.0, id, "deleting");
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor(pub DbId);

impl FromRequestParts<AppState> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing {ACTOR_HEADER} header"
                )))
            })?;

        match raw.trim().parse::<DbId>() {
            Ok(id) if id > 0 => Ok(Actor(id)),
            _ => Err(AppError::Core(CoreError::Unauthorized(format!(
                "Invalid {ACTOR_HEADER} header"
            )))),
        }
    }
}
