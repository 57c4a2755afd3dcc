use amora_core::error::CoreError;
use amora_db::RepoError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`RepoError`] for persistence
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`]
/// to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `amora_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A repository failure from `amora_db`.
    #[error(transparent)]
    Repo(RepoError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// A write that matched no existing id becomes [`CoreError::NotFound`];
/// every other repository failure is kept as is.
impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NoRowAffected {
                table,
                id: Some(id),
            } => AppError::Core(CoreError::NotFound { entity: table, id }),
            other => AppError::Repo(other),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors.to_string()))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            // --- Repository errors ---
            AppError::Repo(err) => classify_repo_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a repository error into an HTTP status, error code, and message.
///
/// Missed ids never reach this point: they are turned into
/// [`CoreError::NotFound`] on conversion.
///
/// - `NoRowAffected` without an id (nothing to write) maps to 400.
/// - `Cancelled` maps to 503: the server is shutting down.
/// - Unique constraint violations (Postgres `23505`) map to 409.
/// - Foreign key violations (Postgres `23503`) map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_repo_error(err: &RepoError) -> (StatusCode, &'static str, String) {
    match err {
        RepoError::NoRowAffected { .. } => (
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            "Nothing to write".to_string(),
        ),
        RepoError::Cancelled => (
            StatusCode::SERVICE_UNAVAILABLE,
            "UNAVAILABLE",
            "Request cancelled".to_string(),
        ),
        other => {
            let db_err = other.database_error().and_then(|e| e.as_database_error());
            if let Some(db_err) = db_err {
                let constraint = db_err.constraint().unwrap_or("unknown");
                match db_err.code().as_deref() {
                    Some("23505") => {
                        return (
                            StatusCode::CONFLICT,
                            "CONFLICT",
                            format!("Duplicate value violates unique constraint: {constraint}"),
                        )
                    }
                    Some("23503") => {
                        return (
                            StatusCode::BAD_REQUEST,
                            "BAD_REQUEST",
                            format!("Referenced row does not exist: {constraint}"),
                        )
                    }
                    _ => {}
                }
            }
            tracing::error!(error = %other, total = ?other.total(), "Repository error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
