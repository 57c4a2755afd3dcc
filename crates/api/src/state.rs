use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;
use crate::services::Services;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: amora_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Audited repositories for every entity.
    pub services: Services,
    /// Cancelled when the server gives up on draining in-flight requests.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Cancellation token for one request's database work.
    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}
