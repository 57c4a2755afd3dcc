//! Repository for the `user_activities` table.

use amora_core::clock::DayWindow;
use amora_core::types::DbId;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::error::RepoError;
use crate::models::user_activity::{UserActivity, UserActivityFilter, UserActivityInput};
use crate::repository::{cancellable, BaseRepo};

pub const TABLE: &str = "user_activities";

#[derive(Clone)]
pub struct UserActivityRepo {
    base: BaseRepo<UserActivityInput, UserActivity, UserActivityFilter>,
}

impl UserActivityRepo {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseRepo::new(pool, TABLE),
        }
    }

    pub fn base(&self) -> &BaseRepo<UserActivityInput, UserActivity, UserActivityFilter> {
        &self.base
    }

    /// Number of swipes `user_id` made inside `window`.
    pub async fn count_in_window(
        &self,
        cancel: &CancellationToken,
        user_id: DbId,
        window: DayWindow,
    ) -> Result<i64, RepoError> {
        let query = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM user_activities \
             WHERE user_id = $1 AND created_at >= $2 AND created_at < $3",
        )
        .bind(user_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_one(self.base.pool());

        cancellable(cancel, async {
            query
                .await
                .map_err(|source| RepoError::Query { table: TABLE, source })
        })
        .await
    }
}
