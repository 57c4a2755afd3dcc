//! Repository for the `users` table.

use amora_core::clock::DayWindow;
use amora_core::types::DbId;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::error::RepoError;
use crate::models::user::{RecommendedUser, User, UserFilter, UserInput};
use crate::repository::{cancellable, BaseRepo};

pub const TABLE: &str = "users";

/// Active users `$1` has neither passed nor liked inside `[$2, $3)`.
const RECOMMENDED: &str = "\
    SELECT u.id, u.user_name, u.premium_feature_id, u.image
    FROM users u
    WHERE u.id <> $1
      AND u.status = 1
      AND NOT EXISTS (
          SELECT 1 FROM user_activities ua
          WHERE ua.user_id = $1
            AND ua.created_at >= $2 AND ua.created_at < $3
            AND (ua.passed_user_id = u.id OR ua.liked_user_id = u.id)
      )
    ORDER BY u.id
    LIMIT 1";

#[derive(Clone)]
pub struct UserRepo {
    base: BaseRepo<UserInput, User, UserFilter>,
}

impl UserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseRepo::new(pool, TABLE),
        }
    }

    /// Generic create/update/get.
    pub fn base(&self) -> &BaseRepo<UserInput, User, UserFilter> {
        &self.base
    }

    /// The next candidate for `user_id`, skipping everyone they already
    /// swiped on during `window`. `None` when nobody is left.
    pub async fn recommended(
        &self,
        cancel: &CancellationToken,
        user_id: DbId,
        window: DayWindow,
    ) -> Result<Option<RecommendedUser>, RepoError> {
        let query = sqlx::query_as::<_, RecommendedUser>(RECOMMENDED)
            .bind(user_id)
            .bind(window.start)
            .bind(window.end)
            .fetch_optional(self.base.pool());

        cancellable(cancel, async {
            query
                .await
                .map_err(|source| RepoError::Query { table: TABLE, source })
        })
        .await
    }
}
