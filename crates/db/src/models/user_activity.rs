//! Swipe history: one row per pass or like.

use amora_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::nullable::NullableDataType;

/// A row from the `user_activities` table. Exactly one of
/// `passed_user_id` and `liked_user_id` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActivity {
    pub id: DbId,
    pub user_id: DbId,
    pub passed_user_id: NullableDataType<DbId>,
    pub liked_user_id: NullableDataType<DbId>,
    pub status: i64,
    pub created_at: NullableDataType<Timestamp>,
    pub created_by: NullableDataType<DbId>,
    pub updated_at: NullableDataType<Timestamp>,
    pub updated_by: NullableDataType<DbId>,
    pub deleted_at: NullableDataType<Timestamp>,
    pub deleted_by: NullableDataType<DbId>,
}

crate::record!(scan UserActivity {
    id => "id",
    user_id => "user_id",
    passed_user_id => "passed_user_id",
    liked_user_id => "liked_user_id",
    status => "status",
    created_at => "created_at",
    created_by => "created_by",
    updated_at => "updated_at",
    updated_by => "updated_by",
    deleted_at => "deleted_at",
    deleted_by => "deleted_by",
});

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserActivityInput {
    pub user_id: DbId,
    pub passed_user_id: DbId,
    pub liked_user_id: DbId,
    #[serde(skip)]
    pub status: i64,
    #[serde(skip)]
    pub created_at: Timestamp,
    #[serde(skip)]
    pub created_by: DbId,
    #[serde(skip)]
    pub updated_at: Timestamp,
    #[serde(skip)]
    pub updated_by: DbId,
    #[serde(skip)]
    pub deleted_at: Timestamp,
    #[serde(skip)]
    pub deleted_by: DbId,
}

crate::record!(UserActivityInput {
    user_id => "user_id",
    passed_user_id => "passed_user_id",
    liked_user_id => "liked_user_id",
    status => "status",
    created_at => "created_at",
    created_by => "created_by",
    updated_at => "updated_at",
    updated_by => "updated_by",
    deleted_at => "deleted_at",
    deleted_by => "deleted_by",
});

crate::audited!(UserActivityInput);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserActivityFilter {
    pub id: DbId,
    pub user_id: DbId,
    pub passed_user_id: DbId,
    pub liked_user_id: DbId,
}

crate::record!(UserActivityFilter {
    id => "id",
    user_id => "user_id",
    passed_user_id => "passed_user_id",
    liked_user_id => "liked_user_id",
});
