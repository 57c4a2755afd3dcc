//! User entity and the recommendation projection.

use amora_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::nullable::NullableDataType;

/// A row from the `users` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub user_name: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub image: NullableDataType<String>,
    pub premium_feature_id: NullableDataType<DbId>,
    pub status: i64,
    pub created_at: NullableDataType<Timestamp>,
    pub created_by: NullableDataType<DbId>,
    pub updated_at: NullableDataType<Timestamp>,
    pub updated_by: NullableDataType<DbId>,
    pub deleted_at: NullableDataType<Timestamp>,
    pub deleted_by: NullableDataType<DbId>,
}

crate::record!(scan User {
    id => "id",
    user_name => "user_name",
    password => "password",
    image => "image",
    premium_feature_id => "premium_feature_id",
    status => "status",
    created_at => "created_at",
    created_by => "created_by",
    updated_at => "updated_at",
    updated_by => "updated_by",
    deleted_at => "deleted_at",
    deleted_by => "deleted_by",
});

/// Write shape for users. `password` is expected to be hashed already.
/// Setting `premium_feature_id` subscribes the user to that feature.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UserInput {
    #[validate(length(max = 64))]
    pub user_name: String,
    pub password: String,
    pub image: String,
    #[validate(range(min = 0))]
    pub premium_feature_id: DbId,
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

crate::record!(UserInput {
    user_name => "user_name",
    password => "password",
    image => "image",
    premium_feature_id => "premium_feature_id",
    status => "status",
    created_at => "created_at",
    created_by => "created_by",
    updated_at => "updated_at",
    updated_by => "updated_by",
    deleted_at => "deleted_at",
    deleted_by => "deleted_by",
});

crate::audited!(UserInput);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub id: DbId,
    pub user_name: String,
    pub premium_feature_id: DbId,
}

crate::record!(UserFilter {
    id => "id",
    user_name => "user_name",
    premium_feature_id => "premium_feature_id",
});

/// The next profile to show a user.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedUser {
    pub id: DbId,
    pub user_name: String,
    pub premium_feature_id: Option<DbId>,
    pub image: Option<String>,
}
