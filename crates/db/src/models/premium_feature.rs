//! Premium feature entity.

use amora_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::nullable::NullableDataType;

/// A row from the `premium_features` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumFeature {
    pub id: DbId,
    pub name: String,
    pub flag: String,
    pub status: i64,
    pub created_at: NullableDataType<Timestamp>,
    pub created_by: NullableDataType<DbId>,
    pub updated_at: NullableDataType<Timestamp>,
    pub updated_by: NullableDataType<DbId>,
    pub deleted_at: NullableDataType<Timestamp>,
    pub deleted_by: NullableDataType<DbId>,
}

crate::record!(scan PremiumFeature {
    id => "id",
    name => "name",
    flag => "flag",
    status => "status",
    created_at => "created_at",
    created_by => "created_by",
    updated_at => "updated_at",
    updated_by => "updated_by",
    deleted_at => "deleted_at",
    deleted_by => "deleted_by",
});

/// Write shape for premium features. Only `name` and `flag` come from the
/// request body; the rest is stamped by the audit layer.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct PremiumFeatureInput {
    #[validate(length(max = 255))]
    pub name: String,
    #[validate(length(max = 64))]
    pub flag: String,
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

crate::record!(PremiumFeatureInput {
    name => "name",
    flag => "flag",
    status => "status",
    created_at => "created_at",
    created_by => "created_by",
    updated_at => "updated_at",
    updated_by => "updated_by",
    deleted_at => "deleted_at",
    deleted_by => "deleted_by",
});

crate::audited!(PremiumFeatureInput);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PremiumFeatureFilter {
    pub id: DbId,
    pub name: String,
    pub flag: String,
}

crate::record!(PremiumFeatureFilter {
    id => "id",
    name => "name",
    flag => "flag",
});
