//! Query parameters for the list endpoints.
//!
//! Each entity accepts `?page=&take=` plus its equality filter fields.
//! Absent filter fields match everything.

use amora_core::paging::Paging;
use amora_core::types::DbId;
use amora_db::models::premium_feature::PremiumFeatureFilter;
use amora_db::models::user::UserFilter;
use amora_db::models::user_activity::UserActivityFilter;
use serde::Deserialize;

/// Largest page a client may request.
pub const MAX_TAKE: i64 = 100;

fn paging<F>(page: Option<i64>, take: Option<i64>, filter: F) -> Paging<F> {
    let mut paging = Paging::new(filter);
    if let Some(page) = page {
        paging = paging.with_page(page);
    }
    if let Some(take) = take {
        paging = paging.with_take(take.min(MAX_TAKE));
    }
    paging.active_only(true)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumFeatureParams {
    pub page: Option<i64>,
    pub take: Option<i64>,
    pub id: Option<DbId>,
    pub name: Option<String>,
    pub flag: Option<String>,
}

impl From<PremiumFeatureParams> for Paging<PremiumFeatureFilter> {
    fn from(p: PremiumFeatureParams) -> Self {
        let filter = PremiumFeatureFilter {
            id: p.id.unwrap_or_default(),
            name: p.name.unwrap_or_default(),
            flag: p.flag.unwrap_or_default(),
        };
        paging(p.page, p.take, filter)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserParams {
    pub page: Option<i64>,
    pub take: Option<i64>,
    pub id: Option<DbId>,
    pub user_name: Option<String>,
    pub premium_feature_id: Option<DbId>,
}

impl From<UserParams> for Paging<UserFilter> {
    fn from(p: UserParams) -> Self {
        let filter = UserFilter {
            id: p.id.unwrap_or_default(),
            user_name: p.user_name.unwrap_or_default(),
            premium_feature_id: p.premium_feature_id.unwrap_or_default(),
        };
        paging(p.page, p.take, filter)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActivityParams {
    pub page: Option<i64>,
    pub take: Option<i64>,
    pub id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub passed_user_id: Option<DbId>,
    pub liked_user_id: Option<DbId>,
}

impl From<UserActivityParams> for Paging<UserActivityFilter> {
    fn from(p: UserActivityParams) -> Self {
        let filter = UserActivityFilter {
            id: p.id.unwrap_or_default(),
            user_id: p.user_id.unwrap_or_default(),
            passed_user_id: p.passed_user_id.unwrap_or_default(),
            liked_user_id: p.liked_user_id.unwrap_or_default(),
        };
        paging(p.page, p.take, filter)
    }
}
