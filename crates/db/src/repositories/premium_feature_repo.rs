//! Repository for the `premium_features` table.

use sqlx::PgPool;

use crate::models::premium_feature::{PremiumFeature, PremiumFeatureFilter, PremiumFeatureInput};
use crate::repository::BaseRepo;

pub const TABLE: &str = "premium_features";

/// Premium features need nothing beyond the generic operations.
#[derive(Clone)]
pub struct PremiumFeatureRepo {
    base: BaseRepo<PremiumFeatureInput, PremiumFeature, PremiumFeatureFilter>,
}

impl PremiumFeatureRepo {
    pub fn new(pool: PgPool) -> Self {
        Self {
            base: BaseRepo::new(pool, TABLE),
        }
    }

    pub fn base(&self) -> &BaseRepo<PremiumFeatureInput, PremiumFeature, PremiumFeatureFilter> {
        &self.base
    }
}
