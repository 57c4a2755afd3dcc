//! Per-entity repositories built on [`BaseRepo`](crate::BaseRepo).

pub mod premium_feature_repo;
pub mod user_activity_repo;
pub mod user_repo;

pub use premium_feature_repo::PremiumFeatureRepo;
pub use user_activity_repo::UserActivityRepo;
pub use user_repo::UserRepo;

use sqlx::PgPool;

/// Every repository, bound to one pool.
#[derive(Clone)]
pub struct Repositories {
    pub premium_features: PremiumFeatureRepo,
    pub users: UserRepo,
    pub user_activities: UserActivityRepo,
}

impl Repositories {
    /// # Panics
    ///
    /// Panics if any entity's record descriptors are inconsistent.
    pub fn new(pool: PgPool) -> Self {
        Self {
            premium_features: PremiumFeatureRepo::new(pool.clone()),
            users: UserRepo::new(pool.clone()),
            user_activities: UserActivityRepo::new(pool),
        }
    }
}
