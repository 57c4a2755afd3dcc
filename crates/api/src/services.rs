//! Entity services: the repositories with audit stamping applied.

use std::sync::Arc;

use amora_core::clock::Clock;
use amora_db::audit::AuditedRepo;
use amora_db::models::premium_feature::{
    PremiumFeature, PremiumFeatureFilter, PremiumFeatureInput,
};
use amora_db::models::user::{User, UserFilter, UserInput};
use amora_db::models::user_activity::{UserActivity, UserActivityFilter, UserActivityInput};
use amora_db::repositories::{Repositories, UserActivityRepo, UserRepo};

pub type PremiumFeatureService =
    AuditedRepo<PremiumFeatureInput, PremiumFeature, PremiumFeatureFilter>;
pub type UserService = AuditedRepo<UserInput, User, UserFilter>;
pub type UserActivityService = AuditedRepo<UserActivityInput, UserActivity, UserActivityFilter>;

/// Audited CRUD per entity, plus the swipe queries and the clock that
/// decides which day they look at.
#[derive(Clone)]
pub struct Services {
    pub premium_features: PremiumFeatureService,
    pub users: UserService,
    pub user_activities: UserActivityService,
    pub user_queries: UserRepo,
    pub activity_queries: UserActivityRepo,
    pub clock: Arc<dyn Clock>,
}

impl Services {
    pub fn new(repos: Repositories, clock: Arc<dyn Clock>) -> Self {
        Self {
            premium_features: AuditedRepo::new(
                repos.premium_features.base().clone(),
                Arc::clone(&clock),
            ),
            users: AuditedRepo::new(repos.users.base().clone(), Arc::clone(&clock)),
            user_activities: AuditedRepo::new(
                repos.user_activities.base().clone(),
                Arc::clone(&clock),
            ),
            user_queries: repos.users,
            activity_queries: repos.user_activities,
            clock,
        }
    }
}
