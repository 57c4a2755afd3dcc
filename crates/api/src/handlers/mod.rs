pub mod premium_feature;
pub mod user;
pub mod user_activity;
