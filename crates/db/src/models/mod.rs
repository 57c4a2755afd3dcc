//! Entity triples: a write-side Input, the persisted Model, and an
//! equality Filter per table.

pub mod premium_feature;
pub mod user;
pub mod user_activity;
