//! Integration tests for audit stamping and soft delete.

use std::sync::Arc;

use amora_core::clock::{Clock, FixedClock};
use amora_core::paging::Paging;
use amora_core::types::{Timestamp, STATUS_DELETED};
use amora_db::audit::AuditedRepo;
use amora_db::models::premium_feature::{
    PremiumFeature, PremiumFeatureFilter, PremiumFeatureInput,
};
use amora_db::repositories::PremiumFeatureRepo;
use amora_db::RepoError;
use assert_matches::assert_matches;
use chrono::TimeZone;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

type Features = AuditedRepo<PremiumFeatureInput, PremiumFeature, PremiumFeatureFilter>;

fn noon() -> Timestamp {
    chrono::Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn features(pool: PgPool, at: Timestamp) -> Features {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock(at));
    AuditedRepo::new(PremiumFeatureRepo::new(pool).base().clone(), clock)
}

fn gold() -> PremiumFeatureInput {
    PremiumFeatureInput {
        name: "gold".into(),
        flag: "GOLD".into(),
        ..Default::default()
    }
}

/// Every row, deleted or not.
async fn raw_rows(repo: &Features) -> Vec<PremiumFeature> {
    let (rows, _) = repo
        .repo()
        .get(&CancellationToken::new(), &Paging::default())
        .await
        .unwrap();
    rows
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_stamps_creator_and_time(pool: PgPool) {
    let repo = features(pool, noon());

    repo.create(&CancellationToken::new(), 7, gold()).await.unwrap();

    let row = &raw_rows(&repo).await[0];
    assert_eq!(row.status, 1);
    assert_eq!(row.created_at.value(), Some(&noon()));
    assert_eq!(row.created_by.value(), Some(&7));
    assert!(!row.updated_at.is_valid());
    assert!(!row.deleted_at.is_valid());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_stamps_updater_and_keeps_creator(pool: PgPool) {
    let repo = features(pool, noon());
    let cancel = CancellationToken::new();
    repo.create(&cancel, 7, gold()).await.unwrap();
    let id = raw_rows(&repo).await[0].id;

    let rename = PremiumFeatureInput {
        name: "gold plus".into(),
        ..Default::default()
    };
    repo.update(&cancel, 8, rename, id).await.unwrap();

    let row = &raw_rows(&repo).await[0];
    assert_eq!(row.name, "gold plus");
    assert_eq!(row.created_by.value(), Some(&7));
    assert_eq!(row.updated_by.value(), Some(&8));
    assert_eq!(row.updated_at.value(), Some(&noon()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_hides_row_but_keeps_it(pool: PgPool) {
    let repo = features(pool, noon());
    let cancel = CancellationToken::new();
    repo.create(&cancel, 7, gold()).await.unwrap();
    let id = raw_rows(&repo).await[0].id;

    repo.delete(&cancel, 9, id).await.unwrap();

    let (visible, total) = repo.list(&cancel, Paging::default()).await.unwrap();
    assert!(visible.is_empty());
    assert_eq!(total, 0);

    let row = &raw_rows(&repo).await[0];
    assert_eq!(row.status, STATUS_DELETED);
    assert_eq!(row.name, "gold");
    assert_eq!(row.deleted_by.value(), Some(&9));
    assert_eq!(row.deleted_at.value(), Some(&noon()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_ignores_caller_activity_flag(pool: PgPool) {
    let repo = features(pool, noon());
    let cancel = CancellationToken::new();
    repo.create(&cancel, 1, gold()).await.unwrap();
    let id = raw_rows(&repo).await[0].id;
    repo.delete(&cancel, 1, id).await.unwrap();

    let (_, total) = repo
        .list(&cancel, Paging::default().active_only(false))
        .await
        .unwrap();
    assert_eq!(total, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_missing_id_affects_no_row(pool: PgPool) {
    let err = features(pool, noon())
        .delete(&CancellationToken::new(), 1, 404)
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::NoRowAffected { id: Some(404), .. });
}
