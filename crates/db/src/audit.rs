//! Audit stamping on top of [`BaseRepo`].
//!
//! The acting user is always an explicit argument and the time comes from
//! an injected [`Clock`]. "Delete" is an update that flips the status to
//! `STATUS_DELETED` and records who did it and when; rows are never
//! physically removed.

use std::sync::Arc;

use amora_core::clock::Clock;
use amora_core::paging::Paging;
use amora_core::types::{DbId, Timestamp};
use sqlx::postgres::PgRow;
use sqlx::FromRow;
use tokio_util::sync::CancellationToken;

use crate::error::RepoError;
use crate::record::Record;
use crate::repository::BaseRepo;

/// Input shapes carrying the standard audit columns.
pub trait Audited: Default {
    /// Mark the row active and record its creator.
    fn stamp_created(&mut self, at: Timestamp, by: DbId);

    fn stamp_updated(&mut self, at: Timestamp, by: DbId);

    /// A payload that only marks the row deleted.
    fn soft_deleted(at: Timestamp, by: DbId) -> Self;
}

/// Implement [`Audited`] for an Input with `status`, `created_at`,
/// `created_by`, `updated_at`, `updated_by`, `deleted_at` and `deleted_by`
/// fields.
#[macro_export]
macro_rules! audited {
    ($ty:ident) => {
        impl $crate::audit::Audited for $ty {
            fn stamp_created(
                &mut self,
                at: ::amora_core::types::Timestamp,
                by: ::amora_core::types::DbId,
            ) {
                self.status = ::amora_core::types::STATUS_ACTIVE;
                self.created_at = at;
                self.created_by = by;
            }

            fn stamp_updated(
                &mut self,
                at: ::amora_core::types::Timestamp,
                by: ::amora_core::types::DbId,
            ) {
                self.updated_at = at;
                self.updated_by = by;
            }

            fn soft_deleted(
                at: ::amora_core::types::Timestamp,
                by: ::amora_core::types::DbId,
            ) -> Self {
                Self {
                    status: ::amora_core::types::STATUS_DELETED,
                    deleted_at: at,
                    deleted_by: by,
                    ..::std::default::Default::default()
                }
            }
        }
    };
}

/// A [`BaseRepo`] that fills in audit columns before writing.
pub struct AuditedRepo<I, M, F> {
    repo: BaseRepo<I, M, F>,
    clock: Arc<dyn Clock>,
}

impl<I, M, F> Clone for AuditedRepo<I, M, F> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<I, M, F> AuditedRepo<I, M, F>
where
    I: Record + Audited + Sync,
    M: Record + for<'r> FromRow<'r, PgRow> + Send + Unpin,
    F: Record + Sync,
{
    pub fn new(repo: BaseRepo<I, M, F>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub fn repo(&self) -> &BaseRepo<I, M, F> {
        &self.repo
    }

    pub async fn create(
        &self,
        cancel: &CancellationToken,
        actor: DbId,
        mut input: I,
    ) -> Result<(), RepoError> {
        input.stamp_created(self.clock.now(), actor);
        self.repo.create(cancel, &input).await
    }

    pub async fn update(
        &self,
        cancel: &CancellationToken,
        actor: DbId,
        mut input: I,
        id: DbId,
    ) -> Result<(), RepoError> {
        input.stamp_updated(self.clock.now(), actor);
        self.repo.update(cancel, &input, id).await
    }

    /// Soft delete: status becomes `STATUS_DELETED`, the row stays.
    pub async fn delete(
        &self,
        cancel: &CancellationToken,
        actor: DbId,
        id: DbId,
    ) -> Result<(), RepoError> {
        let input = I::soft_deleted(self.clock.now(), actor);
        tracing::info!(table = self.repo.table(), id, actor, "Soft deleting row");
        self.repo.update(cancel, &input, id).await
    }

    /// Active rows only, whatever the caller asked for.
    pub async fn list(
        &self,
        cancel: &CancellationToken,
        mut paging: Paging<F>,
    ) -> Result<(Vec<M>, i64), RepoError> {
        paging.is_active = true;
        self.repo.get(cancel, &paging).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use amora_core::types::{STATUS_ACTIVE, STATUS_DELETED};

    use super::*;
    use crate::models::premium_feature::PremiumFeatureInput;
    use crate::statement::build_write;

    #[test]
    fn soft_delete_payload_touches_only_deletion_columns() {
        let at = chrono::Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap();
        let input = PremiumFeatureInput::soft_deleted(at, 12);

        assert_eq!(input.status, STATUS_DELETED);
        assert_eq!(
            build_write(&input).columns(),
            &["status", "deleted_at", "deleted_by"]
        );
    }

    #[test]
    fn stamps_set_actor_and_time() {
        let at = chrono::Utc.with_ymd_and_hms(2024, 2, 2, 10, 0, 0).unwrap();
        let mut input = PremiumFeatureInput::default();

        input.stamp_created(at, 3);
        assert_eq!(input.status, STATUS_ACTIVE);
        assert_eq!((input.created_at, input.created_by), (at, 3));

        input.stamp_updated(at, 4);
        assert_eq!((input.updated_at, input.updated_by), (at, 4));
        assert_eq!(
            build_write(&input).columns(),
            &["status", "created_at", "created_by", "updated_at", "updated_by"]
        );
    }
}
