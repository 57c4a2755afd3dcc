//! Generic repository shared by every entity.
//!
//! [`BaseRepo`] is parameterised by an Input (write shape), a Model (full
//! row) and a Filter (equality predicates). It has no per-entity SQL: all
//! statements come from the record descriptors via [`crate::statement`].

use std::future::Future;
use std::marker::PhantomData;

use amora_core::paging::Paging;
use amora_core::types::DbId;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tokio_util::sync::CancellationToken;

use crate::error::RepoError;
use crate::record::{check_descriptors, Record};
use crate::statement::{
    build_filter, build_write, count_statement, insert_statement, select_statement,
    update_statement, BindValues, Statement, WriteSet,
};

/// Transactional create/update and filtered, paginated reads over one table.
pub struct BaseRepo<I, M, F> {
    pool: PgPool,
    table: &'static str,
    _records: PhantomData<fn() -> (I, M, F)>,
}

impl<I, M, F> Clone for BaseRepo<I, M, F> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            table: self.table,
            _records: PhantomData,
        }
    }
}

impl<I, M, F> BaseRepo<I, M, F>
where
    I: Record + Sync,
    M: Record + for<'r> FromRow<'r, PgRow> + Send + Unpin,
    F: Record + Sync,
{
    /// Bind the repository to `table`.
    ///
    /// # Panics
    ///
    /// Panics if the record descriptors are inconsistent with each other or
    /// the table name is not a plain identifier. This is a wiring defect and
    /// must surface at startup, not on the first request.
    pub fn new(pool: PgPool, table: &'static str) -> Self {
        if let Err(defect) = check_descriptors::<I, M, F>(table) {
            panic!("invalid record descriptors for `{table}`: {defect}");
        }
        Self {
            pool,
            table,
            _records: PhantomData,
        }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert the non-zero fields of `input` as a new row.
    pub async fn create(&self, cancel: &CancellationToken, input: &I) -> Result<(), RepoError> {
        let write = build_write(input);
        cancellable(cancel, self.write(write, None)).await
    }

    /// Overwrite the non-zero fields of `input` on row `id`.
    ///
    /// Fails with [`RepoError::NoRowAffected`] when `id` does not exist.
    pub async fn update(
        &self,
        cancel: &CancellationToken,
        input: &I,
        id: DbId,
    ) -> Result<(), RepoError> {
        let write = build_write(input);
        cancellable(cancel, self.write(write, Some(id))).await
    }

    /// One page of rows matching `paging`, plus the total number of matches.
    ///
    /// The COUNT and the SELECT run as separate statements, so under
    /// concurrent writes the total and the page may disagree.
    pub async fn get(
        &self,
        cancel: &CancellationToken,
        paging: &Paging<F>,
    ) -> Result<(Vec<M>, i64), RepoError> {
        cancellable(cancel, self.list(paging)).await
    }

    async fn write(&self, write: WriteSet, id: Option<DbId>) -> Result<(), RepoError> {
        let table = self.table;
        let mut tx = self.pool.begin().await.map_err(RepoError::Begin)?;

        if write.is_empty() {
            tracing::warn!(table, ?id, "Rejected write with no non-zero fields");
            rollback(tx, table).await;
            return Err(RepoError::NoRowAffected { table, id });
        }

        let Statement { sql, args } = match id {
            Some(id) => update_statement(table, write, id),
            None => insert_statement(table, write),
        };
        tracing::debug!(table, %sql, "Executing write");

        let done = match sqlx::query(&sql).bind_all(args).execute(&mut *tx).await {
            Ok(done) => done,
            Err(source) => {
                rollback(tx, table).await;
                return Err(RepoError::Execute { table, source });
            }
        };

        if done.rows_affected() == 0 {
            tracing::warn!(table, ?id, "Write affected no rows");
            rollback(tx, table).await;
            return Err(RepoError::NoRowAffected { table, id });
        }

        tx.commit().await.map_err(RepoError::Commit)?;
        tracing::debug!(table, ?id, rows = done.rows_affected(), "Write committed");
        Ok(())
    }

    async fn list(&self, paging: &Paging<F>) -> Result<(Vec<M>, i64), RepoError> {
        let table = self.table;
        let predicate = build_filter(&paging.filter, paging.is_active);

        let count = count_statement(table, &predicate);
        let total = sqlx::query_scalar::<_, i64>(&count.sql)
            .bind_all(count.args)
            .fetch_one(&self.pool)
            .await
            .map_err(|source| RepoError::Count { table, source })?;

        let select = select_statement(
            table,
            M::COLUMNS,
            &predicate,
            paging.limit(),
            paging.offset(),
        );
        tracing::debug!(table, sql = %select.sql, total, "Listing rows");

        let rows = sqlx::query_as::<_, M>(&select.sql)
            .bind_all(select.args)
            .fetch_all(&self.pool)
            .await
            .map_err(|source| RepoError::from_select(table, total, source))?;

        Ok((rows, total))
    }
}

/// Roll back explicitly so the outcome is logged. Dropping the transaction
/// would also roll it back.
async fn rollback(tx: Transaction<'_, Postgres>, table: &'static str) {
    if let Err(e) = tx.rollback().await {
        tracing::warn!(table, error = %e, "Rollback failed");
    }
}

/// Run `fut` unless `cancel` fires first. A cancelled write drops its open
/// transaction, which rolls it back.
pub(crate) async fn cancellable<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T, RepoError>>,
) -> Result<T, RepoError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(RepoError::Cancelled),
        result = fut => result,
    }
}
