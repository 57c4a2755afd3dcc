//! Errors returned by the generic repository.

use amora_core::types::DbId;

/// Failure of a repository call.
///
/// Write-path failures always leave the table unchanged: the transaction
/// is rolled back before the error is returned.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The transaction could not be opened.
    #[error("failed to begin transaction: {0}")]
    Begin(#[source] sqlx::Error),

    /// The write succeeded but the commit did not.
    #[error("failed to commit transaction: {0}")]
    Commit(#[source] sqlx::Error),

    /// An INSERT or UPDATE was rejected by the database.
    #[error("write on {table} failed: {source}")]
    Execute {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// The write statement reported zero affected rows, either because the
    /// target id does not exist or because there was nothing to write.
    #[error("no row affected on {table}")]
    NoRowAffected {
        table: &'static str,
        id: Option<DbId>,
    },

    /// The COUNT query of a list call failed.
    #[error("count on {table} failed: {source}")]
    Count {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// The SELECT of a list call failed after `total` rows were counted.
    #[error("list on {table} failed ({total} rows matched): {source}")]
    List {
        table: &'static str,
        total: i64,
        #[source]
        source: sqlx::Error,
    },

    /// A row came back in a shape the Model cannot be decoded from.
    #[error("failed to map row from {table}: {source}")]
    Mapping {
        table: &'static str,
        total: i64,
        #[source]
        source: sqlx::Error,
    },

    /// A standalone query (outside the generic paths) failed.
    #[error("query on {table} failed: {source}")]
    Query {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// The caller's cancellation token fired before the call completed.
    #[error("operation cancelled")]
    Cancelled,
}

impl RepoError {
    /// Rows counted before a list call failed, if the count succeeded.
    pub fn total(&self) -> Option<i64> {
        match self {
            Self::List { total, .. } | Self::Mapping { total, .. } => Some(*total),
            _ => None,
        }
    }

    /// The underlying driver error, if any.
    pub fn database_error(&self) -> Option<&sqlx::Error> {
        match self {
            Self::Begin(source) | Self::Commit(source) => Some(source),
            Self::Execute { source, .. }
            | Self::Count { source, .. }
            | Self::List { source, .. }
            | Self::Mapping { source, .. }
            | Self::Query { source, .. } => Some(source),
            Self::NoRowAffected { .. } | Self::Cancelled => None,
        }
    }

    /// Split a failed SELECT into decode failures and everything else.
    pub(crate) fn from_select(table: &'static str, total: i64, source: sqlx::Error) -> Self {
        match source {
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. } => Self::Mapping {
                table,
                total,
                source,
            },
            source => Self::List {
                table,
                total,
                source,
            },
        }
    }
}
