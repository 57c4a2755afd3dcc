/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Status code of a live row.
pub const STATUS_ACTIVE: i64 = 1;

/// Status code of a soft-deleted row. Soft-deleted rows are never removed.
pub const STATUS_DELETED: i64 = -1;
