//! Generic persistence layer.
//!
//! Entities describe their columns once with [`record!`]; [`BaseRepo`]
//! turns those descriptors into sparse INSERT/UPDATE statements and
//! filtered, paginated reads without per-entity SQL.

use sqlx::postgres::PgPoolOptions;

pub mod audit;
pub mod error;
pub mod models;
pub mod nullable;
pub mod record;
pub mod repositories;
pub mod repository;
pub mod statement;

pub use error::RepoError;
pub use nullable::NullableDataType;
pub use repository::BaseRepo;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
