//! Specialization backends for the hall monitor engine.
//!
//! # Purpose
//! Implements [`hall_monitor::SpecializationSource`] over an in-memory map
//! (tests, local development) and over Postgres via the
//! `get_user_specializations` function.
//!
//! # Notes
//! Both backends return raw rows for every role; role filtering and row
//! validation stay in the engine's loader.
use thiserror::Error;

pub mod config;
pub mod memory;
pub mod postgres;

pub use config::PostgresConfig;
pub use memory::InMemorySpecializationStore;
pub use postgres::PostgresSpecializationStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("timed out connecting to postgres after {0} ms")]
    ConnectTimeout(u64),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for hall_monitor::SourceError {
    fn from(err: StoreError) -> Self {
        let unavailable = matches!(
            &err,
            StoreError::ConnectTimeout(_)
                | StoreError::Database(
                    sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
                )
        );
        if unavailable {
            hall_monitor::SourceError::Unavailable(err.to_string())
        } else {
            hall_monitor::SourceError::Unexpected(anyhow::Error::new(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hall_monitor::SourceError;

    #[test]
    fn pool_failures_map_to_unavailable() {
        let err: SourceError = StoreError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, SourceError::Unavailable(_)));

        let err: SourceError = StoreError::ConnectTimeout(500).into();
        assert!(matches!(err, SourceError::Unavailable(_)));

        let err: SourceError = StoreError::Database(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, SourceError::Unexpected(_)));
    }
}
