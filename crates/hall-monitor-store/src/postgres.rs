//! Postgres-backed specialization source.
//!
//! # What this module is
//! Reads specialization assignments through the `get_user_specializations(uuid)`
//! database function. The function returns rows for every role the user holds;
//! the engine's loader keeps only the rows for its own role.
//!
//! # What this module is NOT
//! Assignment writes happen elsewhere (admin tooling, the identity platform).
//! This store is read-only apart from running its migrations.
//!
//! # Security notes
//! - Database URLs may contain credentials; avoid logging them.
//! - User ids are bound as typed `uuid` parameters, never interpolated.
//!
//! # Operational notes
//! - `connect` bounds pool setup by `connect_timeout_ms` and each acquire by
//!   `acquire_timeout_ms`, so a dead database surfaces as
//!   [`hall_monitor::SourceError::Unavailable`] instead of hanging a request.
use crate::config::PostgresConfig;
use crate::{StoreError, StoreResult};
use async_trait::async_trait;
use hall_monitor::{
    SourceError, SourceResult, SpecializationRecord, SpecializationSource, UserId,
};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

const USER_SPECIALIZATIONS_SQL: &str =
    "SELECT name, role_name FROM get_user_specializations($1)";

/// Row shape returned by `get_user_specializations`.
///
/// Columns are nullable at the SQL level; nulls become empty strings and are
/// rejected by record validation in the loader.
#[derive(Debug, Clone, FromRow)]
struct DbSpecialization {
    name: Option<String>,
    role_name: Option<String>,
}

impl From<DbSpecialization> for SpecializationRecord {
    fn from(row: DbSpecialization) -> Self {
        SpecializationRecord::new(
            row.name.unwrap_or_default(),
            row.role_name.unwrap_or_default(),
        )
    }
}

#[derive(Clone)]
pub struct PostgresSpecializationStore {
    pool: PgPool,
}

impl PostgresSpecializationStore {
    /// Connect to Postgres and apply the embedded migrations.
    ///
    /// # Errors
    /// - [`StoreError::ConnectTimeout`] when the pool cannot be established in time.
    /// - [`StoreError::Database`] / [`StoreError::Migrate`] for connection or schema failures.
    pub async fn connect(pg: &PostgresConfig) -> StoreResult<Self> {
        Self::connect_internal(pg, true).await
    }

    /// Connect without running migrations, for databases whose schema is
    /// managed externally.
    pub async fn connect_without_migrations(pg: &PostgresConfig) -> StoreResult<Self> {
        Self::connect_internal(pg, false).await
    }

    async fn connect_internal(pg: &PostgresConfig, run_migrations: bool) -> StoreResult<Self> {
        let connect_options = PgConnectOptions::from_str(&pg.url)?;
        let connecting = PgPoolOptions::new()
            .max_connections(pg.max_connections)
            .acquire_timeout(Duration::from_millis(pg.acquire_timeout_ms))
            .connect_with(connect_options);
        let pool = tokio::time::timeout(Duration::from_millis(pg.connect_timeout_ms), connecting)
            .await
            .map_err(|_| StoreError::ConnectTimeout(pg.connect_timeout_ms))??;

        if run_migrations {
            sqlx::migrate!("./migrations").run(&pool).await?;
        }
        tracing::info!(
            max_connections = pg.max_connections,
            migrations = run_migrations,
            "specialization store connected"
        );
        Ok(Self { pool })
    }

    /// Wrap an existing pool. The schema must already be in place.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl SpecializationSource for PostgresSpecializationStore {
    async fn user_specializations(
        &self,
        user_id: &UserId,
    ) -> SourceResult<Vec<SpecializationRecord>> {
        let user_uuid = parse_user_uuid(user_id)?;
        let rows = sqlx::query_as::<_, DbSpecialization>(USER_SPECIALIZATIONS_SQL)
            .bind(user_uuid)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::from)?;
        Ok(rows.into_iter().map(SpecializationRecord::from).collect())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

/// User ids are Postgres `uuid`s; anything else cannot hold assignments.
fn parse_user_uuid(user_id: &UserId) -> SourceResult<Uuid> {
    Uuid::parse_str(user_id.as_str()).map_err(|_| SourceError::InvalidUserId(user_id.to_string()))
}
