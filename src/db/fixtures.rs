use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{error, info};

use crate::config::database::DatabaseSettings;
use crate::errors::SyncError;
use crate::models::fixture::StoredFixture;
use crate::models::secret::DatabaseCredentials;
use crate::services::secret_provider::{resolve_secret, SecretProvider};

/// Opens short-lived sessions against the fixtures table.
#[async_trait]
pub trait FixtureStore: Send + Sync {
    async fn open_session(&self) -> Result<Box<dyn FixtureSession>, SyncError>;
}

/// A store session scoped to a single run. Callers must `close` it on every
/// exit path.
#[async_trait]
pub trait FixtureSession: Send + Sync {
    /// Remove every fixture row, returning how many were deleted.
    async fn delete_all(&self) -> Result<u64, SyncError>;

    async fn insert(&self, row: &StoredFixture) -> Result<(), SyncError>;

    /// Insert or overwrite the row keyed by `fixture_id`.
    async fn upsert(&self, row: &StoredFixture) -> Result<(), SyncError>;

    /// All fixtures ordered by kickoff date and time, earliest first.
    async fn list_all(&self) -> Result<Vec<StoredFixture>, SyncError>;

    async fn close(self: Box<Self>);
}

/// Postgres-backed store. Credentials are resolved from the secret store each
/// time a session is opened.
pub struct PgFixtureStore {
    secrets: Arc<dyn SecretProvider>,
    settings: DatabaseSettings,
}

impl PgFixtureStore {
    pub fn new(secrets: Arc<dyn SecretProvider>, settings: DatabaseSettings) -> Self {
        Self { secrets, settings }
    }

    async fn connect(&self) -> Result<PgPool, SyncError> {
        let credentials: DatabaseCredentials =
            resolve_secret(self.secrets.as_ref(), &self.settings.credentials_secret_name).await?;

        PgPoolOptions::new()
            .max_connections(self.settings.max_connections)
            .acquire_timeout(self.settings.acquire_timeout())
            .connect_with(self.settings.connect_options(&credentials))
            .await
            .map_err(|e| {
                error!("Failed to connect to the fixtures database: {}", e);
                SyncError::StoreUnavailable(format!("connection failed: {}", e))
            })
    }

    /// Apply the embedded migrations once at startup.
    pub async fn run_migrations(&self) -> Result<(), SyncError> {
        let pool = self.connect().await?;
        let result = sqlx::migrate!("./migrations").run(&pool).await;
        pool.close().await;

        result.map_err(|e| {
            error!("Failed to migrate the fixtures database: {}", e);
            SyncError::StoreUnavailable(format!("migration failed: {}", e))
        })?;
        info!("Fixtures database migrations applied");
        Ok(())
    }
}

#[async_trait]
impl FixtureStore for PgFixtureStore {
    #[tracing::instrument(name = "Open fixtures session", skip(self))]
    async fn open_session(&self) -> Result<Box<dyn FixtureSession>, SyncError> {
        let pool = self.connect().await?;
        Ok(Box::new(PgFixtureSession { pool }))
    }
}

pub struct PgFixtureSession {
    pool: PgPool,
}

impl PgFixtureSession {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_failed(row: &StoredFixture, e: sqlx::Error) -> SyncError {
    SyncError::RowInsertFailed {
        fixture_id: row.fixture_id,
        reason: e.to_string(),
    }
}

#[async_trait]
impl FixtureSession for PgFixtureSession {
    async fn delete_all(&self) -> Result<u64, SyncError> {
        let result = sqlx::query("DELETE FROM fixtures")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to clear fixtures table: {}", e);
                SyncError::StoreUnavailable(format!("delete failed: {}", e))
            })?;

        Ok(result.rows_affected())
    }

    async fn insert(&self, row: &StoredFixture) -> Result<(), SyncError> {
        sqlx::query(
            r#"
            INSERT INTO fixtures (
                fixture_id, date, time, status, home, home_id, home_score,
                away, away_id, away_score, venue
            ) VALUES (
                $1, $2, $3::time, $4, $5, $6, $7, $8, $9, $10, $11
            )
            "#,
        )
        .bind(row.fixture_id)
        .bind(row.date)
        .bind(&row.time)
        .bind(&row.status)
        .bind(&row.home)
        .bind(row.home_id)
        .bind(row.home_score)
        .bind(&row.away)
        .bind(row.away_id)
        .bind(row.away_score)
        .bind(&row.venue)
        .execute(&self.pool)
        .await
        .map_err(|e| row_failed(row, e))?;

        Ok(())
    }

    async fn upsert(&self, row: &StoredFixture) -> Result<(), SyncError> {
        sqlx::query(
            r#"
            INSERT INTO fixtures (
                fixture_id, date, time, status, home, home_id, home_score,
                away, away_id, away_score, venue
            ) VALUES (
                $1, $2, $3::time, $4, $5, $6, $7, $8, $9, $10, $11
            )
            ON CONFLICT (fixture_id) DO UPDATE SET
                date = EXCLUDED.date,
                time = EXCLUDED.time,
                status = EXCLUDED.status,
                home = EXCLUDED.home,
                home_id = EXCLUDED.home_id,
                home_score = EXCLUDED.home_score,
                away = EXCLUDED.away,
                away_id = EXCLUDED.away_id,
                away_score = EXCLUDED.away_score,
                venue = EXCLUDED.venue
            "#,
        )
        .bind(row.fixture_id)
        .bind(row.date)
        .bind(&row.time)
        .bind(&row.status)
        .bind(&row.home)
        .bind(row.home_id)
        .bind(row.home_score)
        .bind(&row.away)
        .bind(row.away_id)
        .bind(row.away_score)
        .bind(&row.venue)
        .execute(&self.pool)
        .await
        .map_err(|e| row_failed(row, e))?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<StoredFixture>, SyncError> {
        sqlx::query_as::<_, StoredFixture>(
            r#"
            SELECT fixture_id, date, fixtures.time::text AS time, status, home, home_id, home_score,
                   away, away_id, away_score, venue
            FROM fixtures
            ORDER BY fixtures.date ASC, fixtures.time ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to list fixtures: {}", e);
            SyncError::StoreUnavailable(format!("query failed: {}", e))
        })
    }

    async fn close(self: Box<Self>) {
        self.pool.close().await;
    }
}
