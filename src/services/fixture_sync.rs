use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};
use futures::stream::{self, StreamExt};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::settings::Settings;
use crate::config::upstream::SyncMode;
use crate::db::fixtures::{FixtureSession, FixtureStore};
use crate::errors::SyncError;
use crate::league::window::SyncWindow;
use crate::models::fixture::StoredFixture;
use crate::models::sync::SyncOutcome;
use crate::services::fixture_client::FixtureSource;

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub competition_id: String,
    pub timezone: String,
    pub mode: SyncMode,
    pub insert_concurrency: usize,
}

impl SyncOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            competition_id: settings.upstream.competition_id.clone(),
            timezone: settings.upstream.timezone.clone(),
            mode: settings.sync.mode,
            insert_concurrency: settings.sync.insert_concurrency,
        }
    }
}

/// Runs the weekly fixture sync: fetch, transform, then rebuild the table.
pub struct FixtureSyncService {
    upstream: Arc<dyn FixtureSource>,
    store: Arc<dyn FixtureStore>,
    options: SyncOptions,
}

impl FixtureSyncService {
    pub fn new(upstream: Arc<dyn FixtureSource>, store: Arc<dyn FixtureStore>, options: SyncOptions) -> Self {
        Self { upstream, store, options }
    }

    /// Sync the current week as seen on the host's local clock.
    pub async fn run(&self) -> Result<SyncOutcome, SyncError> {
        self.run_at(Local::now()).await
    }

    /// Sync the week containing `now`. Kickoff times are rendered in `now`'s time zone.
    ///
    /// Nothing is written unless the provider fetch succeeds and a session can
    /// be opened; once the table has been cleared, row failures are only counted.
    #[tracing::instrument(
        name = "Fixture sync run",
        skip(self, now),
        fields(run_id = %Uuid::new_v4(), mode = ?self.options.mode)
    )]
    pub async fn run_at<Tz: TimeZone>(&self, now: DateTime<Tz>) -> Result<SyncOutcome, SyncError> {
        let window = SyncWindow::for_instant(&now);
        info!(
            "Syncing fixtures for competition {} from {} to {} (season {})",
            self.options.competition_id,
            window.from_date(),
            window.to_date(),
            window.season_year
        );

        let records = self
            .upstream
            .fetch_week(&self.options.competition_id, &window, &self.options.timezone)
            .await?;

        let tz = now.timezone();
        let mut failed_fixture_ids = Vec::new();
        let mut rows = Vec::with_capacity(records.len());
        for record in &records {
            match record.to_stored_fixture(&tz) {
                Ok(row) => rows.push(row),
                Err(e) => {
                    error!("Skipping fixture {}: {}", record.fixture.id, e);
                    failed_fixture_ids.push(record.fixture.id);
                }
            }
        }

        let session = self.store.open_session().await?;
        let written = self.write_rows(session.as_ref(), &rows).await;
        session.close().await;
        let (deleted, write_failures) = written?;
        failed_fixture_ids.extend(write_failures);

        let outcome = SyncOutcome {
            window,
            fetched: records.len(),
            deleted,
            attempted: records.len(),
            succeeded: records.len() - failed_fixture_ids.len(),
            failed_fixture_ids,
        };

        if outcome.failed() > 0 {
            warn!(
                "Fixture sync finished with {} of {} rows failed: {:?}",
                outcome.failed(),
                outcome.attempted,
                outcome.failed_fixture_ids
            );
        } else {
            info!(
                "Fixture sync finished: {} deleted, {} written",
                outcome.deleted, outcome.succeeded
            );
        }

        Ok(outcome)
    }

    /// Clear the table (replace mode) and write every row, returning the delete
    /// count and the ids of rows that could not be written.
    async fn write_rows(
        &self,
        session: &dyn FixtureSession,
        rows: &[StoredFixture],
    ) -> Result<(u64, Vec<i64>), SyncError> {
        let mode = self.options.mode;
        let deleted = match mode {
            SyncMode::Replace => session.delete_all().await?,
            SyncMode::Upsert => 0,
        };

        let results: Vec<(i64, Result<(), SyncError>)> = stream::iter(rows)
            .map(move |row| async move {
                let result = match mode {
                    SyncMode::Replace => session.insert(row).await,
                    SyncMode::Upsert => session.upsert(row).await,
                };
                (row.fixture_id, result)
            })
            .buffer_unordered(self.options.insert_concurrency.max(1))
            .collect()
            .await;

        let failed = results
            .into_iter()
            .filter_map(|(fixture_id, result)| match result {
                Ok(()) => None,
                Err(e) => {
                    error!("Error inserting fixture {} into the database: {}", fixture_id, e);
                    Some(fixture_id)
                }
            })
            .collect();

        Ok((deleted, failed))
    }

    /// Every stored fixture, earliest kickoff first.
    pub async fn list_fixtures(&self) -> Result<Vec<StoredFixture>, SyncError> {
        let session = self.store.open_session().await?;
        let fixtures = session.list_all().await;
        session.close().await;
        fixtures
    }
}
