use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::SyncError;

/// One entry of the provider's `response` array, as received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureRecord {
    pub fixture: FixtureInfo,
    pub teams: FixtureTeams,
    pub goals: FixtureGoals,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureInfo {
    pub id: i64,
    /// Kickoff as Unix seconds (UTC).
    pub timestamp: i64,
    pub status: FixtureStatus,
    pub venue: FixtureVenue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureStatus {
    pub long: String,
    #[serde(default)]
    pub short: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureVenue {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureTeams {
    pub home: TeamRef,
    pub away: TeamRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: i64,
    pub name: String,
}

/// Goals stay `null` until the match kicks off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureGoals {
    pub home: Option<i32>,
    pub away: Option<i32>,
}

/// A row of the `fixtures` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredFixture {
    pub fixture_id: i64,
    pub date: NaiveDate,
    /// Local kickoff clock time, `HH:MM:SS`.
    pub time: String,
    pub status: String,
    pub home: String,
    pub home_id: i64,
    pub home_score: Option<i32>,
    pub away: String,
    pub away_id: i64,
    pub away_score: Option<i32>,
    pub venue: Option<String>,
}

impl FixtureRecord {
    /// Map the provider record onto a storage row. Date and time are both
    /// taken from the kickoff timestamp rendered in `tz`.
    pub fn to_stored_fixture<Tz: TimeZone>(&self, tz: &Tz) -> Result<StoredFixture, SyncError> {
        let kickoff = DateTime::<Utc>::from_timestamp(self.fixture.timestamp, 0).ok_or(
            SyncError::InvalidTimestamp {
                fixture_id: self.fixture.id,
                timestamp: self.fixture.timestamp,
            },
        )?;
        let local = kickoff.with_timezone(tz).naive_local();

        Ok(StoredFixture {
            fixture_id: self.fixture.id,
            date: local.date(),
            time: local.time().format("%H:%M:%S").to_string(),
            status: self.fixture.status.long.clone(),
            home: self.teams.home.name.clone(),
            home_id: self.teams.home.id,
            home_score: self.goals.home,
            away: self.teams.away.name.clone(),
            away_id: self.teams.away.id,
            away_score: self.goals.away,
            venue: self.fixture.venue.name.clone(),
        })
    }
}
