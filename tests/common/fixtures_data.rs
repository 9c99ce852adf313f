//! Provider-shaped fixture payloads.

use chrono::NaiveDate;
use serde_json::{json, Value};

use fixture_sync::models::fixture::{FixtureRecord, StoredFixture};

/// 2023-11-14T22:13:20Z
pub const KICKOFF_A: i64 = 1_700_000_000;
/// 2023-11-15T19:30:00Z
pub const KICKOFF_B: i64 = 1_700_076_600;

pub fn fixture_json(
    id: i64,
    timestamp: i64,
    status: &str,
    home: (i64, &str),
    away: (i64, &str),
    goals: (Option<i32>, Option<i32>),
) -> Value {
    json!({
        "fixture": {
            "id": id,
            "referee": null,
            "timezone": "America/Los_Angeles",
            "date": "2023-11-14T14:13:20-08:00",
            "timestamp": timestamp,
            "periods": { "first": null, "second": null },
            "venue": { "id": 556, "name": "Old Trafford", "city": "Manchester" },
            "status": { "long": status, "short": "NS", "elapsed": null }
        },
        "league": { "id": 39, "name": "Premier League", "country": "England", "season": 2023, "round": "Regular Season - 12" },
        "teams": {
            "home": { "id": home.0, "name": home.1, "logo": "https://media.api-sports.io/football/teams/33.png", "winner": null },
            "away": { "id": away.0, "name": away.1, "logo": "https://media.api-sports.io/football/teams/40.png", "winner": null }
        },
        "goals": { "home": goals.0, "away": goals.1 },
        "score": {
            "halftime": { "home": null, "away": null },
            "fulltime": { "home": null, "away": null }
        }
    })
}

/// Two fixtures in the same week, one finished and one not yet started.
pub fn two_fixtures() -> Vec<Value> {
    vec![
        fixture_json(1035301, KICKOFF_A, "Match Finished", (33, "Manchester United"), (40, "Liverpool"), (Some(2), Some(1))),
        fixture_json(1035302, KICKOFF_B, "Not Started", (42, "Arsenal"), (49, "Chelsea"), (None, None)),
    ]
}

pub fn envelope(fixtures: Vec<Value>) -> Value {
    json!({
        "get": "fixtures",
        "parameters": { "league": "39" },
        "errors": [],
        "results": fixtures.len(),
        "paging": { "current": 1, "total": 1 },
        "response": fixtures
    })
}

pub fn records(fixtures: Vec<Value>) -> Vec<FixtureRecord> {
    fixtures
        .into_iter()
        .map(|value| serde_json::from_value(value).expect("fixture payload should parse"))
        .collect()
}

pub fn stale_row(fixture_id: i64) -> StoredFixture {
    StoredFixture {
        fixture_id,
        date: NaiveDate::from_ymd_opt(2023, 11, 4).unwrap(),
        time: "12:30:00".to_string(),
        status: "Match Finished".to_string(),
        home: "Brentford".to_string(),
        home_id: 55,
        home_score: Some(3),
        away: "West Ham".to_string(),
        away_id: 48,
        away_score: Some(2),
        venue: Some("Gtech Community Stadium".to_string()),
    }
}
