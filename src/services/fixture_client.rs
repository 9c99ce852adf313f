use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

use crate::config::upstream::UpstreamSettings;
use crate::errors::SyncError;
use crate::league::window::SyncWindow;
use crate::models::fixture::FixtureRecord;

/// Source of a week's fixtures for one competition.
#[async_trait]
pub trait FixtureSource: Send + Sync {
    async fn fetch_week(
        &self,
        competition_id: &str,
        window: &SyncWindow,
        timezone: &str,
    ) -> Result<Vec<FixtureRecord>, SyncError>;
}

#[derive(Debug, Deserialize)]
struct FixturesEnvelope {
    #[serde(default)]
    errors: Value,
    response: Vec<FixtureRecord>,
}

/// The provider reports failures inside a 200 body as a non-empty `errors`
/// array or object.
fn has_provider_errors(errors: &Value) -> bool {
    match errors {
        Value::Null => false,
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
        _ => true,
    }
}

/// HTTP client for the fixtures provider.
pub struct FixtureClient {
    http: Client,
    base_url: String,
    api_key: SecretString,
    api_host: String,
}

impl FixtureClient {
    pub fn new(settings: &UpstreamSettings) -> Result<Self, SyncError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .map_err(|e| SyncError::UpstreamUnavailable(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            api_host: settings.api_host.clone(),
        })
    }
}

#[async_trait]
impl FixtureSource for FixtureClient {
    #[tracing::instrument(name = "Fetch fixtures from provider", skip(self))]
    async fn fetch_week(
        &self,
        competition_id: &str,
        window: &SyncWindow,
        timezone: &str,
    ) -> Result<Vec<FixtureRecord>, SyncError> {
        let url = format!("{}/fixtures", self.base_url);
        let from = window.from_date();
        let to = window.to_date();
        let season = window.season_year.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("league", competition_id),
                ("timezone", timezone),
                ("from", from.as_str()),
                ("to", to.as_str()),
                ("season", season.as_str()),
            ])
            .header("x-rapidapi-key", self.api_key.expose_secret())
            .header("x-rapidapi-host", &self.api_host)
            .send()
            .await
            .map_err(|e| {
                error!("Fixture request failed: {}", e);
                SyncError::UpstreamUnavailable(format!("request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Provider answered {} for {}", status, url);
            return Err(SyncError::UpstreamUnavailable(format!("provider returned {}", status)));
        }

        let envelope: FixturesEnvelope = response.json().await.map_err(|e| {
            error!("Failed to parse provider response: {}", e);
            SyncError::UpstreamUnavailable(format!("unparseable response: {}", e))
        })?;

        if has_provider_errors(&envelope.errors) {
            error!("Provider reported errors: {}", envelope.errors);
            return Err(SyncError::UpstreamUnavailable(format!(
                "provider reported errors: {}",
                envelope.errors
            )));
        }

        info!(
            "Fetched {} fixtures for {} to {} (season {})",
            envelope.response.len(),
            from,
            to,
            window.season_year
        );

        Ok(envelope.response)
    }
}
