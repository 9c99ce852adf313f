use secrecy::SecretString;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub api_key: SecretString,
    pub api_host: String,
    #[serde(default = "default_competition_id")]
    pub competition_id: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    pub timeout_seconds: u64,
}

fn default_competition_id() -> String {
    "39".to_string()
}

fn default_timezone() -> String {
    "America/Los_Angeles".to_string()
}

/// Whether a run wipes the table first or merges on `fixture_id`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    #[default]
    Replace,
    Upsert,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SyncSettings {
    #[serde(default)]
    pub mode: SyncMode,
    #[serde(default = "default_insert_concurrency")]
    pub insert_concurrency: usize,
}

fn default_insert_concurrency() -> usize {
    8
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            mode: SyncMode::Replace,
            insert_concurrency: default_insert_concurrency(),
        }
    }
}
