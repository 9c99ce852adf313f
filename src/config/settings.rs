use std::env;
use config::{Config, File, ConfigError};
use dotenv::dotenv;
use secrecy::SecretString;

use crate::config::auth::AuthSettings;
use crate::config::database::DatabaseSettings;
use crate::config::secrets::SecretStoreSettings;
use crate::config::upstream::{SyncSettings, UpstreamSettings};

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Settings{
    pub application: ApplicationSettings,
    pub auth: AuthSettings,
    pub secrets: SecretStoreSettings,
    pub database: DatabaseSettings,
    pub upstream: UpstreamSettings,
    #[serde(default)]
    pub sync: SyncSettings,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ApplicationSettings{
    pub port: u16,
    pub host: String,
    pub log_level: String,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

pub fn get_config() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    dotenv().ok();

    let environment: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;

    let env_filename = format!("{}.yml", environment.as_str());
    let config = Config::builder()
        .add_source(File::from(configuration_directory.join("base.yml")))
        .add_source(File::from(configuration_directory.join(env_filename)))
        .add_source(
            config::Environment::default()
                .prefix("APP")
                .prefix_separator("__")
                .separator("__")
        )
        .build()?;

    let mut settings = config.try_deserialize::<Settings>()?;
    apply_env_overrides(&mut settings);

    Ok(settings)
}

/// The provider and AWS credentials are conventionally exposed as plain env
/// vars by the hosting platform, so honour those names directly.
fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(url) = env::var("RAPID_API_URL") {
        settings.upstream.base_url = url;
    }
    if let Ok(key) = env::var("RAPID_API_KEY") {
        settings.upstream.api_key = SecretString::new(key.into_boxed_str());
    }
    if let Ok(host) = env::var("RAPID_API_HOST") {
        settings.upstream.api_host = host;
    }
    if let Ok(access_key) = env::var("AWS_ACCESS_KEY_ID") {
        settings.secrets.access_key_id = Some(SecretString::new(access_key.into_boxed_str()));
    }
    if let Ok(secret_key) = env::var("AWS_SECRET_ACCESS_KEY") {
        settings.secrets.secret_access_key = Some(SecretString::new(secret_key.into_boxed_str()));
    }
    if let Ok(cron_secret) = env::var("CRON_SECRET") {
        settings.auth.shared_secret = Some(SecretString::new(cron_secret.into_boxed_str()));
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. \
                Use either `local` or `production`.",
                other
            )),
        }
    }
}
