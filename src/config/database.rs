use std::time::Duration;

use secrecy::ExposeSecret;
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::models::secret::DatabaseCredentials;

/// Connection settings for the fixtures database. Host, port and login come
/// from the secret store on every run; only the static parts live here.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub credentials_secret_name: String,
    pub db_name: String,
    pub require_ssl: bool,
    #[serde(default)]
    pub ca_cert_path: Option<String>,
    pub acquire_timeout_seconds: u64,
    pub max_connections: u32,
    #[serde(default)]
    pub run_migrations: bool,
}

impl DatabaseSettings {
    pub fn connect_options(&self, credentials: &DatabaseCredentials) -> PgConnectOptions {
        let ssl_mode = match (self.require_ssl, &self.ca_cert_path) {
            (true, Some(_)) => PgSslMode::VerifyCa,
            (true, None) => PgSslMode::Require,
            (false, _) => PgSslMode::Prefer,
        };

        let options = PgConnectOptions::new()
            .host(&credentials.host)
            .port(credentials.port)
            .username(&credentials.username)
            .password(credentials.password.expose_secret())
            .database(&self.db_name)
            .ssl_mode(ssl_mode);

        match &self.ca_cert_path {
            Some(path) => options.ssl_root_cert(path),
            None => options,
        }
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_seconds)
    }
}
