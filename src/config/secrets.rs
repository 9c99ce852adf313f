use std::time::Duration;

use aws_config::{timeout::TimeoutConfig, BehaviorVersion, Region};
use aws_sdk_secretsmanager::config::Credentials;
use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct SecretStoreSettings {
    pub region: String,
    #[serde(default)]
    pub endpoint: Option<String>, // LocalStack or another Secrets Manager compatible endpoint
    #[serde(default)]
    pub access_key_id: Option<SecretString>,
    #[serde(default)]
    pub secret_access_key: Option<SecretString>,
    pub timeout_seconds: u64,
}

impl SecretStoreSettings {
    /// Build a Secrets Manager client. Static keys from the configuration take
    /// precedence, otherwise the default AWS credential chain is used.
    pub async fn create_secrets_client(&self) -> SecretsManagerClient {
        let timeouts = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(self.timeout_seconds))
            .build();

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .timeout_config(timeouts);

        if let (Some(access_key), Some(secret_key)) = (&self.access_key_id, &self.secret_access_key) {
            let creds = Credentials::new(
                access_key.expose_secret(),
                secret_key.expose_secret(),
                None, // No session token
                None, // No expiration
                "fixture-sync-config", // Provider name
            );
            loader = loader.credentials_provider(creds);
        }

        if let Some(endpoint) = &self.endpoint {
            loader = loader.endpoint_url(endpoint.clone());
        }

        let shared_config = loader.load().await;
        SecretsManagerClient::new(&shared_config)
    }
}
