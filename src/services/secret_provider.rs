use async_trait::async_trait;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{error, info};

use crate::config::secrets::SecretStoreSettings;
use crate::errors::SyncError;

const CURRENT_VERSION_STAGE: &str = "AWSCURRENT";

/// Point-in-time lookup of named secrets. Implementations must not cache
/// values between calls so that rotated credentials are picked up on the next run.
#[async_trait]
pub trait SecretProvider: Send + Sync {
    async fn fetch_secret_string(&self, secret_name: &str) -> Result<SecretString, SyncError>;
}

/// Fetch `secret_name` and parse it as the structured payload `T`.
pub async fn resolve_secret<T: DeserializeOwned>(
    provider: &dyn SecretProvider,
    secret_name: &str,
) -> Result<T, SyncError> {
    let raw = provider.fetch_secret_string(secret_name).await?;

    // serde_json messages can quote the offending value, so only the position is reported
    serde_json::from_str(raw.expose_secret()).map_err(|e| {
        error!(
            "Secret '{}' is not a valid {:?} payload (line {}, column {})",
            secret_name,
            e.classify(),
            e.line(),
            e.column()
        );
        SyncError::SecretUnavailable(format!("secret '{}' has an unexpected shape", secret_name))
    })
}

#[derive(Clone, Debug)]
pub struct AwsSecretProvider {
    client: SecretsManagerClient,
}

impl AwsSecretProvider {
    pub fn new(client: SecretsManagerClient) -> Self {
        Self { client }
    }

    pub async fn from_settings(settings: &SecretStoreSettings) -> Self {
        info!("Creating Secrets Manager client for region {}", settings.region);
        Self::new(settings.create_secrets_client().await)
    }
}

#[async_trait]
impl SecretProvider for AwsSecretProvider {
    #[tracing::instrument(name = "Fetch secret", skip(self))]
    async fn fetch_secret_string(&self, secret_name: &str) -> Result<SecretString, SyncError> {
        let response = self
            .client
            .get_secret_value()
            .secret_id(secret_name)
            .version_stage(CURRENT_VERSION_STAGE)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to fetch secret '{}': {}", secret_name, DisplayErrorContext(&e));
                SyncError::SecretUnavailable(format!("secret '{}' could not be fetched", secret_name))
            })?;

        let value = response.secret_string().ok_or_else(|| {
            error!("Secret '{}' has no string value", secret_name);
            SyncError::SecretUnavailable(format!("secret '{}' has no string value", secret_name))
        })?;

        Ok(SecretString::new(value.to_owned().into_boxed_str()))
    }
}
