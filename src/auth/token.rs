use std::sync::Arc;

use hmac::{Hmac, Mac};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::config::auth::{AuthSettings, AuthStrategy};
use crate::errors::SyncError;
use crate::models::secret::SigningKey;
use crate::services::secret_provider::{resolve_secret, SecretProvider};

type HmacSha256 = Hmac<Sha256>;

const SHARED_SECRET_MAC_KEY: &[u8] = b"fixture-sync/shared-secret";

/// Claims carried by the scheduler's signed token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CronClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
    #[serde(default)]
    pub iat: Option<usize>,
}

pub enum VerificationStrategy {
    SharedSecret(SecretString),
    SignedToken { signing_key_secret_name: String },
}

/// Guards the cron endpoint.
pub struct TokenVerifier {
    strategy: VerificationStrategy,
    secrets: Arc<dyn SecretProvider>,
}

impl TokenVerifier {
    pub fn new(strategy: VerificationStrategy, secrets: Arc<dyn SecretProvider>) -> Self {
        Self { strategy, secrets }
    }

    pub fn from_settings(settings: &AuthSettings, secrets: Arc<dyn SecretProvider>) -> Result<Self, SyncError> {
        let strategy = match settings.strategy {
            AuthStrategy::SharedSecret => {
                let secret = settings.shared_secret.clone().ok_or_else(|| {
                    SyncError::Configuration("auth.shared_secret must be set for the shared_secret strategy".to_string())
                })?;
                VerificationStrategy::SharedSecret(secret)
            }
            AuthStrategy::SignedToken => VerificationStrategy::SignedToken {
                signing_key_secret_name: settings.signing_key_secret_name.clone(),
            },
        };

        Ok(Self::new(strategy, secrets))
    }

    /// Check the raw `Authorization` header value. Only `SecretUnavailable`
    /// and `Unauthorized` can come back from here.
    pub async fn verify(&self, authorization: Option<&str>) -> Result<(), SyncError> {
        let token = extract_bearer_token(authorization)?;

        match &self.strategy {
            VerificationStrategy::SharedSecret(expected) => {
                if shared_secret_matches(token, expected.expose_secret()) {
                    Ok(())
                } else {
                    tracing::warn!("Rejected bearer token: shared secret mismatch");
                    Err(SyncError::Unauthorized)
                }
            }
            VerificationStrategy::SignedToken { signing_key_secret_name } => {
                let signing_key: SigningKey =
                    resolve_secret(self.secrets.as_ref(), signing_key_secret_name).await?;

                decode::<CronClaims>(
                    token,
                    &DecodingKey::from_secret(signing_key.secret_key.expose_secret().as_bytes()),
                    &signed_token_validation(),
                )
                .map_err(|e| {
                    tracing::warn!("Rejected bearer token: {:?}", e.kind());
                    SyncError::Unauthorized
                })?;

                Ok(())
            }
        }
    }
}

/// Any HMAC-SHA2 token signed with the key is accepted. Long-lived scheduler
/// tokens carry no `exp`; a present `exp` is still enforced.
fn signed_token_validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
    validation.required_spec_claims.clear();
    validation.validate_exp = true;
    validation
}

/// Pull the credential out of a `Bearer <token>` header value.
pub fn extract_bearer_token(authorization: Option<&str>) -> Result<&str, SyncError> {
    let value = authorization.ok_or(SyncError::Unauthorized)?.trim();
    let (scheme, token) = value.split_once(' ').ok_or(SyncError::Unauthorized)?;

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(SyncError::Unauthorized);
    }

    let token = token.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(SyncError::Unauthorized);
    }

    Ok(token)
}

// Constant-time: both sides are reduced to MACs and compared with `verify_slice`.
fn shared_secret_matches(candidate: &str, expected: &str) -> bool {
    let Ok(mut expected_mac) = HmacSha256::new_from_slice(SHARED_SECRET_MAC_KEY) else {
        return false;
    };
    expected_mac.update(expected.as_bytes());
    let expected_tag = expected_mac.finalize().into_bytes();

    let Ok(mut candidate_mac) = HmacSha256::new_from_slice(SHARED_SECRET_MAC_KEY) else {
        return false;
    };
    candidate_mac.update(candidate.as_bytes());
    candidate_mac.verify_slice(&expected_tag).is_ok()
}
