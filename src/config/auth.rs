use secrecy::SecretString;
use serde::Deserialize;

/// How the cron endpoint decides whether a bearer token is acceptable.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthStrategy {
    SharedSecret,
    SignedToken,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub strategy: AuthStrategy,
    #[serde(default)]
    pub shared_secret: Option<SecretString>,
    pub signing_key_secret_name: String,
}

impl AuthSettings {
    pub fn signed_token(signing_key_secret_name: impl Into<String>) -> Self {
        Self {
            strategy: AuthStrategy::SignedToken,
            shared_secret: None,
            signing_key_secret_name: signing_key_secret_name.into(),
        }
    }

    pub fn shared_secret(secret: String) -> Self {
        Self {
            strategy: AuthStrategy::SharedSecret,
            shared_secret: Some(SecretString::new(secret.into_boxed_str())),
            signing_key_secret_name: String::new(),
        }
    }
}
