use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

/// Payload of the signing key secret: `{"secretKey": "..."}`.
#[derive(Debug, Deserialize)]
pub struct SigningKey {
    #[serde(rename = "secretKey")]
    pub secret_key: SecretString,
}

/// Payload of the database credentials secret.
#[derive(Debug, Deserialize)]
pub struct DatabaseCredentials {
    pub host: String,
    #[serde(deserialize_with = "port_from_number_or_string")]
    pub port: u16,
    pub username: String,
    pub password: SecretString,
}

// RDS-managed secrets store the port as a number, hand-written ones often as a string.
fn port_from_number_or_string<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Port::deserialize(deserializer)? {
        Port::Number(port) => Ok(port),
        Port::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
