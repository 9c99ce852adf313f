use std::net::TcpListener;
use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use once_cell::sync::Lazy;
use secrecy::SecretString;
use serde_json::{json, Value};

use fixture_sync::auth::{CronClaims, TokenVerifier};
use fixture_sync::config::auth::AuthSettings;
use fixture_sync::config::upstream::{SyncMode, UpstreamSettings};
use fixture_sync::run;
use fixture_sync::services::{FixtureClient, FixtureSyncService, SyncOptions};
use fixture_sync::telemetry::{get_subscriber, init_subscriber};

use super::mock_secrets::InMemorySecretProvider;
use super::mock_store::InMemoryFixtureStore;
use super::mock_upstream::{spawn_mock_upstream, MockUpstream};

pub const SIGNING_KEY_SECRET_NAME: &str = "soccer-stats-apiKey";
pub const SIGNING_KEY: &str = "test-signing-key-0123456789";
pub const TEST_API_KEY: &str = "test-rapidapi-key";
pub const TEST_API_HOST: &str = "api-football-v1.p.rapidapi.com";

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub fn init_tracing() {
    Lazy::force(&TRACING);
}

pub struct TestApp {
    pub address: String,
    pub store: InMemoryFixtureStore,
    pub secrets: Arc<InMemorySecretProvider>,
    pub upstream: MockUpstream,
}

impl TestApp {
    pub async fn get_cron(&self, authorization: Option<&str>) -> reqwest::Response {
        let mut request = reqwest::Client::new().get(format!("{}/api/cron", &self.address));
        if let Some(value) = authorization {
            request = request.header("Authorization", value);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn get_fixtures(&self) -> reqwest::Response {
        reqwest::Client::new()
            .get(format!("{}/fixtures", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub struct TestAppOptions {
    pub auth: AuthSettings,
    pub mode: SyncMode,
    pub upstream_body: Value,
}

impl Default for TestAppOptions {
    fn default() -> Self {
        Self {
            auth: AuthSettings::signed_token(SIGNING_KEY_SECRET_NAME),
            mode: SyncMode::Replace,
            upstream_body: json!({ "errors": [], "response": [] }),
        }
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(TestAppOptions::default()).await
}

pub async fn spawn_app_with(options: TestAppOptions) -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    init_tracing();

    let upstream = spawn_mock_upstream(options.upstream_body).await;
    let secrets = Arc::new(
        InMemorySecretProvider::new()
            .with_secret(SIGNING_KEY_SECRET_NAME, json!({ "secretKey": SIGNING_KEY })),
    );
    let store = InMemoryFixtureStore::new();

    let upstream_settings = UpstreamSettings {
        base_url: upstream.base_url.clone(),
        api_key: SecretString::new(TEST_API_KEY.to_string().into_boxed_str()),
        api_host: TEST_API_HOST.to_string(),
        competition_id: "39".to_string(),
        timezone: "America/Los_Angeles".to_string(),
        timeout_seconds: 5,
    };
    let fixture_client = FixtureClient::new(&upstream_settings).expect("Failed to build fixture client");
    let sync_service = FixtureSyncService::new(
        Arc::new(fixture_client),
        Arc::new(store.clone()),
        SyncOptions {
            competition_id: upstream_settings.competition_id.clone(),
            timezone: upstream_settings.timezone.clone(),
            mode: options.mode,
            insert_concurrency: 4,
        },
    );
    let token_verifier = TokenVerifier::from_settings(&options.auth, secrets.clone())
        .expect("Failed to build token verifier");

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let server = run(listener, token_verifier, sync_service, vec![])
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        store,
        secrets,
        upstream,
    }
}

pub fn token_signed_with(key: &str, expires_in: Duration) -> String {
    token_with_algorithm(key, Algorithm::HS256, Some(expires_in))
}

/// `expires_in: None` leaves the `exp` claim out entirely.
pub fn token_with_algorithm(key: &str, algorithm: Algorithm, expires_in: Option<Duration>) -> String {
    let now = Utc::now();
    let claims = CronClaims {
        sub: Some("cron-scheduler".to_string()),
        exp: expires_in.map(|ttl| (now + ttl).timestamp() as usize),
        iat: Some(now.timestamp() as usize),
    };

    encode(
        &Header::new(algorithm),
        &claims,
        &EncodingKey::from_secret(key.as_bytes()),
    )
    .expect("Failed to sign token")
}

pub fn valid_token() -> String {
    token_signed_with(SIGNING_KEY, Duration::hours(1))
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
