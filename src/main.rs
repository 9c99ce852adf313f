use std::net::TcpListener;
use std::sync::Arc;

use fixture_sync::run;
use fixture_sync::auth::TokenVerifier;
use fixture_sync::config::settings::get_config;
use fixture_sync::db::PgFixtureStore;
use fixture_sync::services::{AwsSecretProvider, FixtureClient, FixtureSyncService, SecretProvider, SyncOptions};
use fixture_sync::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "fixture-sync".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let secret_provider: Arc<dyn SecretProvider> =
        Arc::new(AwsSecretProvider::from_settings(&config.secrets).await);

    let token_verifier = match TokenVerifier::from_settings(&config.auth, secret_provider.clone()) {
        Ok(verifier) => verifier,
        Err(e) => {
            tracing::error!("❌ Invalid auth configuration: {}", e);
            std::process::exit(1);
        }
    };

    let fixture_client = match FixtureClient::new(&config.upstream) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("❌ Failed to create fixture client: {}", e);
            std::process::exit(1);
        }
    };

    let store = PgFixtureStore::new(secret_provider.clone(), config.database.clone());
    if config.database.run_migrations {
        if let Err(e) = store.run_migrations().await {
            tracing::error!("❌ Failed to prepare the fixtures table: {}", e);
            std::process::exit(1);
        }
    }

    let sync_service = FixtureSyncService::new(
        Arc::new(fixture_client),
        Arc::new(store),
        SyncOptions::from_settings(&config),
    );

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("✅ Listening on {}", address);

    run(
        listener,
        token_verifier,
        sync_service,
        config.application.allowed_origins.clone(),
    )?.await
}
