pub mod fixture_client;
pub mod fixture_sync;
pub mod secret_provider;

pub use fixture_client::{FixtureClient, FixtureSource};
pub use fixture_sync::{FixtureSyncService, SyncOptions};
pub use secret_provider::{resolve_secret, AwsSecretProvider, SecretProvider};
