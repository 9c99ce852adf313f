pub mod fixtures;

pub use fixtures::{FixtureSession, FixtureStore, PgFixtureSession, PgFixtureStore};
