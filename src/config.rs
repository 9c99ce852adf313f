pub mod auth;
pub mod database;
pub mod secrets;
pub mod settings;
pub mod upstream;
