pub mod fixture;
pub mod secret;
pub mod sync;
