pub mod token;

pub use token::{extract_bearer_token, CronClaims, TokenVerifier, VerificationStrategy};
