use actix_web::{get, web, HttpRequest, Responder};

use crate::auth::TokenVerifier;
use crate::handlers::cron_handler::sync_fixtures;
use crate::services::FixtureSyncService;

#[get("/cron")]
async fn cron(
    req: HttpRequest,
    verifier: web::Data<TokenVerifier>,
    sync_service: web::Data<FixtureSyncService>,
) -> impl Responder {
    sync_fixtures(req, verifier, sync_service).await
}
