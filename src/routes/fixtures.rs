use actix_web::{get, web, Responder};

use crate::handlers::fixtures_handler::list_fixtures;
use crate::services::FixtureSyncService;

#[get("/fixtures")]
async fn fixtures(sync_service: web::Data<FixtureSyncService>) -> impl Responder {
    list_fixtures(sync_service).await
}
