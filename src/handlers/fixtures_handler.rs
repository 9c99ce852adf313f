use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::handlers::sync_error_response;
use crate::services::FixtureSyncService;

/// Current contents of the fixtures table for the front end.
pub async fn list_fixtures(sync_service: web::Data<FixtureSyncService>) -> HttpResponse {
    match sync_service.list_fixtures().await {
        Ok(fixtures) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": fixtures
        })),
        Err(e) => {
            tracing::error!("Failed to get fixtures: {}", e);
            sync_error_response(&e)
        }
    }
}
