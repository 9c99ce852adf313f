use actix_web::HttpResponse;
use serde_json::json;

use crate::errors::SyncError;

pub mod backend_health_handler;
pub mod cron_handler;
pub mod fixtures_handler;

/// Map a failed run onto the response the scheduler sees. Details stay in the logs.
pub fn sync_error_response(error: &SyncError) -> HttpResponse {
    match error {
        SyncError::Unauthorized => HttpResponse::Unauthorized().json(json!({
            "message": "Unauthorized"
        })),
        _ => HttpResponse::ServiceUnavailable().json(json!({
            "message": "Service Unavailable"
        })),
    }
}
