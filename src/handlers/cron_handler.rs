use actix_web::{http::header, web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::auth::TokenVerifier;
use crate::handlers::sync_error_response;
use crate::services::FixtureSyncService;

/// Verify the caller, then run one full fixture sync.
pub async fn sync_fixtures(
    req: HttpRequest,
    verifier: web::Data<TokenVerifier>,
    sync_service: web::Data<FixtureSyncService>,
) -> HttpResponse {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if let Err(e) = verifier.verify(authorization).await {
        tracing::warn!("Cron request rejected: {}", e);
        return sync_error_response(&e);
    }

    match sync_service.run().await {
        Ok(outcome) => {
            tracing::info!(
                deleted = outcome.deleted,
                attempted = outcome.attempted,
                succeeded = outcome.succeeded,
                failed_fixture_ids = ?outcome.failed_fixture_ids,
                "Cron sync completed"
            );
            HttpResponse::Ok().json(json!({
                "message": "Updated successfully"
            }))
        }
        Err(e) => {
            tracing::error!("Fixture sync failed: {}", e);
            sync_error_response(&e)
        }
    }
}
