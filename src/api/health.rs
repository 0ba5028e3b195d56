use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::{app_state::AppState, database, errors::AppError};

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service and database are reachable"),
        (status = 500, description = "Database is unreachable")
    )
)]
#[get("/health")]
pub async fn health_check(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    database::ping(&app_state.db).await.map_err(|e| {
        log::error!("health check failed: {:#}", e);
        AppError::Internal
    })?;

    Ok(HttpResponse::Ok().json(json!({ "status": "ok" })))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);
}
