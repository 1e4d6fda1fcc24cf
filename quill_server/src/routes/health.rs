use axum::response::Json;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::models::health::HealthStatus;

pub fn router() -> OpenApiRouter {
    OpenApiRouter::new().routes(routes!(health))
}

/// Check that the server is up.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is running", body = HealthStatus)
    )
)]
#[axum::debug_handler]
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        message: "Creative Story Generator is running!".to_string(),
    })
}
