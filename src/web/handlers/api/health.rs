use axum::response::Json;

use crate::web::types::HealthResponse;

/// 存活检查
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
