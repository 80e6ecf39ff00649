use axum::Json;

use crate::dto::HealthResponse;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        service: "heartmend-api".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}
