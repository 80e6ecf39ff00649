use axum::Json;
use validator::Validate;

use crate::dto::LogsRequest;
use crate::error::AppResult;
use crate::services::stats::{self, DashboardStats};

pub async fn get_dashboard_stats(
    Json(body): Json<LogsRequest>,
) -> AppResult<Json<DashboardStats>> {
    body.validate()?;
    Ok(Json(stats::summarize(&body.logs)))
}
