use axum::Json;
use chrono::Utc;
use validator::Validate;

use crate::dto::{RecoveryRequest, RecoveryResponse};
use crate::error::AppResult;
use crate::services::history::LogHistory;
use crate::services::recovery::{self, TimelinePoint};

pub async fn get_recovery(
    Json(body): Json<RecoveryRequest>,
) -> AppResult<Json<RecoveryResponse>> {
    body.validate()?;

    let now = body.now.unwrap_or_else(Utc::now);
    let history = LogHistory::from_unordered(body.logs);
    let breakdown = recovery::breakdown(history.as_slice(), now);

    tracing::debug!(
        log_count = history.len(),
        percentage = breakdown.percentage,
        "Computed recovery percentage"
    );

    Ok(Json(RecoveryResponse {
        percentage: breakdown.percentage,
        rounded: breakdown.percentage.round() as u8,
        milestone: recovery::milestone(breakdown.percentage).to_string(),
        breakdown,
    }))
}

pub async fn get_timeline(
    Json(body): Json<RecoveryRequest>,
) -> AppResult<Json<Vec<TimelinePoint>>> {
    body.validate()?;

    let now = body.now.unwrap_or_else(Utc::now);
    let history = LogHistory::from_unordered(body.logs);
    let points = recovery::timeline(&history, now);

    tracing::debug!(points = points.len(), "Computed recovery timeline");
    Ok(Json(points))
}
