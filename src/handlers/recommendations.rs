use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::dto::{
    ClassifyResponse, LogsRequest, MusicInsightResponse, RecommendationRequest,
    RecommendationResponse,
};
use crate::error::{AppError, AppResult};
use crate::models::recommendation::{MoodCategory, RecommendationItem};
use crate::services::history::LogHistory;
use crate::services::recommendations::{self, CATALOG};
use crate::AppState;

pub async fn get_recommendations(
    State(state): State<AppState>,
    Json(body): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    body.validate()?;

    let history = LogHistory::from_unordered(body.logs);
    let category = body
        .category
        .unwrap_or_else(|| recommendations::classify_mood(history.as_slice()));

    let mut rng = state.rng();
    let items = recommendations::recommend(history.as_slice(), category, &mut rng);

    tracing::debug!(
        log_count = history.len(),
        category = %category,
        items = items.len(),
        "Built recommendations"
    );

    Ok(Json(RecommendationResponse {
        category,
        items,
        insight: recommendations::music_insight(history.as_slice()),
    }))
}

pub async fn classify(
    Json(body): Json<LogsRequest>,
) -> AppResult<Json<ClassifyResponse>> {
    body.validate()?;

    let history = LogHistory::from_unordered(body.logs);
    Ok(Json(ClassifyResponse {
        category: recommendations::classify_mood(history.as_slice()),
    }))
}

pub async fn music_insight(
    Json(body): Json<LogsRequest>,
) -> AppResult<Json<MusicInsightResponse>> {
    body.validate()?;

    let history = LogHistory::from_unordered(body.logs);
    Ok(Json(MusicInsightResponse {
        insight: recommendations::music_insight(history.as_slice()),
        stats: recommendations::music_stats(history.as_slice()),
    }))
}

/// Full catalog slice for one category, in catalog order.
pub async fn get_catalog(
    Path(category): Path<String>,
) -> AppResult<Json<Vec<RecommendationItem>>> {
    let category: MoodCategory = category.parse().map_err(AppError::Validation)?;

    let items = CATALOG
        .iter()
        .filter(|item| item.mood_category == category)
        .copied()
        .collect();
    Ok(Json(items))
}
