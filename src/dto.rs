//! # Request/Response DTOs
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body or query params
//! - `*Response` → serialized to client JSON
//! - Structural limits are expressed via `validator` derive macros; log values
//!   themselves are passed through unvalidated

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::daily_log::DailyLog;
use crate::models::recommendation::{MoodCategory, RecommendationItem};
use crate::services::recommendations::MusicStats;
use crate::services::recovery::RecoveryBreakdown;

// ============================================================================
// Requests
// ============================================================================

/// Body shared by endpoints that only need the log history.
/// 3650 logs is ten years of daily entries.
#[derive(Debug, Deserialize, Validate)]
pub struct LogsRequest {
    #[serde(default)]
    #[validate(length(max = 3650, message = "At most 3650 logs per request"))]
    pub logs: Vec<DailyLog>,
}

/// POST /api/recovery, POST /api/recovery/timeline
#[derive(Debug, Deserialize, Validate)]
pub struct RecoveryRequest {
    #[serde(default)]
    #[validate(length(max = 3650, message = "At most 3650 logs per request"))]
    pub logs: Vec<DailyLog>,

    /// Reference time for the consistency score. Default: server clock.
    pub now: Option<DateTime<Utc>>,
}

/// POST /api/recommendations
#[derive(Debug, Deserialize, Validate)]
pub struct RecommendationRequest {
    #[serde(default)]
    #[validate(length(max = 3650, message = "At most 3650 logs per request"))]
    pub logs: Vec<DailyLog>,

    /// Requested mood bucket. Default: classified from the logs.
    pub category: Option<MoodCategory>,
}

/// GET /api/messages/percentage query params
#[derive(Debug, Deserialize, Validate)]
pub struct PercentageQuery {
    #[validate(range(min = 0.0, max = 100.0, message = "Percentage must be 0-100"))]
    pub value: f64,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RecoveryResponse {
    pub percentage: f64,
    /// Percentage rounded for display
    pub rounded: u8,
    pub milestone: String,
    pub breakdown: RecoveryBreakdown,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub category: MoodCategory,
    pub items: Vec<RecommendationItem>,
    pub insight: String,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub category: MoodCategory,
}

#[derive(Debug, Serialize)]
pub struct MusicInsightResponse {
    pub insight: String,
    pub stats: MusicStats,
}

/// GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}
