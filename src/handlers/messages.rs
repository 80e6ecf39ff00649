use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::dto::{LogsRequest, PercentageQuery};
use crate::error::AppResult;
use crate::models::message::Message;
use crate::services::history::LogHistory;
use crate::services::messages;
use crate::AppState;

pub async fn message_for_percentage(
    Query(query): Query<PercentageQuery>,
) -> AppResult<Json<Message>> {
    query.validate()?;
    Ok(Json(messages::message_for_percentage(query.value)))
}

pub async fn message_for_logs(
    State(state): State<AppState>,
    Json(body): Json<LogsRequest>,
) -> AppResult<Json<Message>> {
    body.validate()?;

    let history = LogHistory::from_unordered(body.logs);
    let mut rng = state.rng();
    let message = messages::message_for_logs(history.as_slice(), &mut rng);

    tracing::debug!(log_count = history.len(), message_id = message.id, "Selected message");
    Ok(Json(message))
}
