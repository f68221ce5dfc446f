//! History endpoint: recent pricing runs for the reporting surface.

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use pricing::{HistoryLog, HistoryRecord};

use crate::app::AppState;

use super::{error_with, ErrorBody};

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    20
}

/// Handle `GET /api/history`.
pub async fn history_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<HistoryRecord>>, (StatusCode, Json<ErrorBody>)> {
    state
        .store
        .recent(params.limit)
        .await
        .map(Json)
        .map_err(|e| error_with(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}
