use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;
use shelfsort_core::RunSummary;

use super::{ApiError, AppState, ResponseMeta};
use crate::middleware::RequestId;
use crate::runs::TriggerError;

/// Run summary fields at the top level, plus request metadata.
#[derive(Debug, Serialize)]
struct SortResponse {
    #[serde(flatten)]
    summary: RunSummary,
    meta: ResponseMeta,
}

/// `GET|POST /api/v1/sort-collections`: reorders every configured collection.
pub(super) async fn sort_collections(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Response {
    match state.runner.try_run("http").await {
        Ok(summary) => (
            StatusCode::OK,
            Json(SortResponse {
                summary,
                meta: ResponseMeta::new(req_id.0),
            }),
        )
            .into_response(),
        Err(TriggerError::InProgress) => ApiError::new(
            req_id.0,
            "run_in_progress",
            "a collection sort run is already in progress",
        )
        .into_response(),
        Err(TriggerError::Run(e)) => {
            ApiError::new(req_id.0, "run_failed", e.to_string()).into_response()
        }
        Err(TriggerError::Task(message)) => {
            ApiError::new(req_id.0, "run_failed", message).into_response()
        }
    }
}
