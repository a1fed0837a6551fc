use axum::{Json, extract::State, http::StatusCode};
use axum_helpers::server::ReadyResponse;

use crate::state::AppState;

/// Readiness: answers 200 only while the database responds to pings.
pub async fn ready_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadyResponse>) {
    let database = database::postgres::ping(&state.db).await;

    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(ReadyResponse::new(database)))
}
