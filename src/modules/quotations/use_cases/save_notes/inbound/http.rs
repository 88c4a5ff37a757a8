use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde_json::json;

use crate::modules::access::inbound::http::authorize;
use crate::modules::quotations::use_cases::save_notes::command::SaveNotes;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<SaveNotes>, JsonRejection>,
) -> impl IntoResponse {
    if let Err(status) = authorize(&state.gate, &headers) {
        return status.into_response();
    }
    let Json(command) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.save_notes.handle(command).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(error) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": error.to_string() })),
        )
            .into_response(),
    }
}
