use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::modules::access::inbound::http::authorize;
use crate::modules::quotations::core::filter::QuotationFilter;
use crate::shell::state::AppState;

pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<QuotationFilter>, JsonRejection>,
) -> impl IntoResponse {
    if let Err(status) = authorize(&state.gate, &headers) {
        return status.into_response();
    }
    let Json(filter) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.list_quotations.search(&filter).await {
        Ok(page) => Json(page).into_response(),
        Err(error) => {
            tracing::error!(%error, "loading quotations failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn options(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Err(status) = authorize(&state.gate, &headers) {
        return status.into_response();
    }

    match state.list_quotations.options().await {
        Ok(options) => Json(options).into_response(),
        Err(error) => {
            tracing::error!(%error, "loading filter options failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
