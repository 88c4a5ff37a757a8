use axum::{
    Extension, Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::modules::quotations::use_cases::list_quotations::inbound::http as list_http;
use crate::modules::quotations::use_cases::save_notes::inbound::http as save_http;
use crate::shell::graphql::{build_schema, graphiql, graphql};
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    let schema = build_schema(state.clone());

    Router::new()
        .route("/health", get(health))
        .route("/quotations/options", get(list_http::options))
        .route("/quotations/search", post(list_http::search))
        .route("/notes", post(save_http::handle))
        .route("/gql", get(graphiql).post(graphql))
        .layer(Extension(schema))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
