use async_graphql::{EmptySubscription, Schema, http::GraphiQLSource};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Extension,
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};

use crate::modules::access::inbound::http::authorize;
pub use crate::modules::quotations::use_cases::list_quotations::inbound::graphql::QueryRoot;
pub use crate::modules::quotations::use_cases::save_notes::inbound::graphql::MutationRoot;
pub use crate::shell::state::AppState;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

pub async fn graphql(
    State(state): State<AppState>,
    Extension(schema): Extension<AppSchema>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> Response {
    if let Err(status) = authorize(&state.gate, &headers) {
        return status.into_response();
    }
    GraphQLResponse::from(schema.execute(req.into_inner()).await).into_response()
}

pub async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/gql").finish())
}
