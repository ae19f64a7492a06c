use async_graphql::http::{GraphQLPlaygroundConfig, playground_source};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse},
};

use crate::presentation::graphql::context::Session;
use crate::presentation::http::state::AppState;

/// Execute a GraphQL request. The bearer token (if any) is decoded into a
/// typed [`Session`] up front; a missing or invalid token just means an
/// anonymous session, the resolvers decide what that is allowed to do.
pub async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let session = Session::from_headers(&headers, &state.config.jwt_secret);
    state
        .schema
        .execute(req.into_inner().data(session))
        .await
        .into()
}

pub async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}
