use axum::{
    Router, middleware,
    routing::get,
};
use tower_http::trace::TraceLayer;

use super::{
    handlers::{graphql, health},
    middleware::request_id::request_id_middleware,
    state::AppState,
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/graphql",
            get(graphql::graphql_playground).post(graphql::graphql_handler),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
