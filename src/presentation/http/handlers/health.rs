use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::presentation::http::state::AppState;

#[derive(Serialize)]
struct HealthReport {
    status: &'static str,
    database: DatabaseReport,
    version: &'static str,
}

#[derive(Serialize)]
struct DatabaseReport {
    reachable: bool,
    pool_size: u32,
    idle_connections: usize,
}

/// Liveness probe: runs a trivial query and reports pool state alongside
/// the verdict. 503 when the database is unreachable.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let reachable = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => true,
        Err(e) => {
            tracing::error!(error = %e, "health check could not reach the database");
            false
        }
    };

    let (status, code) = if reachable {
        ("healthy", StatusCode::OK)
    } else {
        ("unhealthy", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        code,
        Json(HealthReport {
            status,
            database: DatabaseReport {
                reachable,
                pool_size: state.db.size(),
                idle_connections: state.db.num_idle(),
            },
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
