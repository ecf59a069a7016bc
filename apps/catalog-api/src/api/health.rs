//! Readiness endpoint

use axum::{extract::State, response::Response, routing::get, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};

use crate::state::AppState;

/// `GET /ready`: 200 once Postgres and Redis both answer, 503 otherwise
async fn ready(State(state): State<AppState>) -> Response {
    let mut redis = state.redis.clone();

    let database: HealthCheckFuture = Box::pin(async {
        database::postgres::check_health(&state.db)
            .await
            .map_err(|e| e.to_string())
    });
    let cache: HealthCheckFuture = Box::pin(async move {
        database::redis::check_health(&mut redis)
            .await
            .map_err(|e| e.to_string())
    });

    run_health_checks(vec![("database", database), ("redis", cache)]).await
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
