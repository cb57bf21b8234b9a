use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use botify_db::DbPool;
use chrono::Utc;
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    db_pool: DbPool,
}

/// Health is a single round-trip query against the conversation store: if
/// `SELECT 1` answers, the service can take webhook traffic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: String,
    pub checked_at: String,
}

pub fn router(db_pool: DbPool) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { db_pool })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let probe = sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(&state.db_pool).await;

    let (status_code, status, database) = match probe {
        Ok(_) => (StatusCode::OK, "ready", "database query succeeded".to_string()),
        Err(error) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "degraded",
            format!("database query failed: {error}"),
        ),
    };

    let payload = HealthResponse { status, database, checked_at: Utc::now().to_rfc3339() };
    (status_code, Json(payload))
}
