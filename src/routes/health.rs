use crate::health::{HealthCheckResult, HealthChecker, HealthStatus};
use crate::storage::StorageHealthChecker;
use axum::{Router, extract::State, response::Json, routing::get};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Create health check routes
pub fn create_health_routes() -> Router<crate::server::Server> {
    Router::new().route("/health", get(health_check))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: String,
    pub version: String,
    pub checks: HashMap<String, HealthCheckResult>,
}

async fn health_check(State(server): State<crate::server::Server>) -> Json<HealthResponse> {
    let checker = StorageHealthChecker::new(server.store.clone());
    let result = checker.check().await;

    let status = if result.is_healthy() {
        HealthStatus::Healthy
    } else {
        HealthStatus::Unhealthy
    };

    let mut checks = HashMap::new();
    checks.insert(checker.name().to_string(), result);

    Json(HealthResponse {
        status,
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    })
}
