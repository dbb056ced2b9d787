//! Health check handler.

use axum::Json;
use axum::extract::State;

use librauth_core::traits::registry::RegistryProvider;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// `GET /health` — liveness plus Session Registry reachability.
///
/// Never errors: a registry outage is reported as `degraded`, not a 5xx,
/// so orchestrators can tell "down" from "up but impaired".
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let registry_ok = state.registry.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: if registry_ok { "ok" } else { "degraded" }.to_string(),
        registry: registry_ok,
    })
}
