// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response with individual component status.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyResponse {
    /// Overall health status ("ok" or "degraded").
    pub status: String,
    /// Individual health checks and their results.
    pub checks: HealthChecks,
}

/// Individual health check results.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    /// Whether the service process is running.
    pub service: String,
    /// Node-registry file availability.
    pub registry: String,
}

/// Simple health check response for liveness probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Health check endpoint handler.
///
/// Reports degraded when the registry file is missing. The node endpoint
/// keeps serving placeholders in that state; this is the operator's signal
/// to look at the approval workflow's output.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = ReadyResponse),
        (status = 503, description = "Service is degraded", body = ReadyResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let registry_ok = state.registry.db_path().exists();

    let response = ReadyResponse {
        status: if registry_ok { "ok" } else { "degraded" }.to_string(),
        checks: HealthChecks {
            service: "ok".to_string(),
            registry: if registry_ok { "ok" } else { "missing" }.to_string(),
        },
    };

    let status = if registry_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

/// Liveness probe handler.
///
/// Always returns 200 if the process is running.
/// Does not check dependencies - use /health for that.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{EntitlementCheck, EntitlementError};
    use crate::storage::NodeRegistry;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tempfile::TempDir;

    struct NoEntitlement;

    #[async_trait]
    impl EntitlementCheck for NoEntitlement {
        async fn has_active_subscription(
            &self,
            _addr: &crate::address::NormalizedAddress,
        ) -> Result<bool, EntitlementError> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn health_reports_ok_when_registry_exists() {
        let dir = TempDir::new().unwrap();
        let registry = NodeRegistry::new(dir.path().join("registry.db"));
        registry.initialize_schema().await.unwrap();
        let state = AppState::new(Arc::new(NoEntitlement), registry);

        let (status, Json(body)) = health(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
        assert_eq!(body.checks.registry, "ok");
    }

    #[tokio::test]
    async fn health_degrades_when_registry_file_is_missing() {
        let dir = TempDir::new().unwrap();
        let registry = NodeRegistry::new(dir.path().join("missing.db"));
        let state = AppState::new(Arc::new(NoEntitlement), registry);

        let (status, Json(body)) = health(State(state)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.checks.registry, "missing");
    }

    #[tokio::test]
    async fn liveness_always_reports_ok() {
        let Json(body) = liveness().await;
        assert_eq!(body.status, "ok");
    }
}
