// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{NodeDetails, SubscriptionStatusResponse, VerifySubscriptionRequest},
    state::AppState,
};

pub mod health;
pub mod nodes;
pub mod subscription;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route(
            "/verify-subscription",
            post(subscription::verify_subscription),
        )
        .route("/api/nodes/{address}", get(nodes::get_node_details))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        subscription::verify_subscription,
        nodes::get_node_details,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            VerifySubscriptionRequest,
            SubscriptionStatusResponse,
            NodeDetails,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Subscription", description = "On-chain subscription verification"),
        (name = "Nodes", description = "Approved-node display metadata"),
        (name = "Health", description = "Service health probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{EntitlementCheck, EntitlementError};
    use crate::storage::NodeRegistry;
    use async_trait::async_trait;
    use std::sync::Arc;

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
    async fn router_builds_with_all_routes() {
        let state = AppState::new(Arc::new(NoEntitlement), NodeRegistry::new("unused.db"));
        let app = router(state);
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }
}
