// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Approved-node metadata endpoint.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    address::NormalizedAddress,
    models::NodeDetails,
    state::AppState,
    storage::Resolution,
};

/// Get public display metadata for a node by its account address.
///
/// This endpoint never fails: a missing record, a malformed address, or a
/// storage problem all degrade to the placeholder pair so the dashboard
/// always has something to show.
#[utoipa::path(
    get,
    path = "/api/nodes/{address}",
    tag = "Nodes",
    params(
        ("address" = String, Path, description = "Node account address (any casing)")
    ),
    responses(
        (status = 200, description = "Node metadata or placeholder", body = NodeDetails)
    )
)]
pub async fn get_node_details(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Json<NodeDetails> {
    let details = match NormalizedAddress::parse(&address) {
        Ok(addr) => match state.registry.resolve(&addr).await {
            Resolution::Found(node) => NodeDetails {
                friendly_name: node.friendly_name,
                country: node.country,
            },
            Resolution::Fallback(reason) => {
                tracing::debug!(address = %addr, ?reason, "serving node placeholder");
                NodeDetails::placeholder()
            }
        },
        Err(e) => {
            // A malformed address can never match a registry row; same
            // placeholder, no error response.
            tracing::debug!(address = %address, error = %e, "unparseable node address");
            NodeDetails::placeholder()
        }
    };

    Json(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{EntitlementCheck, EntitlementError};
    use crate::storage::{NodeRegistry, NodeStatus, StoredNode};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Arc;
    use tempfile::TempDir;

    const ADDR: &str = "0x516Fa3Ea215c372696e6D291F00f251f49904439";

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

    async fn seeded_state(rows: &[(&str, &str, &str, NodeStatus)]) -> (TempDir, AppState) {
        let dir = TempDir::new().unwrap();
        let registry = NodeRegistry::new(dir.path().join("registry.db"));
        registry.initialize_schema().await.unwrap();
        for (address, name, country, status) in rows {
            registry
                .insert(&StoredNode {
                    address: address.to_string(),
                    friendly_name: name.to_string(),
                    country: country.to_string(),
                    status: *status,
                    created_at: Utc::now(),
                })
                .await
                .unwrap();
        }
        (dir, AppState::new(Arc::new(NoEntitlement), registry))
    }

    #[tokio::test]
    async fn approved_record_is_returned_verbatim() {
        let (_dir, state) = seeded_state(&[(ADDR, "Alpha", "DE", NodeStatus::Approved)]).await;

        let Json(details) = get_node_details(State(state), Path(ADDR.to_string())).await;
        assert_eq!(details.friendly_name, "Alpha");
        assert_eq!(details.country, "DE");
    }

    #[tokio::test]
    async fn request_casing_does_not_matter() {
        let (_dir, state) = seeded_state(&[(ADDR, "Alpha", "DE", NodeStatus::Approved)]).await;

        for variant in [ADDR.to_lowercase(), ADDR.to_uppercase().replace("0X", "0x")] {
            let Json(details) = get_node_details(State(state.clone()), Path(variant)).await;
            assert_eq!(details.friendly_name, "Alpha");
        }
    }

    #[tokio::test]
    async fn unknown_address_gets_the_placeholder() {
        let (_dir, state) = seeded_state(&[]).await;

        let Json(details) = get_node_details(State(state), Path(ADDR.to_string())).await;
        assert_eq!(details, NodeDetails::placeholder());
    }

    #[tokio::test]
    async fn non_approved_record_gets_the_placeholder() {
        let (_dir, state) = seeded_state(&[(ADDR, "Alpha", "DE", NodeStatus::Pending)]).await;

        let Json(details) = get_node_details(State(state), Path(ADDR.to_string())).await;
        assert_eq!(details, NodeDetails::placeholder());
    }

    #[tokio::test]
    async fn malformed_address_gets_the_placeholder() {
        let (_dir, state) = seeded_state(&[]).await;

        let Json(details) = get_node_details(State(state), Path("garbage".to_string())).await;
        assert_eq!(details, NodeDetails::placeholder());
    }

    #[tokio::test]
    async fn storage_failure_still_returns_ok_with_placeholder() {
        let dir = TempDir::new().unwrap();
        // Point the registry at a directory so every connect fails.
        let registry = NodeRegistry::new(dir.path());
        let state = AppState::new(Arc::new(NoEntitlement), registry);

        let Json(details) = get_node_details(State(state), Path(ADDR.to_string())).await;
        assert_eq!(details, NodeDetails::placeholder());
    }
}
