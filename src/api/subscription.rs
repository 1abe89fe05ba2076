// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Subscription verification endpoint.

use axum::{extract::State, Json};

use crate::{
    address::NormalizedAddress,
    error::ApiError,
    models::{SubscriptionStatusResponse, VerifySubscriptionRequest},
    state::AppState,
};

/// Verify that an account holds an active subscription.
///
/// Validates the address, performs one on-chain view call, and maps the
/// outcome: 200 when active, 401 when inactive, and 500 with a generic
/// message when the check itself fails (the underlying error is logged,
/// not echoed to the caller).
#[utoipa::path(
    post,
    path = "/verify-subscription",
    tag = "Subscription",
    request_body = VerifySubscriptionRequest,
    responses(
        (status = 200, description = "Subscription is active", body = SubscriptionStatusResponse),
        (status = 400, description = "Missing or malformed eth_address"),
        (status = 401, description = "No active subscription"),
        (status = 500, description = "Entitlement check failed")
    )
)]
pub async fn verify_subscription(
    State(state): State<AppState>,
    Json(request): Json<VerifySubscriptionRequest>,
) -> Result<Json<SubscriptionStatusResponse>, ApiError> {
    let raw = request.eth_address.unwrap_or_default();
    let addr = NormalizedAddress::parse(&raw).map_err(|e| ApiError::bad_request(e.to_string()))?;

    match state.entitlement.has_active_subscription(&addr).await {
        Ok(true) => Ok(Json(SubscriptionStatusResponse::active())),
        Ok(false) => Err(ApiError::unauthorized("No active subscription")),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "entitlement check failed");
            Err(ApiError::internal("Failed to verify subscription"))
        }
    }
}
