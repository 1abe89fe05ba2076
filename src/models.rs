// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the gateway's REST API. All types derive
//! `Serialize`/`Deserialize` and `ToSchema` for JSON handling and OpenAPI
//! documentation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Placeholder shown for a node whose registry record is missing or whose
/// lookup failed. The dashboard treats it as an explicit "pending" signal.
pub const PLACEHOLDER_DETAIL: &str = "Hold on there";

/// Request body for the subscription verification endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifySubscriptionRequest {
    /// The account address to check. Required; validated before use.
    #[serde(default)]
    pub eth_address: Option<String>,
}

/// Successful subscription verification response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SubscriptionStatusResponse {
    /// Always `"active"`; an inactive subscription is reported as an error.
    pub status: String,
}

impl SubscriptionStatusResponse {
    /// The sole success value of the verification endpoint.
    pub fn active() -> Self {
        Self {
            status: "active".to_string(),
        }
    }
}

/// Public display metadata for an approved node.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct NodeDetails {
    /// Operator-chosen display name.
    pub friendly_name: String,
    /// Country the node operates from.
    pub country: String,
}

impl NodeDetails {
    /// The fallback pair served when no approved record can be resolved.
    pub fn placeholder() -> Self {
        Self {
            friendly_name: PLACEHOLDER_DETAIL.to_string(),
            country: PLACEHOLDER_DETAIL.to_string(),
        }
    }
}
