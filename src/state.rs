// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::blockchain::EntitlementCheck;
use crate::storage::NodeRegistry;

#[derive(Clone)]
pub struct AppState {
    pub entitlement: Arc<dyn EntitlementCheck>,
    pub registry: Arc<NodeRegistry>,
}

impl AppState {
    pub fn new(entitlement: Arc<dyn EntitlementCheck>, registry: NodeRegistry) -> Self {
        Self {
            entitlement,
            registry: Arc::new(registry),
        }
    }
}
