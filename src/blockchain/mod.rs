// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain integration module for the on-chain entitlement check.
//!
//! This module provides functionality for:
//! - Querying the subscription contract (`hasActiveSubscription`)
//! - Network configuration for the supported Ethereum networks

pub mod client;
pub mod contract;
pub mod types;

pub use client::{EntitlementCheck, EntitlementClient, EntitlementError};
pub use types::*;
