// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Node Registry Storage
//!
//! Read-side access to the approved-node registry, a SQLite file populated
//! by the external node-approval workflow. The gateway opens a short-lived
//! read-only connection per lookup and never writes on the request path.

pub mod registry;

pub use registry::{
    FallbackReason, NodeRegistry, NodeStatus, RegistryError, Resolution, StoredNode,
};
