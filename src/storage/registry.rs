// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Approved-node registry resolver.
//!
//! The registry is a SQLite file owned by the external node-approval
//! workflow; this module only reads it on the request path. Each lookup
//! opens its own read-only connection on a blocking thread and releases it
//! on every exit path; there is no pooling and no shared connection state.
//!
//! ## Table Layout
//!
//! - `pending_nodes`: `(address, friendly_name, country, status, created_at)`
//!
//! Address matching is case-insensitive; only rows with `status = 'approved'`
//! are visible to the resolver. Lookup failures of any kind degrade to the
//! placeholder pair rather than an error; see [`Resolution`].

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OpenFlags, Row};
use serde::{Deserialize, Serialize};
use tokio::task;

use crate::address::NormalizedAddress;

/// Lifecycle states a registry row can be in. Only [`NodeStatus::Approved`]
/// rows are visible to the resolver; the approval workflow owns the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Pending,
    Approved,
    Rejected,
}

impl NodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeStatus::Pending => "pending",
            NodeStatus::Approved => "approved",
            NodeStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for NodeStatus {
    type Err = RegistryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "pending" => Ok(NodeStatus::Pending),
            "approved" => Ok(NodeStatus::Approved),
            "rejected" => Ok(NodeStatus::Rejected),
            other => Err(RegistryError::InvalidStatus(other.to_string())),
        }
    }
}

/// A node record as stored by the approval workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredNode {
    /// Account address of the node operator (stored casing preserved)
    pub address: String,
    /// Operator-chosen display name
    pub friendly_name: String,
    /// Country the node operates from
    pub country: String,
    /// Approval state
    pub status: NodeStatus,
    /// When the row was written
    pub created_at: DateTime<Utc>,
}

/// Errors from the registry storage layer.
///
/// These never cross the HTTP boundary; [`NodeRegistry::resolve`] absorbs
/// them into [`Resolution::Fallback`].
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("blocking task failed: {0}")]
    Task(#[from] task::JoinError),

    #[error("invalid node status `{0}` in registry")]
    InvalidStatus(String),

    #[error("invalid timestamp `{0}` in registry")]
    InvalidTimestamp(String),
}

/// Outcome of a registry resolution.
///
/// The fail-open policy is part of the contract: callers can see *why* the
/// placeholder is being served, but they cannot receive an error.
#[derive(Debug)]
pub enum Resolution {
    /// An approved record matched the normalized address.
    Found(StoredNode),
    /// No usable record; display data degrades to the placeholder pair.
    Fallback(FallbackReason),
}

/// Why a resolution fell back to the placeholder.
#[derive(Debug)]
pub enum FallbackReason {
    /// No approved row matched (including rows in other statuses).
    NotFound,
    /// The lookup itself failed; logged, never surfaced.
    Storage(RegistryError),
}

/// Read-side handle to the approved-node registry.
#[derive(Debug, Clone)]
pub struct NodeRegistry {
    db_path: PathBuf,
}

impl NodeRegistry {
    /// Create a handle for the registry at the given path.
    ///
    /// Nothing is opened here; every operation opens its own connection.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Path to the underlying SQLite file.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Create the registry table if it does not exist yet.
    ///
    /// The approval workflow normally owns the schema; this exists so a
    /// fresh deployment (and the tests) start from an empty table instead
    /// of a missing one.
    pub async fn initialize_schema(&self) -> Result<(), RegistryError> {
        let path = self.db_path.clone();
        task::spawn_blocking(move || -> Result<(), RegistryError> {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).ok();
                }
            }
            let conn = Connection::open(&path)?;
            conn.execute(
                "CREATE TABLE IF NOT EXISTS pending_nodes (
                    address TEXT NOT NULL,
                    friendly_name TEXT NOT NULL,
                    country TEXT NOT NULL,
                    status TEXT NOT NULL,
                    created_at TEXT NOT NULL
                )",
                [],
            )?;
            conn.execute(
                "CREATE INDEX IF NOT EXISTS idx_pending_nodes_address
                 ON pending_nodes(LOWER(address))",
                [],
            )?;
            Ok(())
        })
        .await?
    }

    /// Insert a node record.
    ///
    /// Ingestion point for the approval workflow; the HTTP surface never
    /// writes. Duplicates are not rejected here; uniqueness is the
    /// workflow's concern, and [`NodeRegistry::lookup`] picks the first
    /// match deterministically.
    pub async fn insert(&self, node: &StoredNode) -> Result<(), RegistryError> {
        let path = self.db_path.clone();
        let node = node.clone();
        task::spawn_blocking(move || -> Result<(), RegistryError> {
            let conn = Connection::open(&path)?;
            conn.execute(
                "INSERT INTO pending_nodes (address, friendly_name, country, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    node.address,
                    node.friendly_name,
                    node.country,
                    node.status.as_str(),
                    node.created_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await?
    }

    /// Look up the approved record for a normalized address.
    ///
    /// Case-insensitive on the stored address; rows in any status other
    /// than `approved` are invisible. On duplicates the first row (lowest
    /// rowid) wins.
    pub async fn lookup(
        &self,
        addr: &NormalizedAddress,
    ) -> Result<Option<StoredNode>, RegistryError> {
        let path = self.db_path.clone();
        let key = addr.to_string();
        task::spawn_blocking(move || -> Result<Option<StoredNode>, RegistryError> {
            let conn = Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
            let mut stmt = conn.prepare(
                "SELECT address, friendly_name, country, status, created_at
                 FROM pending_nodes
                 WHERE LOWER(address) = LOWER(?1) AND status = 'approved'
                 ORDER BY rowid
                 LIMIT 1",
            )?;
            let mut rows = stmt.query(params![key])?;
            match rows.next()? {
                Some(row) => Ok(Some(row_to_node(row)?)),
                None => Ok(None),
            }
        })
        .await?
    }

    /// Resolve display metadata for a normalized address, fail-open.
    ///
    /// Storage failures are logged and absorbed; the caller always gets a
    /// [`Resolution`] it can render.
    pub async fn resolve(&self, addr: &NormalizedAddress) -> Resolution {
        match self.lookup(addr).await {
            Ok(Some(node)) => Resolution::Found(node),
            Ok(None) => Resolution::Fallback(FallbackReason::NotFound),
            Err(e) => {
                tracing::warn!(address = %addr, error = %e, "registry lookup failed, serving placeholder");
                Resolution::Fallback(FallbackReason::Storage(e))
            }
        }
    }

    /// All rows in insertion order, regardless of status.
    ///
    /// Used by the `registry_dump` utility, not by the request path.
    pub async fn list_all(&self) -> Result<Vec<StoredNode>, RegistryError> {
        let path = self.db_path.clone();
        task::spawn_blocking(move || -> Result<Vec<StoredNode>, RegistryError> {
            let conn = Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
            let mut stmt = conn.prepare(
                "SELECT address, friendly_name, country, status, created_at
                 FROM pending_nodes
                 ORDER BY rowid",
            )?;
            let mut rows = stmt.query([])?;
            let mut nodes = Vec::new();
            while let Some(row) = rows.next()? {
                nodes.push(row_to_node(row)?);
            }
            Ok(nodes)
        })
        .await?
    }
}

fn row_to_node(row: &Row<'_>) -> Result<StoredNode, RegistryError> {
    let status_raw: String = row.get(3)?;
    let created_raw: String = row.get(4)?;
    Ok(StoredNode {
        address: row.get(0)?,
        friendly_name: row.get(1)?,
        country: row.get(2)?,
        status: status_raw.parse()?,
        created_at: DateTime::parse_from_rfc3339(&created_raw)
            .map_err(|_| RegistryError::InvalidTimestamp(created_raw.clone()))?
            .with_timezone(&Utc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ADDR: &str = "0x516Fa3Ea215c372696e6D291F00f251f49904439";
    const OTHER: &str = "0x76568BEd5Acf1A5Cd888773C8cAe9ea2a9131A63";

    async fn temp_registry() -> (TempDir, NodeRegistry) {
        let dir = TempDir::new().expect("create temp dir");
        let registry = NodeRegistry::new(dir.path().join("registry.db"));
        registry.initialize_schema().await.expect("init schema");
        (dir, registry)
    }

    fn node(address: &str, name: &str, country: &str, status: NodeStatus) -> StoredNode {
        StoredNode {
            address: address.to_string(),
            friendly_name: name.to_string(),
            country: country.to_string(),
            status,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn approved_record_is_found() {
        let (_dir, registry) = temp_registry().await;
        registry
            .insert(&node(ADDR, "Alpha", "DE", NodeStatus::Approved))
            .await
            .unwrap();

        let addr = NormalizedAddress::parse(ADDR).unwrap();
        let found = registry.lookup(&addr).await.unwrap().expect("record");
        assert_eq!(found.friendly_name, "Alpha");
        assert_eq!(found.country, "DE");
    }

    #[tokio::test]
    async fn lookup_is_case_insensitive() {
        let (_dir, registry) = temp_registry().await;
        registry
            .insert(&node(ADDR, "Alpha", "DE", NodeStatus::Approved))
            .await
            .unwrap();

        // Same address supplied all-lowercase.
        let addr = NormalizedAddress::parse(&ADDR.to_lowercase()).unwrap();
        let found = registry.lookup(&addr).await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn non_approved_statuses_are_invisible() {
        let (_dir, registry) = temp_registry().await;
        registry
            .insert(&node(ADDR, "Alpha", "DE", NodeStatus::Pending))
            .await
            .unwrap();
        registry
            .insert(&node(OTHER, "Beta", "FR", NodeStatus::Rejected))
            .await
            .unwrap();

        for raw in [ADDR, OTHER] {
            let addr = NormalizedAddress::parse(raw).unwrap();
            assert!(registry.lookup(&addr).await.unwrap().is_none());
            assert!(matches!(
                registry.resolve(&addr).await,
                Resolution::Fallback(FallbackReason::NotFound)
            ));
        }
    }

    #[tokio::test]
    async fn missing_record_resolves_to_not_found() {
        let (_dir, registry) = temp_registry().await;
        let addr = NormalizedAddress::parse(ADDR).unwrap();
        assert!(matches!(
            registry.resolve(&addr).await,
            Resolution::Fallback(FallbackReason::NotFound)
        ));
    }

    #[tokio::test]
    async fn unopenable_database_resolves_to_storage_fallback() {
        let dir = TempDir::new().unwrap();
        // A directory is not a database file; the read-only open fails.
        let registry = NodeRegistry::new(dir.path());
        let addr = NormalizedAddress::parse(ADDR).unwrap();
        assert!(matches!(
            registry.resolve(&addr).await,
            Resolution::Fallback(FallbackReason::Storage(_))
        ));
    }

    #[tokio::test]
    async fn nonexistent_file_resolves_to_storage_fallback() {
        let dir = TempDir::new().unwrap();
        let registry = NodeRegistry::new(dir.path().join("never-created.db"));
        let addr = NormalizedAddress::parse(ADDR).unwrap();
        assert!(matches!(
            registry.resolve(&addr).await,
            Resolution::Fallback(FallbackReason::Storage(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_rows_resolve_to_first_insert() {
        let (_dir, registry) = temp_registry().await;
        registry
            .insert(&node(&ADDR.to_uppercase().replace("0X", "0x"), "First", "DE", NodeStatus::Approved))
            .await
            .unwrap();
        registry
            .insert(&node(&ADDR.to_lowercase(), "Second", "FR", NodeStatus::Approved))
            .await
            .unwrap();

        let addr = NormalizedAddress::parse(ADDR).unwrap();
        let found = registry.lookup(&addr).await.unwrap().expect("record");
        assert_eq!(found.friendly_name, "First");
    }

    #[tokio::test]
    async fn list_all_returns_rows_in_insert_order() {
        let (_dir, registry) = temp_registry().await;
        registry
            .insert(&node(ADDR, "Alpha", "DE", NodeStatus::Approved))
            .await
            .unwrap();
        registry
            .insert(&node(OTHER, "Beta", "FR", NodeStatus::Pending))
            .await
            .unwrap();

        let all = registry.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].friendly_name, "Alpha");
        assert_eq!(all[1].status, NodeStatus::Pending);
    }
}
