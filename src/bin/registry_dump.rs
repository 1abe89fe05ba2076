// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Print the node-registry table contents.
//!
//! Operator aid for inspecting the data the approval workflow writes:
//!
//! ```text
//! registry_dump [path-to-db]
//! ```
//!
//! Falls back to `REGISTRY_DB`, then to the default path.

use dvpn_gateway::config::{DEFAULT_REGISTRY_DB, REGISTRY_DB_ENV};
use dvpn_gateway::storage::NodeRegistry;

#[tokio::main]
async fn main() {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(REGISTRY_DB_ENV).ok())
        .unwrap_or_else(|| DEFAULT_REGISTRY_DB.to_string());

    let registry = NodeRegistry::new(&path);
    match registry.list_all().await {
        Ok(nodes) if nodes.is_empty() => {
            println!("No rows in registry at {path}");
        }
        Ok(nodes) => {
            println!("{} row(s) in registry at {path}:", nodes.len());
            for node in &nodes {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    node.address,
                    node.friendly_name,
                    node.country,
                    node.status.as_str(),
                    node.created_at.to_rfc3339(),
                );
            }
        }
        Err(e) => {
            eprintln!("Failed to read registry at {path}: {e}");
            std::process::exit(1);
        }
    }
}
