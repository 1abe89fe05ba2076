// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values, and the
//! [`GatewayConfig`] struct loaded from the environment at startup. The
//! resulting values are injected into the entitlement client and node
//! registry constructors rather than read from globals, so tests can supply
//! their own.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `ETH_NETWORK` | Target network (`sepolia` or `mainnet`) | `sepolia` |
//! | `ETH_RPC_URL` | JSON-RPC endpoint override | per-network default |
//! | `SUBSCRIPTION_CONTRACT` | Subscription contract address | deployed Sepolia contract |
//! | `RPC_TIMEOUT_SECS` | Upper bound on the entitlement call | `10` |
//! | `REGISTRY_DB` | Path to the node-registry SQLite file | `dvpn.db` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3006` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::blockchain::{network_by_name, NetworkConfig, ETH_SEPOLIA};

/// Environment variable selecting the target Ethereum network.
pub const ETH_NETWORK_ENV: &str = "ETH_NETWORK";

/// Environment variable overriding the JSON-RPC endpoint URL.
pub const ETH_RPC_URL_ENV: &str = "ETH_RPC_URL";

/// Environment variable overriding the subscription contract address.
pub const SUBSCRIPTION_CONTRACT_ENV: &str = "SUBSCRIPTION_CONTRACT";

/// Environment variable bounding the entitlement call, in seconds.
pub const RPC_TIMEOUT_SECS_ENV: &str = "RPC_TIMEOUT_SECS";

/// Environment variable for the node-registry SQLite file path.
///
/// The file is written by the node-approval workflow; the gateway only
/// reads it.
pub const REGISTRY_DB_ENV: &str = "REGISTRY_DB";

/// Environment variable for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable for the logging format (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Subscription contract deployed on Sepolia.
pub const DEFAULT_SUBSCRIPTION_CONTRACT: &str = "0x516Fa3Ea215c372696e6D291F00f251f49904439";

/// Default node-registry database path, relative to the working directory.
pub const DEFAULT_REGISTRY_DB: &str = "dvpn.db";

/// Default entitlement call timeout in seconds.
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 10;

/// Default server bind port.
pub const DEFAULT_PORT: u16 = 3006;

/// Startup configuration for the gateway process.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Target network for the entitlement check.
    pub network: NetworkConfig,
    /// JSON-RPC endpoint to query.
    pub rpc_url: String,
    /// Address of the subscription contract.
    pub contract_address: String,
    /// Upper bound on the entitlement call round trip.
    pub rpc_timeout: Duration,
    /// Path to the node-registry SQLite file.
    pub registry_db: PathBuf,
    /// Server bind address.
    pub host: String,
    /// Server bind port.
    pub port: u16,
}

impl GatewayConfig {
    /// Load configuration from the environment, applying defaults.
    ///
    /// Fails only on values that cannot be defaulted away, such as an
    /// unknown network name.
    pub fn from_env() -> Result<Self, String> {
        let network = match env::var(ETH_NETWORK_ENV) {
            Ok(raw) => network_by_name(&raw)?,
            Err(_) => ETH_SEPOLIA,
        };

        let rpc_url =
            env::var(ETH_RPC_URL_ENV).unwrap_or_else(|_| network.rpc_url.to_string());

        let contract_address = env::var(SUBSCRIPTION_CONTRACT_ENV)
            .unwrap_or_else(|_| DEFAULT_SUBSCRIPTION_CONTRACT.to_string());

        let rpc_timeout = Duration::from_secs(
            env::var(RPC_TIMEOUT_SECS_ENV)
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_RPC_TIMEOUT_SECS),
        );

        let registry_db = env::var(REGISTRY_DB_ENV)
            .unwrap_or_else(|_| DEFAULT_REGISTRY_DB.to_string())
            .into();

        let host = env::var(HOST_ENV).unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var(PORT_ENV)
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            network,
            rpc_url,
            contract_address,
            rpc_timeout,
            registry_db,
            host,
            port,
        })
    }
}
