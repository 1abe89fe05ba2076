// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Network configuration constants.

/// Ethereum network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// Chain ID
    pub chain_id: u64,
    /// Default RPC endpoint URL
    pub rpc_url: &'static str,
    /// Block explorer URL
    pub explorer_url: &'static str,
}

/// Ethereum Mainnet configuration.
pub const ETH_MAINNET: NetworkConfig = NetworkConfig {
    name: "Ethereum Mainnet",
    chain_id: 1,
    rpc_url: "https://eth.llamarpc.com",
    explorer_url: "https://etherscan.io",
};

/// Ethereum Sepolia Testnet configuration.
///
/// The subscription contract this gateway ships with is deployed here.
pub const ETH_SEPOLIA: NetworkConfig = NetworkConfig {
    name: "Ethereum Sepolia Testnet",
    chain_id: 11155111,
    rpc_url: "https://ethereum-sepolia-rpc.publicnode.com",
    explorer_url: "https://sepolia.etherscan.io",
};

/// Resolve a network by its configuration name.
pub fn network_by_name(raw: &str) -> Result<NetworkConfig, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "sepolia" => Ok(ETH_SEPOLIA),
        "mainnet" => Ok(ETH_MAINNET),
        other => Err(format!(
            "unknown network `{other}`, expected `sepolia` or `mainnet`"
        )),
    }
}
