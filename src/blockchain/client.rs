// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ethereum client for the on-chain entitlement check.

use std::time::Duration;

use alloy::{
    network::Ethereum,
    providers::{
        fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
        Identity, ProviderBuilder, RootProvider,
    },
    transports::RpcError,
};
use async_trait::async_trait;

use super::contract::SubscriptionContract;
use super::types::NetworkConfig;
use crate::address::NormalizedAddress;

/// HTTP provider type (with all fillers).
type HttpProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider<Ethereum>,
>;

/// The entitlement check seam used by the gateway handlers.
///
/// The production implementation is [`EntitlementClient`]; tests substitute
/// doubles with fixed outcomes.
#[async_trait]
pub trait EntitlementCheck: Send + Sync {
    /// Whether `addr` currently holds an active subscription.
    async fn has_active_subscription(
        &self,
        addr: &NormalizedAddress,
    ) -> Result<bool, EntitlementError>;
}

/// Read-only client for the subscription contract.
///
/// Holds the provider and contract binding for the process lifetime; every
/// invocation performs exactly one `eth_call`, with no retry and no caching.
pub struct EntitlementClient {
    /// Network configuration
    network: NetworkConfig,
    /// Bound subscription contract
    contract: SubscriptionContract<HttpProvider>,
    /// Upper bound on one call round trip
    call_timeout: Duration,
}

impl EntitlementClient {
    /// Create a client for the given network and contract.
    pub fn new(
        network: NetworkConfig,
        rpc_url: &str,
        contract_address: &str,
        call_timeout: Duration,
    ) -> Result<Self, EntitlementError> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e: url::ParseError| EntitlementError::InvalidRpcUrl(e.to_string()))?;

        let provider = ProviderBuilder::new().connect_http(url);
        let contract = SubscriptionContract::new(&provider, contract_address)?;

        Ok(Self {
            network,
            contract,
            call_timeout,
        })
    }

    /// Get the network configuration.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }
}

#[async_trait]
impl EntitlementCheck for EntitlementClient {
    async fn has_active_subscription(
        &self,
        addr: &NormalizedAddress,
    ) -> Result<bool, EntitlementError> {
        let call = self.contract.has_active_subscription(addr.address());
        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(EntitlementError::Upstream(format!(
                "no response from {} within {:?}",
                self.network.name, self.call_timeout
            ))),
        }
    }
}

/// Errors from the entitlement check.
#[derive(Debug, thiserror::Error)]
pub enum EntitlementError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Invalid contract address: {0}")]
    InvalidContractAddress(String),

    /// The RPC endpoint could not be reached or failed at transport level.
    #[error("RPC transport error: {0}")]
    Upstream(String),

    /// The call reverted or returned a result that could not be decoded.
    #[error("Contract call failed: {0}")]
    Contract(String),
}

impl EntitlementError {
    /// Classify a contract-call failure: transport-level problems are
    /// [`EntitlementError::Upstream`], everything else (reverts, decode
    /// failures) is [`EntitlementError::Contract`].
    pub(crate) fn from_call_error(err: alloy::contract::Error) -> Self {
        match err {
            alloy::contract::Error::TransportError(RpcError::Transport(kind)) => {
                EntitlementError::Upstream(kind.to_string())
            }
            other => EntitlementError::Contract(other.to_string()),
        }
    }
}
