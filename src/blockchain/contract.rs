// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Subscription contract binding.

use std::str::FromStr;

use alloy::{
    primitives::Address,
    providers::Provider,
    sol,
};

use super::client::EntitlementError;

// The single-method view interface of the subscription contract.
sol! {
    #[sol(rpc)]
    interface ISubscription {
        function hasActiveSubscription(address user) external view returns (bool);
    }
}

/// Typed wrapper around the deployed subscription contract.
pub struct SubscriptionContract<P> {
    contract: ISubscription::ISubscriptionInstance<P>,
}

impl<P: Provider + Clone> SubscriptionContract<P> {
    /// Bind the contract at the given address.
    pub fn new(provider: &P, contract_address: &str) -> Result<Self, EntitlementError> {
        let address = Address::from_str(contract_address)
            .map_err(|e| EntitlementError::InvalidContractAddress(e.to_string()))?;

        Ok(Self {
            contract: ISubscription::new(address, provider.clone()),
        })
    }

    /// Ask the contract whether `user` currently holds an active subscription.
    ///
    /// A single `eth_call`; the result is definitive or an error, never a
    /// silent `false`.
    pub async fn has_active_subscription(&self, user: Address) -> Result<bool, EntitlementError> {
        self.contract
            .hasActiveSubscription(user)
            .call()
            .await
            .map_err(EntitlementError::from_call_error)
    }
}
