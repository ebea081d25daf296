//   Copyright 2023 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::time::{Duration, Instant};

use alloy_primitives::{Address, B256, U256};
use log::*;
use ticket_office_provider_client::{
    types::{encode_data, encode_quantity, TransactionReceipt, TransactionRequest},
    WalletProviderClient,
};
use tokio::time::sleep;

use crate::{abi, error::SessionError, pricing};

const LOG_TARGET: &str = "ticket_office::dapp::session";

pub const DEFAULT_RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Last-known contract state for the active account. Zero until the first
/// successful refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicketBalances {
    pub eth_spent_wei: U256,
    pub tickets: u64,
}

/// A signer-bound handle to the ticket office contract.
///
/// The binding (provider endpoint, contract address, active account) is
/// fixed at construction and never reassigned. Balances are cached and only
/// updated by an explicit [`refresh`](Self::refresh), which the write
/// operations invoke after a confirmed transaction; a failed refresh leaves
/// the previous values in place.
#[derive(Debug)]
pub struct TicketSession {
    provider: WalletProviderClient,
    account: Address,
    contract_address: Address,
    balances: TicketBalances,
    receipt_poll_interval: Duration,
    wait_timeout: Option<Duration>,
}

impl TicketSession {
    /// Binds the authorized `account` to the contract at `contract_address`.
    /// The address is a compile-time constant in normal operation, so a
    /// malformed value indicates misconfiguration rather than a runtime
    /// condition.
    pub fn bind(
        provider: WalletProviderClient,
        contract_address: &str,
        account: Address,
    ) -> Result<Self, SessionError> {
        let contract_address = contract_address
            .parse::<Address>()
            .map_err(|e| SessionError::Binding {
                message: format!("malformed contract address \"{}\": {}", contract_address, e),
            })?;

        Ok(Self {
            provider,
            account,
            contract_address,
            balances: TicketBalances::default(),
            receipt_poll_interval: DEFAULT_RECEIPT_POLL_INTERVAL,
            wait_timeout: None,
        })
    }

    pub fn with_wait_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.wait_timeout = timeout;
        self
    }

    pub fn with_receipt_poll_interval(mut self, interval: Duration) -> Self {
        self.receipt_poll_interval = interval;
        self
    }

    pub fn account(&self) -> Address {
        self.account
    }

    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    pub fn balances(&self) -> &TicketBalances {
        &self.balances
    }

    /// Reads the spent amount and ticket count from the contract. The cache
    /// is only written once both reads have succeeded; on failure it keeps
    /// its previous values and the caller decides how to report the error.
    pub async fn refresh(&mut self) -> Result<&TicketBalances, SessionError> {
        let eth_spent_wei = self.read_uint(abi::get_eth_spent(), abi::GET_ETH_SPENT_SIGNATURE).await?;
        let tickets = self.read_uint(abi::get_my_tickets(), abi::GET_MY_TICKETS_SIGNATURE).await?;
        let tickets = u64::try_from(tickets).map_err(|_| SessionError::InvalidCallResult {
            method: abi::GET_MY_TICKETS_SIGNATURE,
            source: abi::AbiError::ValueOutOfRange,
        })?;

        self.balances = TicketBalances { eth_spent_wei, tickets };
        debug!(
            target: LOG_TARGET,
            "Refreshed balances for {}: {} wei spent, {} ticket(s)", self.account, eth_spent_wei, tickets
        );
        Ok(&self.balances)
    }

    /// Purchases `num_tickets` tickets, attaching the payment computed by
    /// the pricing policy, and waits for the transaction to be mined.
    ///
    /// The caller is responsible for rejecting a zero quantity via
    /// [`pricing::validate_purchase`] before calling.
    pub async fn purchase_tickets(&mut self, num_tickets: u64) -> Result<B256, SessionError> {
        let value = pricing::total_cost_wei(num_tickets);
        info!(
            target: LOG_TARGET,
            "Purchasing {} ticket(s) for {} wei", num_tickets, value
        );
        let hash = self
            .submit_and_wait(abi::PURCHASE_TICKETS_SIGNATURE, abi::purchase_tickets(num_tickets), Some(value))
            .await?;
        self.refresh_after_write(hash).await;
        Ok(hash)
    }

    /// Withdraws `num_tickets` tickets and waits for the transaction to be
    /// mined.
    ///
    /// The caller is responsible for bounding the quantity by the last-known
    /// ticket count via [`pricing::validate_withdraw`]; the contract remains
    /// the authority and will revert an overdraw regardless.
    pub async fn withdraw_tickets(&mut self, num_tickets: u64) -> Result<B256, SessionError> {
        info!(target: LOG_TARGET, "Withdrawing {} ticket(s)", num_tickets);
        let hash = self
            .submit_and_wait(abi::WITHDRAW_SIGNATURE, abi::withdraw(num_tickets), None)
            .await?;
        self.refresh_after_write(hash).await;
        Ok(hash)
    }

    async fn read_uint(&mut self, data: Vec<u8>, method: &'static str) -> Result<U256, SessionError> {
        let request = TransactionRequest {
            from: self.account,
            to: Some(self.contract_address),
            data: Some(encode_data(&data)),
            ..Default::default()
        };
        let ret = self
            .provider
            .call(&request)
            .await
            .map_err(|source| SessionError::Read { method, source })?;
        abi::decode_uint256(&ret).map_err(|source| SessionError::InvalidCallResult { method, source })
    }

    async fn submit_and_wait(
        &mut self,
        method: &'static str,
        data: Vec<u8>,
        value: Option<U256>,
    ) -> Result<B256, SessionError> {
        let request = TransactionRequest {
            from: self.account,
            to: Some(self.contract_address),
            value: value.map(encode_quantity),
            data: Some(encode_data(&data)),
            ..Default::default()
        };
        let hash = self
            .provider
            .send_transaction(&request)
            .await
            .map_err(|source| SessionError::Transaction { method, source })?;
        debug!(target: LOG_TARGET, "Transaction {} submitted, waiting for inclusion", hash);

        let receipt = self.wait_for_receipt(method, hash).await?;
        if !receipt.is_success() {
            return Err(SessionError::Reverted { hash });
        }
        debug!(
            target: LOG_TARGET,
            "Transaction {} mined in block {}",
            hash,
            receipt.block_number.as_deref().unwrap_or("<unknown>")
        );
        Ok(hash)
    }

    // A confirmed write has already taken effect on-chain; a refresh failure
    // at this point must not fail the operation, only flag staleness.
    async fn refresh_after_write(&mut self, hash: B256) {
        if let Err(err) = self.refresh().await {
            warn!(
                target: LOG_TARGET,
                "Transaction {} confirmed but refreshing balances failed, displayed values may be stale: {}", hash, err
            );
        }
    }

    async fn wait_for_receipt(&mut self, method: &'static str, hash: B256) -> Result<TransactionReceipt, SessionError> {
        let started = Instant::now();
        loop {
            let receipt = self
                .provider
                .get_transaction_receipt(hash)
                .await
                .map_err(|source| SessionError::Transaction { method, source })?;
            if let Some(receipt) = receipt {
                return Ok(receipt);
            }
            if let Some(timeout) = self.wait_timeout {
                if started.elapsed() >= timeout {
                    return Err(SessionError::WaitTimedOut {
                        hash,
                        timeout_secs: timeout.as_secs(),
                    });
                }
            }
            sleep(self.receipt_poll_interval).await;
        }
    }
}
