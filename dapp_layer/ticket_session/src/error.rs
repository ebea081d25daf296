//   Copyright 2023 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use alloy_primitives::B256;
use ticket_office_provider_client::error::WalletProviderError;

use crate::abi::AbiError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid contract binding: {message}")]
    Binding { message: String },
    #[error("Failed to read {method} from the contract: {source}")]
    Read {
        method: &'static str,
        source: WalletProviderError,
    },
    #[error("Failed to submit {method} transaction: {source}")]
    Transaction {
        method: &'static str,
        source: WalletProviderError,
    },
    #[error("Transaction {hash} was reverted by the contract")]
    Reverted { hash: B256 },
    #[error("Timed out after {timeout_secs}s waiting for transaction {hash} to be mined")]
    WaitTimedOut { hash: B256, timeout_secs: u64 },
    #[error("Invalid return data for {method}: {source}")]
    InvalidCallResult {
        method: &'static str,
        source: AbiError,
    },
}

impl SessionError {
    /// True when a write failed because the user declined the signature
    /// prompt in the wallet UI. Recoverable by simply trying again.
    pub fn is_user_rejected(&self) -> bool {
        matches!(self, Self::Transaction { source, .. } if source.is_user_rejected())
    }
}
