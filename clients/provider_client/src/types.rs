//   Copyright 2023 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use alloy_primitives::{hex, Address, B256, U256};
use serde::{Deserialize, Serialize};

/// A transaction to be signed and submitted by the wallet provider, or
/// evaluated read-only via `eth_call`. Quantities and byte payloads are
/// hex strings per the Ethereum JSON-RPC wire format. A missing `to`
/// address denotes contract creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub from: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub contract_address: Option<Address>,
    #[serde(default)]
    pub status: Option<String>,
}

impl TransactionReceipt {
    /// Post-Byzantium receipts carry an execution status. Providers that
    /// omit it cannot signal a revert through the receipt, so a missing
    /// status is treated as success.
    pub fn is_success(&self) -> bool {
        self.status.as_deref().map_or(true, |s| s == "0x1")
    }
}

/// Encodes a numeric value as a minimal `0x`-prefixed hex quantity.
pub fn encode_quantity(value: U256) -> String {
    format!("{value:#x}")
}

/// Encodes a byte payload as `0x`-prefixed hex data.
pub fn encode_data(bytes: &[u8]) -> String {
    hex::encode_prefixed(bytes)
}
