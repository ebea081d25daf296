//   Copyright 2023 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! JSON-RPC client for a browser-style Ethereum wallet provider.
//!
//! The provider holds the private keys: account authorization and
//! transaction signing happen on its side of the boundary, gated by the
//! user. This client only ever sees addresses, call results and receipts.

pub mod error;
pub mod types;

use alloy_primitives::{hex, Address, B256};
use log::*;
use reqwest::{
    header::{self, HeaderMap},
    IntoUrl,
    Url,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{WalletProviderError, USER_REJECTED_REQUEST_CODE},
    types::{TransactionReceipt, TransactionRequest},
};

const LOG_TARGET: &str = "ticket_office::provider_client";

const NO_PARAMS: [&str; 0] = [];

#[derive(Debug, Clone)]
pub struct WalletProviderClient {
    client: reqwest::Client,
    endpoint: Url,
    request_id: i64,
}

impl WalletProviderClient {
    pub fn connect<T: IntoUrl>(endpoint: T) -> Result<Self, WalletProviderError> {
        let client = reqwest::Client::builder()
            .default_headers({
                let mut headers = HeaderMap::with_capacity(1);
                headers.insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
                headers
            })
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into_url()?,
            request_id: 0,
        })
    }

    /// Probes the endpoint for an injected/local wallet provider. A provider
    /// that cannot be reached is a normal state (the user has not started
    /// one), so transport-level failures yield `Ok(None)` rather than an
    /// error.
    pub async fn detect<T: IntoUrl>(endpoint: T) -> Result<Option<Self>, WalletProviderError> {
        let mut client = Self::connect(endpoint)?;
        match client.client_version().await {
            Ok(version) => {
                debug!(target: LOG_TARGET, "Detected wallet provider \"{}\" at {}", version, client.endpoint);
                Ok(Some(client))
            },
            Err(WalletProviderError::RequestFailed { source }) => {
                debug!(
                    target: LOG_TARGET,
                    "No wallet provider reachable at {}: {}", client.endpoint, source
                );
                Ok(None)
            },
            Err(err) => Err(err),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn client_version(&mut self) -> Result<String, WalletProviderError> {
        self.send_request("web3_clientVersion", &NO_PARAMS).await
    }

    /// Returns the accounts the user has already authorized, without
    /// prompting. An empty list means not connected.
    pub async fn get_accounts(&mut self) -> Result<Vec<Address>, WalletProviderError> {
        self.send_request("eth_accounts", &NO_PARAMS).await
    }

    /// Asks the provider to prompt the user for account authorization.
    /// Declining the prompt surfaces as [`WalletProviderError::UserRejected`]
    /// (EIP-1193 code 4001).
    pub async fn request_accounts(&mut self) -> Result<Vec<Address>, WalletProviderError> {
        self.send_request("eth_requestAccounts", &NO_PARAMS).await
    }

    /// Evaluates a read-only call against the latest block and returns the
    /// raw return data.
    pub async fn call(&mut self, request: &TransactionRequest) -> Result<Vec<u8>, WalletProviderError> {
        let data: String = self.send_request("eth_call", &(request, "latest")).await?;
        hex::decode(&data).map_err(|e| WalletProviderError::InvalidResponse {
            message: format!("eth_call returned invalid hex data: {}", e),
        })
    }

    /// Submits a transaction for signing. The returned hash identifies the
    /// transaction but says nothing about inclusion; poll
    /// [`get_transaction_receipt`](Self::get_transaction_receipt) for that.
    pub async fn send_transaction(&mut self, request: &TransactionRequest) -> Result<B256, WalletProviderError> {
        self.send_request("eth_sendTransaction", &(request,)).await
    }

    pub async fn get_transaction_receipt(
        &mut self,
        hash: B256,
    ) -> Result<Option<TransactionReceipt>, WalletProviderError> {
        self.send_request("eth_getTransactionReceipt", &(hash,)).await
    }

    fn next_request_id(&mut self) -> i64 {
        self.request_id += 1;
        self.request_id
    }

    async fn jrpc_call(&mut self, method: &str, params: Value) -> Result<Value, WalletProviderError> {
        let request_json = json!(
            {
                "jsonrpc": "2.0",
                "id": self.next_request_id(),
                "method": method,
                "params": params,
            }
        );
        trace!(target: LOG_TARGET, "Sending {} request to {}", method, self.endpoint);
        let resp = self
            .client
            .post(self.endpoint.clone())
            .body(request_json.to_string())
            .send()
            .await?;
        let val = resp.json().await?;
        jsonrpc_result(val)
    }

    async fn send_request<P: Serialize, R: DeserializeOwned>(
        &mut self,
        method: &str,
        params: &P,
    ) -> Result<R, WalletProviderError> {
        let params = serde_json::to_value(params).map_err(|e| WalletProviderError::SerializeRequest {
            source: e,
            method: method.to_string(),
        })?;
        let resp = self.jrpc_call(method, params).await?;
        match serde_json::from_value(resp) {
            Ok(r) => Ok(r),
            Err(e) => Err(WalletProviderError::DeserializeResponse {
                source: e,
                method: method.to_string(),
            }),
        }
    }
}

fn jsonrpc_result(val: Value) -> Result<Value, WalletProviderError> {
    if let Some(err) = val.get("error") {
        let code = err.get("code").and_then(|c| c.as_i64()).unwrap_or(-1);
        let message = err
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error")
            .to_string();
        if code == USER_REJECTED_REQUEST_CODE {
            return Err(WalletProviderError::UserRejected { message });
        }
        return Err(WalletProviderError::RequestFailedWithStatus { code, message });
    }

    let result = val
        .get("result")
        .ok_or_else(|| WalletProviderError::InvalidResponse {
            message: "Missing result field".to_string(),
        })?;
    Ok(result.clone())
}
