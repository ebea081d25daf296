//   Copyright 2023 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

/// EIP-1193 error code returned when the user declines a request in the
/// wallet UI.
pub const USER_REJECTED_REQUEST_CODE: i64 = 4001;

#[derive(Debug, thiserror::Error)]
pub enum WalletProviderError {
    #[error("Failed to deserialize response for method {method}: {source}")]
    DeserializeResponse { source: serde_json::Error, method: String },
    #[error("Failed to serialize request for method {method}: {source}")]
    SerializeRequest { method: String, source: serde_json::Error },
    #[error("Failed to send request: {source}")]
    RequestFailed {
        #[from]
        source: reqwest::Error,
    },
    #[error("Request failed: code: {code} message: {message}")]
    RequestFailedWithStatus { code: i64, message: String },
    #[error("Request was rejected by the user: {message}")]
    UserRejected { message: String },
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },
}

impl WalletProviderError {
    pub fn is_user_rejected(&self) -> bool {
        matches!(self, Self::UserRejected { .. })
    }
}
