//   Copyright 2023 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

pub const DEFAULT_PROVIDER_URL: &str = "http://127.0.0.1:8545";

/// The first contract deployed from the default account on a fresh dev
/// chain always lands at this address.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
