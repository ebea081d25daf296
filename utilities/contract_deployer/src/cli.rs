//   Copyright 2023 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::path::PathBuf;

use alloy_primitives::Address;
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    /// JSON-RPC endpoint of the wallet provider holding the deployer account
    #[clap(long, short = 'p', env = "WALLET_PROVIDER_URL", default_value = "http://127.0.0.1:8545")]
    pub provider_url: String,
    /// Path to the compiled contract creation bytecode (hex, `0x` prefix optional)
    #[clap(long, short = 'f')]
    pub bytecode_file: PathBuf,
    /// Account to deploy from. Defaults to the first authorized account.
    #[clap(long)]
    pub from: Option<Address>,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }
}
