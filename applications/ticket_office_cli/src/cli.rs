//   Copyright 2023 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use clap::{Args, Parser, Subcommand};

use crate::constants::{DEFAULT_CONTRACT_ADDRESS, DEFAULT_PROVIDER_URL};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    /// JSON-RPC endpoint of the wallet provider
    #[clap(long, short = 'p', env = "WALLET_PROVIDER_URL", default_value = DEFAULT_PROVIDER_URL)]
    pub provider_url: String,
    /// Address of the deployed ticket office contract
    #[clap(long, short = 'c', env = "TICKET_CONTRACT_ADDRESS", default_value = DEFAULT_CONTRACT_ADDRESS)]
    pub contract_address: String,
    /// Maximum seconds to wait for a transaction to be mined. Waits
    /// indefinitely when unset.
    #[clap(long, short = 't', alias = "wait-timeout")]
    pub wait_timeout_secs: Option<u64>,
    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the wallet connection state and current balances
    Status,
    /// Ask the wallet to authorize an account and show balances
    Connect,
    /// Purchase tickets
    Buy(BuyArgs),
    /// Withdraw previously purchased tickets
    Withdraw(WithdrawArgs),
}

#[derive(Args, Debug)]
pub struct BuyArgs {
    /// Number of tickets to purchase
    #[clap(long, short = 'n', alias = "tickets")]
    pub num_tickets: u64,
}

#[derive(Args, Debug)]
pub struct WithdrawArgs {
    /// Number of tickets to withdraw
    #[clap(long, short = 'n', alias = "tickets")]
    pub num_tickets: u64,
}
