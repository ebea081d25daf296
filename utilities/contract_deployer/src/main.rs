//   Copyright 2023 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::{fs, time::Duration};

use alloy_primitives::hex;
use anyhow::{anyhow, bail, Context};
use ticket_office_provider_client::{
    types::{encode_data, TransactionRequest},
    WalletProviderClient,
};
use tokio::time::sleep;

use crate::cli::Cli;

mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::init();

    let bytecode = read_bytecode(&cli)?;
    let mut client = WalletProviderClient::connect(cli.provider_url.as_str())?;

    let deployer = match cli.from {
        Some(address) => address,
        None => {
            let accounts = client
                .get_accounts()
                .await
                .with_context(|| format!("Failed to connect to {}", cli.provider_url))?;
            accounts
                .first()
                .copied()
                .ok_or_else(|| anyhow!("The wallet provider has no authorized accounts to deploy from"))?
        },
    };
    println!("Deploying contract with account: {}", deployer);

    // No `to` address makes this a contract-creation transaction
    let request = TransactionRequest {
        from: deployer,
        data: Some(encode_data(&bytecode)),
        ..Default::default()
    };
    let hash = client.send_transaction(&request).await?;
    println!("Transaction {} submitted, waiting for confirmation...", hash);

    let receipt = loop {
        match client.get_transaction_receipt(hash).await? {
            Some(receipt) => break receipt,
            None => sleep(Duration::from_secs(1)).await,
        }
    };
    if !receipt.is_success() {
        bail!("Deployment transaction {} was reverted", hash);
    }
    let contract_address = receipt
        .contract_address
        .ok_or_else(|| anyhow!("Receipt for {} is missing the contract address", hash))?;
    println!("Contract deployed to: {}", contract_address);

    Ok(())
}

fn read_bytecode(cli: &Cli) -> anyhow::Result<Vec<u8>> {
    let raw = fs::read_to_string(&cli.bytecode_file)
        .with_context(|| format!("Failed to read bytecode file {}", cli.bytecode_file.display()))?;
    let cleaned: String = raw.split_whitespace().collect();
    let bytecode = hex::decode(&cleaned)
        .with_context(|| format!("{} does not contain valid hex bytecode", cli.bytecode_file.display()))?;
    if bytecode.is_empty() {
        bail!("{} is empty", cli.bytecode_file.display());
    }
    Ok(bytecode)
}
