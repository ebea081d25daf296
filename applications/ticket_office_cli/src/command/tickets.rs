//   Copyright 2023 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::time::Duration;

use alloy_primitives::{utils::format_ether, Address};
use anyhow::bail;
use log::*;
use ticket_office_provider_client::WalletProviderClient;
use ticket_office_session::{pricing, TicketSession};

use crate::cli::{BuyArgs, Cli, WithdrawArgs};

const LOG_TARGET: &str = "ticket_office::cli";

pub async fn handle_status(cli: &Cli) -> anyhow::Result<()> {
    let Some(mut provider) = WalletProviderClient::detect(cli.provider_url.as_str()).await? else {
        println!("⚠️ No wallet provider found at {}.", cli.provider_url);
        println!("To purchase tickets, please install or start a wallet provider and try again.");
        return Ok(());
    };

    let accounts = provider.get_accounts().await?;
    let Some(account) = accounts.first().copied() else {
        println!("🔌 Wallet provider detected, but no account is authorized.");
        println!("Run `ticket_office_cli connect` to connect your wallet.");
        return Ok(());
    };

    println!("🔗 Connected as {}", account);
    let mut session = bind_session(provider, cli, account)?;
    if let Err(err) = session.refresh().await {
        error!(target: LOG_TARGET, "Error getting balance and tickets: {}", err);
    }
    print_balances(&session);
    Ok(())
}

pub async fn handle_connect(cli: &Cli) -> anyhow::Result<()> {
    let Some(mut provider) = WalletProviderClient::detect(cli.provider_url.as_str()).await? else {
        bail!(
            "A wallet provider is necessary to connect, but none was found at {}",
            cli.provider_url
        );
    };

    let accounts = match provider.request_accounts().await {
        Ok(accounts) => accounts,
        Err(err) if err.is_user_rejected() => {
            println!("🚫 The connection request was rejected in the wallet. Re-run `connect` to try again.");
            return Ok(());
        },
        Err(err) => return Err(err.into()),
    };
    let Some(account) = accounts.first().copied() else {
        bail!("The wallet provider returned no accounts");
    };

    println!("🔗 Connected as {}", account);
    let mut session = bind_session(provider, cli, account)?;
    if let Err(err) = session.refresh().await {
        error!(target: LOG_TARGET, "Error getting balance and tickets: {}", err);
    }
    print_balances(&session);
    Ok(())
}

pub async fn handle_buy(cli: &Cli, args: &BuyArgs) -> anyhow::Result<()> {
    if let Err(err) = pricing::validate_purchase(args.num_tickets) {
        println!("{}.", err);
        return Ok(());
    }

    let mut session = require_session(cli).await?;
    let total = pricing::total_cost_wei(args.num_tickets);
    println!(
        "🎟️ Purchasing {} ticket(s) for {} ETH...",
        args.num_tickets,
        format_ether(total)
    );

    match session.purchase_tickets(args.num_tickets).await {
        Ok(hash) => {
            println!("✅ Purchase confirmed in transaction {}", hash);
            print_balances(&session);
            Ok(())
        },
        Err(err) if err.is_user_rejected() => {
            println!("🚫 The purchase was rejected in the wallet. Re-run `buy` to try again.");
            Ok(())
        },
        Err(err) => {
            error!(target: LOG_TARGET, "Error purchasing tickets: {}", err);
            Err(err.into())
        },
    }
}

pub async fn handle_withdraw(cli: &Cli, args: &WithdrawArgs) -> anyhow::Result<()> {
    let mut session = require_session(cli).await?;
    if let Err(err) = session.refresh().await {
        error!(target: LOG_TARGET, "Error getting balance and tickets: {}", err);
    }

    // Bounded by the last-known count only; the contract stays authoritative
    if let Err(err) = pricing::validate_withdraw(args.num_tickets, session.balances().tickets) {
        println!("{}.", err);
        return Ok(());
    }

    println!("🎫 Withdrawing {} ticket(s)...", args.num_tickets);
    match session.withdraw_tickets(args.num_tickets).await {
        Ok(hash) => {
            println!("✅ Withdrawal confirmed in transaction {}", hash);
            print_balances(&session);
            Ok(())
        },
        Err(err) if err.is_user_rejected() => {
            println!("🚫 The withdrawal was rejected in the wallet. Re-run `withdraw` to try again.");
            Ok(())
        },
        Err(err) => {
            error!(target: LOG_TARGET, "Error withdrawing tickets: {}", err);
            Err(err.into())
        },
    }
}

async fn require_session(cli: &Cli) -> anyhow::Result<TicketSession> {
    let Some(mut provider) = WalletProviderClient::detect(cli.provider_url.as_str()).await? else {
        bail!(
            "No wallet provider found at {}. To purchase tickets, please install or start one and try again.",
            cli.provider_url
        );
    };
    let accounts = provider.get_accounts().await?;
    let Some(account) = accounts.first().copied() else {
        bail!("No account is authorized. Run `ticket_office_cli connect` first.");
    };
    bind_session(provider, cli, account)
}

fn bind_session(provider: WalletProviderClient, cli: &Cli, account: Address) -> anyhow::Result<TicketSession> {
    let session = TicketSession::bind(provider, &cli.contract_address, account)?
        .with_wait_timeout(cli.wait_timeout_secs.map(Duration::from_secs));
    Ok(session)
}

fn print_balances(session: &TicketSession) {
    let balances = session.balances();
    println!();
    println!("💰 Total ETH spent: {} ETH", format_ether(balances.eth_spent_wei));
    println!("🎫 Tickets owned: {} ticket(s)", balances.tickets);
}
