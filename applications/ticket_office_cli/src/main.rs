//   Copyright 2023 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use crate::cli::{Cli, Command};

mod cli;
mod command;
mod constants;
mod logger;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::init();

    if let Err(err) = logger::init_logger() {
        eprintln!("{}", err);
        return Err(err.into());
    }

    if let Err(err) = handle_command(&cli).await {
        eprintln!("👮 Command failed with error \"{}\"", err);
        return Err(err);
    }

    Ok(())
}

async fn handle_command(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Command::Status => command::tickets::handle_status(cli).await,
        Command::Connect => command::tickets::handle_connect(cli).await,
        Command::Buy(args) => command::tickets::handle_buy(cli, args).await,
        Command::Withdraw(args) => command::tickets::handle_withdraw(cli, args).await,
    }
}
