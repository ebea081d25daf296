//   Copyright 2023 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! Ticket pricing policy and client-side quantity checks.
//!
//! The contract enforces payment and balance rules authoritatively; these
//! checks exist so obviously invalid requests never reach the wallet.

use alloy_primitives::U256;

/// Price per ticket when buying a single ticket, in whole ether.
pub const SINGLE_TICKET_PRICE_ETH: u64 = 3;
/// Discounted price per ticket when buying more than one, in whole ether.
pub const BULK_TICKET_PRICE_ETH: u64 = 2;

const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;

pub fn unit_price_eth(num_tickets: u64) -> u64 {
    if num_tickets > 1 {
        BULK_TICKET_PRICE_ETH
    } else {
        SINGLE_TICKET_PRICE_ETH
    }
}

/// Total payment to attach to a purchase of `num_tickets`, in wei.
pub fn total_cost_wei(num_tickets: u64) -> U256 {
    U256::from(num_tickets) * U256::from(unit_price_eth(num_tickets)) * U256::from(WEI_PER_ETHER)
}

pub fn validate_purchase(num_tickets: u64) -> Result<(), QuantityError> {
    if num_tickets == 0 {
        return Err(QuantityError::InvalidPurchaseQuantity);
    }
    Ok(())
}

pub fn validate_withdraw(num_tickets: u64, owned: u64) -> Result<(), QuantityError> {
    if num_tickets == 0 || num_tickets > owned {
        return Err(QuantityError::InvalidWithdrawQuantity {
            requested: num_tickets,
            owned,
        });
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum QuantityError {
    #[error("Please enter a valid number of tickets")]
    InvalidPurchaseQuantity,
    #[error("Please enter a valid number of tickets to withdraw (requested {requested}, owned {owned})")]
    InvalidWithdrawQuantity { requested: u64, owned: u64 },
}
