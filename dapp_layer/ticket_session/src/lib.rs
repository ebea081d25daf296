//   Copyright 2023 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

pub mod abi;
pub mod error;
pub mod pricing;

mod session;
pub use session::{TicketBalances, TicketSession, DEFAULT_RECEIPT_POLL_INTERVAL};
