//   Copyright 2023 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! Call encoding for the ticket office contract interface.
//!
//! The interface is fixed at build time, so the codec is hand-rolled from
//! the canonical signatures: a call is the first 4 bytes of the keccak-256
//! hash of the signature, followed by one 32-byte big-endian word per
//! `uint256` argument.

use alloy_primitives::{keccak256, U256};

pub const GET_ETH_SPENT_SIGNATURE: &str = "getETHSpent()";
pub const GET_MY_TICKETS_SIGNATURE: &str = "getMyTickets()";
pub const PURCHASE_TICKETS_SIGNATURE: &str = "purchaseTickets(uint256)";
pub const WITHDRAW_SIGNATURE: &str = "withdraw(uint256)";

pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

pub fn get_eth_spent() -> Vec<u8> {
    selector(GET_ETH_SPENT_SIGNATURE).to_vec()
}

pub fn get_my_tickets() -> Vec<u8> {
    selector(GET_MY_TICKETS_SIGNATURE).to_vec()
}

pub fn purchase_tickets(num_tickets: u64) -> Vec<u8> {
    encode_uint_call(PURCHASE_TICKETS_SIGNATURE, U256::from(num_tickets))
}

pub fn withdraw(num_tickets: u64) -> Vec<u8> {
    encode_uint_call(WITHDRAW_SIGNATURE, U256::from(num_tickets))
}

fn encode_uint_call(signature: &str, arg: U256) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + 32);
    data.extend_from_slice(&selector(signature));
    data.extend_from_slice(&arg.to_be_bytes::<32>());
    data
}

/// Decodes a single `uint256` return value.
pub fn decode_uint256(data: &[u8]) -> Result<U256, AbiError> {
    if data.len() != 32 {
        return Err(AbiError::UnexpectedReturnDataLength {
            expected: 32,
            actual: data.len(),
        });
    }
    Ok(U256::from_be_slice(data))
}

#[derive(Debug, thiserror::Error)]
pub enum AbiError {
    #[error("Expected {expected} bytes of return data, got {actual}")]
    UnexpectedReturnDataLength { expected: usize, actual: usize },
    #[error("uint256 value does not fit in the expected integer range")]
    ValueOutOfRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_match_the_canonical_signatures() {
        assert_eq!(selector(GET_ETH_SPENT_SIGNATURE), [0x1a, 0x89, 0x6d, 0x99]);
        assert_eq!(selector(GET_MY_TICKETS_SIGNATURE), [0xe1, 0xd1, 0x0d, 0x85]);
        assert_eq!(selector(PURCHASE_TICKETS_SIGNATURE), [0xa1, 0x27, 0x76, 0x00]);
        assert_eq!(selector(WITHDRAW_SIGNATURE), [0x2e, 0x1a, 0x7d, 0x4d]);
    }

    #[test]
    fn purchase_call_carries_the_count_as_one_word() {
        let data = purchase_tickets(5);
        assert_eq!(data.len(), 36);
        assert_eq!(&data[..4], &[0xa1, 0x27, 0x76, 0x00]);
        assert_eq!(&data[4..35], &[0u8; 31]);
        assert_eq!(data[35], 5);
    }

    #[test]
    fn read_calls_are_a_bare_selector() {
        assert_eq!(get_eth_spent(), vec![0x1a, 0x89, 0x6d, 0x99]);
        assert_eq!(get_my_tickets(), vec![0xe1, 0xd1, 0x0d, 0x85]);
    }

    #[test]
    fn decode_uint256_reads_a_big_endian_word() {
        let mut word = [0u8; 32];
        word[30] = 0x30;
        word[31] = 0x39;
        assert_eq!(decode_uint256(&word).unwrap(), U256::from(12345u64));
    }

    #[test]
    fn decode_uint256_rejects_short_and_long_data() {
        assert!(matches!(
            decode_uint256(&[0u8; 31]),
            Err(AbiError::UnexpectedReturnDataLength { actual: 31, .. })
        ));
        assert!(matches!(
            decode_uint256(&[0u8; 64]),
            Err(AbiError::UnexpectedReturnDataLength { actual: 64, .. })
        ));
    }
}
