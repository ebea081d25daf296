//   Copyright 2023 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::time::Duration;

use alloy_primitives::{address, Address, U256};
use httpmock::prelude::*;
use serde_json::json;
use ticket_office_provider_client::WalletProviderClient;
use ticket_office_session::{error::SessionError, TicketBalances, TicketSession};

const CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
const ACCOUNT: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
const TX_HASH: &str = "0x2c6a8ab5dcbbcd6ffefb4a37a4a65d1e8e0a7b7b73d23cbb3f4e0f0ce7a1d9aa";

// getETHSpent() -> 5 ETH in wei, getMyTickets() -> 7
const ETH_SPENT_WORD: &str = "0x0000000000000000000000000000000000000000000000004563918244f40000";
const TICKETS_WORD: &str = "0x0000000000000000000000000000000000000000000000000000000000000007";

const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;

fn session_for(server: &MockServer) -> TicketSession {
    let provider = WalletProviderClient::connect(server.url("/")).unwrap();
    TicketSession::bind(provider, CONTRACT_ADDRESS, ACCOUNT)
        .unwrap()
        .with_receipt_poll_interval(Duration::from_millis(10))
}

async fn mount_read_mocks<'a>(server: &'a MockServer) -> (httpmock::Mock<'a>, httpmock::Mock<'a>) {
    let spent = server
        .mock_async(|when, then| {
            when.method(POST).body_contains("1a896d99");
            then.status(200)
                .json_body(json!({"jsonrpc": "2.0", "id": 1, "result": ETH_SPENT_WORD}));
        })
        .await;
    let tickets = server
        .mock_async(|when, then| {
            when.method(POST).body_contains("e1d10d85");
            then.status(200)
                .json_body(json!({"jsonrpc": "2.0", "id": 1, "result": TICKETS_WORD}));
        })
        .await;
    (spent, tickets)
}

async fn mount_receipt_mock<'a>(server: &'a MockServer, status: &str) -> httpmock::Mock<'a> {
    let receipt = json!({
        "transactionHash": TX_HASH,
        "blockNumber": "0x1",
        "status": status,
    });
    server
        .mock_async(move |when, then| {
            when.method(POST)
                .json_body_partial(r#"{"method":"eth_getTransactionReceipt"}"#);
            then.status(200)
                .json_body(json!({"jsonrpc": "2.0", "id": 1, "result": receipt}));
        })
        .await
}

fn known_balances() -> TicketBalances {
    TicketBalances {
        eth_spent_wei: U256::from(5u64) * U256::from(WEI_PER_ETHER),
        tickets: 7,
    }
}

#[test]
fn bind_rejects_a_malformed_contract_address() {
    let provider = WalletProviderClient::connect("http://127.0.0.1:8545").unwrap();
    let err = TicketSession::bind(provider, "not-an-address", ACCOUNT).unwrap_err();
    assert!(matches!(err, SessionError::Binding { .. }));
}

#[tokio::test]
async fn refresh_populates_the_cached_balances() {
    let server = MockServer::start_async().await;
    let (spent, tickets) = mount_read_mocks(&server).await;

    let mut session = session_for(&server);
    assert_eq!(*session.balances(), TicketBalances::default());

    session.refresh().await.unwrap();
    assert_eq!(*session.balances(), known_balances());
    spent.assert_async().await;
    tickets.assert_async().await;
}

#[tokio::test]
async fn a_failed_refresh_before_any_success_keeps_the_zero_state() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).body_contains("eth_call");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {"code": -32000, "message": "execution reverted"},
            }));
        })
        .await;

    let mut session = session_for(&server);
    let err = session.refresh().await.unwrap_err();
    assert!(matches!(err, SessionError::Read { .. }));
    assert_eq!(*session.balances(), TicketBalances::default());
}

#[tokio::test]
async fn a_failed_refresh_leaves_the_previous_balances_unchanged() {
    let server = MockServer::start_async().await;
    let (spent, tickets) = mount_read_mocks(&server).await;

    let mut session = session_for(&server);
    session.refresh().await.unwrap();

    spent.delete_async().await;
    tickets.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).body_contains("eth_call");
            then.status(500);
        })
        .await;

    session.refresh().await.unwrap_err();
    assert_eq!(*session.balances(), known_balances());
}

#[tokio::test]
async fn purchase_attaches_the_computed_payment_and_refreshes_once() {
    let server = MockServer::start_async().await;
    let (spent, tickets) = mount_read_mocks(&server).await;
    // 5 tickets at the bulk price is 10 ETH
    let send = server
        .mock_async(|when, then| {
            when.method(POST)
                .body_contains("eth_sendTransaction")
                .body_contains("0xa12776000000000000000000000000000000000000000000000000000000000000000005")
                .body_contains("0x8ac7230489e80000");
            then.status(200)
                .json_body(json!({"jsonrpc": "2.0", "id": 1, "result": TX_HASH}));
        })
        .await;
    mount_receipt_mock(&server, "0x1").await;

    let mut session = session_for(&server);
    session.purchase_tickets(5).await.unwrap();

    send.assert_async().await;
    spent.assert_hits_async(1).await;
    tickets.assert_hits_async(1).await;
    assert_eq!(*session.balances(), known_balances());
}

#[tokio::test]
async fn a_rejected_signature_prompt_freezes_the_display_state() {
    let server = MockServer::start_async().await;
    let (spent, tickets) = mount_read_mocks(&server).await;
    server
        .mock_async(|when, then| {
            when.method(POST).body_contains("eth_sendTransaction");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {"code": 4001, "message": "User rejected the request."},
            }));
        })
        .await;

    let mut session = session_for(&server);
    session.refresh().await.unwrap();

    let err = session.purchase_tickets(2).await.unwrap_err();
    assert!(err.is_user_rejected(), "unexpected error: {}", err);
    assert_eq!(*session.balances(), known_balances());
    // No post-write refresh for a failed write
    spent.assert_hits_async(1).await;
    tickets.assert_hits_async(1).await;
}

#[tokio::test]
async fn a_reverted_transaction_freezes_the_display_state() {
    let server = MockServer::start_async().await;
    let (spent, tickets) = mount_read_mocks(&server).await;
    server
        .mock_async(|when, then| {
            when.method(POST).body_contains("eth_sendTransaction");
            then.status(200)
                .json_body(json!({"jsonrpc": "2.0", "id": 1, "result": TX_HASH}));
        })
        .await;
    mount_receipt_mock(&server, "0x0").await;

    let mut session = session_for(&server);
    session.refresh().await.unwrap();

    let err = session.withdraw_tickets(3).await.unwrap_err();
    assert!(matches!(err, SessionError::Reverted { .. }));
    assert_eq!(*session.balances(), known_balances());
    spent.assert_hits_async(1).await;
    tickets.assert_hits_async(1).await;
}

#[tokio::test]
async fn a_confirmed_write_with_a_failed_refresh_keeps_stale_values() {
    let server = MockServer::start_async().await;
    let (spent, tickets) = mount_read_mocks(&server).await;

    let mut session = session_for(&server);
    session.refresh().await.unwrap();

    spent.delete_async().await;
    tickets.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).body_contains("eth_call");
            then.status(500);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .body_contains("eth_sendTransaction")
                .body_contains("0x2e1a7d4d0000000000000000000000000000000000000000000000000000000000000003");
            then.status(200)
                .json_body(json!({"jsonrpc": "2.0", "id": 1, "result": TX_HASH}));
        })
        .await;
    mount_receipt_mock(&server, "0x1").await;

    // The withdrawal is durable on-chain even though the follow-up read
    // failed, so the call succeeds and the cache stays on its last values.
    session.withdraw_tickets(3).await.unwrap();
    assert_eq!(*session.balances(), known_balances());
}

#[tokio::test]
async fn waiting_for_a_receipt_times_out_when_configured() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).body_contains("eth_sendTransaction");
            then.status(200)
                .json_body(json!({"jsonrpc": "2.0", "id": 1, "result": TX_HASH}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .json_body_partial(r#"{"method":"eth_getTransactionReceipt"}"#);
            then.status(200)
                .json_body(json!({"jsonrpc": "2.0", "id": 1, "result": null}));
        })
        .await;

    let mut session = session_for(&server).with_wait_timeout(Some(Duration::from_millis(30)));
    let err = session.purchase_tickets(1).await.unwrap_err();
    assert!(matches!(err, SessionError::WaitTimedOut { .. }));
}
