//! End-to-end attempts against a scripted node.

mod common;

use alloy::primitives::{TxKind, U256};
use common::{trade_config, MockConnector, NodeScript, DEV_ADDRESS, RECIPIENT};
use tx_toolbox::blockchain::ChainError;
use tx_toolbox::trade::{self, InputError, ScriptedOperator, TradeError, TradeOutcome};

fn one_ether() -> U256 {
    U256::from(1_000_000_000_000_000_000u128)
}

#[tokio::test]
async fn test_empty_network_fails_before_connecting() {
    let connector = MockConnector::default();
    let mut config = trade_config();
    config.network = String::new();

    let err = trade::run(&connector, &config, &mut ScriptedOperator::new([true, true]))
        .await
        .unwrap_err();

    assert!(matches!(err, TradeError::Config(InputError::EmptyNetwork)));
    assert_eq!(connector.connections(), 0);
}

#[tokio::test]
async fn test_malformed_nonce_fails_before_connecting() {
    let connector = MockConnector::default();
    let mut config = trade_config();
    config.nonce = "seven".to_string();

    let err = trade::run(&connector, &config, &mut ScriptedOperator::new([true, true]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TradeError::Config(InputError::InvalidNumber { field: "nonce", .. })
    ));
    assert_eq!(connector.connections(), 0);
}

#[tokio::test]
async fn test_short_recipient_stops_after_network() {
    let connector = MockConnector::default();
    let mut config = trade_config();
    config.to = RECIPIENT[..RECIPIENT.len() - 2].to_string();

    let err = trade::run(&connector, &config, &mut ScriptedOperator::new([true, true]))
        .await
        .unwrap_err();

    assert!(matches!(err, TradeError::Config(InputError::MalformedRecipient(_))));
    assert_eq!(connector.chain.calls(), ["chain_id"]);
}

#[tokio::test]
async fn test_fractional_amount_without_unit() {
    let connector = MockConnector::default();
    let mut config = trade_config();
    config.amount = "1.5".to_string();
    config.amount_unit = String::new();

    let err = trade::run(&connector, &config, &mut ScriptedOperator::new([true, true]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TradeError::Config(InputError::FractionalBaseAmount(ref a)) if a == "1.5"
    ));
    assert!(!connector.chain.calls().contains(&"pending_nonce"));
}

#[tokio::test]
async fn test_end_to_end_with_configured_nonce_and_gas_price() {
    let connector = MockConnector::new(NodeScript {
        chain_id: 1,
        estimate: 21_000,
        ..Default::default()
    });
    let mut config = trade_config();
    config.nonce = "3".to_string();
    config.gas_price = "20000000000".to_string();
    let mut operator = ScriptedOperator::new([true, true]);

    let outcome = trade::run(&connector, &config, &mut operator).await.unwrap();

    assert_eq!(
        connector.chain.calls(),
        ["chain_id", "estimate_gas", "send_transaction"]
    );
    let sent = connector.chain.sent();
    assert_eq!(sent.len(), 1);
    let (hash, tx) = &sent[0];
    assert_eq!(outcome, TradeOutcome::Sent(*hash));
    assert_eq!(tx.chain_id, Some(1));
    assert_eq!(tx.nonce, 3);
    assert_eq!(tx.gas_price, 20_000_000_000);
    assert_eq!(tx.gas_limit, 21_000);
    assert_eq!(tx.value, one_ether());
    assert_eq!(tx.to, TxKind::Call(RECIPIENT.parse().unwrap()));

    let log = connector.chain.log.lock().unwrap();
    let call = &log.estimates[0];
    assert_eq!(call.from.to_string().to_lowercase(), DEV_ADDRESS);
    assert_eq!(call.value, one_ether());
    assert_eq!(call.gas_price, 20_000_000_000);
    drop(log);

    assert_eq!(operator.prompts.len(), 2);
    assert!(operator
        .shown
        .iter()
        .any(|line| line.contains(&format!("Tx hash configuration successful: {}", hash))));
}

#[tokio::test]
async fn test_end_to_end_with_node_supplied_nonce_and_gas_price() {
    let connector = MockConnector::new(NodeScript {
        chain_id: 1,
        pending_nonce: 3,
        gas_price: 20_000_000_000,
        estimate: 21_000,
        ..Default::default()
    });
    let mut config = trade_config();
    config.amount = "0".to_string();
    config.amount_unit = String::new();
    config.data = String::new();

    let outcome = trade::run(&connector, &config, &mut ScriptedOperator::new([true, true]))
        .await
        .unwrap();

    assert_eq!(
        connector.chain.calls(),
        [
            "chain_id",
            "pending_nonce",
            "suggest_gas_price",
            "estimate_gas",
            "send_transaction"
        ]
    );
    let sent = connector.chain.sent();
    let (hash, tx) = &sent[0];
    assert_eq!(outcome, TradeOutcome::Sent(*hash));
    assert_eq!(tx.chain_id, Some(1));
    assert_eq!(tx.nonce, 3);
    assert_eq!(tx.gas_price, 20_000_000_000);
    assert_eq!(tx.gas_limit, 21_000);
    assert_eq!(tx.value, U256::ZERO);
    assert!(tx.input.is_empty());
}

#[tokio::test]
async fn test_zero_nonce_resolves_from_pending() {
    let connector = MockConnector::new(NodeScript {
        pending_nonce: 7,
        ..Default::default()
    });
    let mut config = trade_config();
    config.nonce = "0".to_string();

    trade::run(&connector, &config, &mut ScriptedOperator::new([true, true]))
        .await
        .unwrap();

    assert!(connector.chain.calls().contains(&"pending_nonce"));
    assert!(connector.chain.calls().contains(&"suggest_gas_price"));
    assert_eq!(connector.chain.sent()[0].1.nonce, 7);
}

#[tokio::test]
async fn test_decline_at_start_signs_nothing() {
    let connector = MockConnector::default();
    let mut operator = ScriptedOperator::new([false]);

    let outcome = trade::run(&connector, &trade_config(), &mut operator).await.unwrap();

    assert_eq!(outcome, TradeOutcome::Declined);
    assert_eq!(operator.prompts.len(), 1);
    assert!(!operator.shown.iter().any(|line| line.contains("Tx hash")));
    assert!(connector.chain.sent().is_empty());
}

#[tokio::test]
async fn test_decline_at_send_withholds_signed_tx() {
    let connector = MockConnector::default();
    let mut operator = ScriptedOperator::new([true, false]);

    let outcome = trade::run(&connector, &trade_config(), &mut operator).await.unwrap();

    assert!(matches!(outcome, TradeOutcome::Withheld(_)));
    assert!(!connector.chain.calls().contains(&"send_transaction"));
}

#[tokio::test]
async fn test_no_answers_never_broadcasts() {
    let connector = MockConnector::default();

    let outcome = trade::run(&connector, &trade_config(), &mut ScriptedOperator::new(Vec::new()))
        .await
        .unwrap();

    assert_eq!(outcome, TradeOutcome::Declined);
    assert!(connector.chain.sent().is_empty());
}

#[tokio::test]
async fn test_send_error_keeps_node_text() {
    let connector = MockConnector::new(NodeScript::failing("send_transaction", "nonce too low"));

    let err = trade::run(&connector, &trade_config(), &mut ScriptedOperator::new([true, true]))
        .await
        .unwrap_err();

    match &err {
        TradeError::Network(ChainError::Rpc { message, .. }) => assert_eq!(message, "nonce too low"),
        other => panic!("expected a network error, got {:?}", other),
    }
    assert!(err.to_string().contains("nonce too low"));
}

/// Runs a default attempt against a node whose `call` fails, and checks the
/// attempt ends there with the node's text and nothing broadcast.
async fn assert_node_failure_ends_attempt(call: &'static str) {
    let connector = MockConnector::new(NodeScript::failing(call, "upstream unavailable"));

    let err = trade::run(&connector, &trade_config(), &mut ScriptedOperator::new([true, true]))
        .await
        .unwrap_err();

    match &err {
        TradeError::Network(ChainError::Rpc { op, message }) => {
            assert_eq!(*op, call);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("expected a network error from {call}, got {:?}", other),
    }
    assert_eq!(connector.chain.calls().last(), Some(&call));
    assert!(connector.chain.sent().is_empty());
}

#[tokio::test]
async fn test_chain_id_failure_ends_attempt() {
    assert_node_failure_ends_attempt("chain_id").await;
}

#[tokio::test]
async fn test_pending_nonce_failure_ends_attempt() {
    assert_node_failure_ends_attempt("pending_nonce").await;
}

#[tokio::test]
async fn test_gas_price_failure_ends_attempt() {
    assert_node_failure_ends_attempt("suggest_gas_price").await;
}

#[tokio::test]
async fn test_estimate_failure_ends_attempt() {
    assert_node_failure_ends_attempt("estimate_gas").await;
}
