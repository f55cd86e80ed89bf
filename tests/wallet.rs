//! End-to-end wallet translators against a fake explorer.

mod common;

use alloy::primitives::hex;
use common::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn coll(text: &str) -> String {
    let mut bytes = vec![0x0e, text.len() as u8];
    bytes.extend_from_slice(text.as_bytes());
    hex::encode(bytes)
}

#[tokio::test]
async fn test_utxo_for_addresses() {
    let explorer = MockServer::start().await;
    let mut tx = confirmed_tx("t1", "b1", 10, 0, 10);
    tx["outputs"] = json!([
        {"id": "box-a", "index": 0, "address": "A", "value": 1000, "spentTransactionId": null, "mainChain": true},
        {"id": "box-b", "index": 1, "address": "A", "value": 5, "spentTransactionId": "t2", "mainChain": true},
        {"id": "box-c", "index": 2, "address": "B", "value": 7, "spentTransactionId": null, "mainChain": true},
    ]);
    mount_address_transactions(&explorer, "A", vec![tx]).await;
    let service = spawn_service(&explorer).await;

    let (status, body) = service
        .post("/api/txs/utxoForAddresses", json!({ "addresses": ["A"] }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!([{
            "tx_hash": "box-a",
            "tx_index": 0,
            "utxo_id": "box-a0",
            "receiver": "A",
            "amount": "1000",
        }])
    );
}

#[tokio::test]
async fn test_utxo_for_no_addresses_is_empty() {
    let explorer = MockServer::start().await;
    let service = spawn_service(&explorer).await;

    let (status, body) = service
        .post("/api/txs/utxoForAddresses", json!({ "addresses": [] }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));
    assert!(explorer.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_utxo_sum_of_zero_balances() {
    let explorer = MockServer::start().await;
    for address in ["A", "B"] {
        mount_address_summary(
            &explorer,
            address,
            json!({"summary": {"id": address}, "transactions": {"confirmedBalance": 0, "totalReceived": 0}}),
        )
        .await;
    }
    let service = spawn_service(&explorer).await;

    let (status, body) = service
        .post("/api/txs/utxoSumForAddresses", json!({ "addresses": ["A", "B"] }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["sum"], "0");
    assert_eq!(body["tokensBalance"], json!([]));
}

#[tokio::test]
async fn test_utxo_sum_with_tokens() {
    let explorer = MockServer::start().await;
    mount_address_summary(
        &explorer,
        "A",
        json!({"transactions": {
            "confirmedBalance": 9007199254740993u64,
            "confirmedTokensBalance": [{"tokenId": "t1", "amount": 3}],
        }}),
    )
    .await;
    mount_address_summary(
        &explorer,
        "B",
        json!({"transactions": {
            "confirmedBalance": 9007199254740993u64,
            "confirmedTokensBalance": [{"tokenId": "t1", "amount": 4}, {"tokenId": "t0", "amount": 1}],
        }}),
    )
    .await;
    let service = spawn_service(&explorer).await;

    // Duplicate addresses are counted once.
    let (status, body) = service
        .post(
            "/api/txs/utxoSumForAddresses",
            json!({ "addresses": ["A", "B", "A"] }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["sum"], "18014398509481986");
    assert_eq!(
        body["tokensBalance"],
        json!([{"tokenId": "t0", "amount": "1"}, {"tokenId": "t1", "amount": "7"}])
    );
}

#[tokio::test]
async fn test_filter_used() {
    let explorer = MockServer::start().await;
    mount_address_summary(&explorer, "used", json!({"transactions": {"totalReceived": 12}})).await;
    mount_address_summary(&explorer, "fresh", json!({"transactions": {"totalReceived": 0}})).await;
    mount_address_summary(&explorer, "blank", json!({})).await;
    let service = spawn_service(&explorer).await;

    let (status, body) = service
        .post(
            "/api/v2/addresses/filterUsed",
            json!({ "addresses": ["fresh", "used", "blank"] }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!(["used"]));
}

#[tokio::test]
async fn test_address_cap_applies_to_translators() {
    let explorer = MockServer::start().await;
    let service = spawn_service(&explorer).await;

    let addresses: Vec<String> = (0..51).map(|i| format!("addr{i}")).collect();
    let (status, body) = service
        .post("/api/v2/addresses/filterUsed", json!({ "addresses": addresses }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "ValidationError");
}

#[tokio::test]
async fn test_tx_bodies_and_boxes() {
    let explorer = MockServer::start().await;
    let raw = json!({
        "id": "t1",
        "inputs": [{"boxId": "in"}],
        "dataInputs": [],
        "outputs": [{"boxId": "out", "value": 12345678901234567890u64}],
        "size": 200,
    });
    Mock::given(method("GET"))
        .and(path("/api/v0/transactions/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(raw.clone()))
        .mount(&explorer)
        .await;
    let service = spawn_service(&explorer).await;

    let (status, body) = service
        .post("/api/txs/txBodies", json!({ "txHashes": ["t1"] }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "t1": raw }));

    let (status, body) = service
        .post("/api/v2/txs/boxes", json!({ "txHashes": ["t1"] }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["t1"]["inputs"], json!([{"boxId": "in"}]));
    assert_eq!(body["t1"]["dataInputs"], json!([]));
    assert_eq!(body["t1"]["outputs"][0]["value"], json!(12345678901234567890u64));

    let (status, body) = service
        .post("/api/txs/txBodies", json!({ "txHashes": [] }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_unknown_tx_is_not_found() {
    let explorer = MockServer::start().await;
    let service = spawn_service(&explorer).await;

    let (status, body) = service
        .post("/api/txs/txBodies", json!({ "txHashes": ["missing"] }))
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "NotFound");
}

#[tokio::test]
async fn test_asset_info() {
    let explorer = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/assets/tok/issuingBox"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "issuer",
            "creationHeight": 300,
            "additionalRegisters": {
                "R4": coll("Token"),
                "R5": coll("Test token"),
                "R6": coll("2"),
            },
        }])))
        .mount(&explorer)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v0/assets/bare/issuingBox"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "bare-box",
            "creationHeight": 12,
            "additionalRegisters": {},
        }])))
        .mount(&explorer)
        .await;
    let service = spawn_service(&explorer).await;

    let (status, body) = service
        .post("/api/assets/info", json!({ "assetIds": ["tok", "bare"] }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "tok": {"name": "Token", "desc": "Test token", "numDecimals": 2, "height": 300, "boxId": "issuer"},
            "bare": {"name": null, "desc": null, "numDecimals": null, "height": 12, "boxId": "bare-box"},
        })
    );
}

#[tokio::test]
async fn test_unknown_asset_is_not_found() {
    let explorer = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/assets/none/issuingBox"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&explorer)
        .await;
    let service = spawn_service(&explorer).await;

    let (status, body) = service
        .post("/api/assets/info", json!({ "assetIds": ["none"] }))
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "NotFound");
}

#[tokio::test]
async fn test_best_block() {
    let explorer = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/blocks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "tip", "height": 333880, "timestamp": 1602037199968u64}],
            "total": 1,
        })))
        .mount(&explorer)
        .await;
    let service = spawn_service(&explorer).await;

    let (status, body) = service.get("/api/v2/bestblock").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"epoch": 0, "slot": 0, "hash": "tip", "height": 333880}));
}

#[tokio::test]
async fn test_status() {
    let explorer = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "1"})))
        .mount(&explorer)
        .await;
    let service = spawn_service(&explorer).await;

    let (status, body) = service.get("/api/status").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"isServerOk": true}));

    explorer.reset().await;
    mount_status(&explorer, "/api/v0/info", 500).await;
    let (status, body) = service.get("/api/status").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"isServerOk": false}));
}

#[tokio::test]
async fn test_send_transaction() {
    let explorer = MockServer::start().await;
    let signed = json!({"id": "t9", "inputs": [], "dataInputs": [], "outputs": []});
    Mock::given(method("POST"))
        .and(path("/api/v0/transactions/send"))
        .and(body_json(signed.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "t9"})))
        .expect(1)
        .mount(&explorer)
        .await;
    let service = spawn_service(&explorer).await;

    let (status, body) = service
        .post("/api/txs/signed", json!({ "signedTx": signed }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"id": "t9"}));
}

#[tokio::test]
async fn test_rejected_transaction() {
    let explorer = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v0/transactions/send"))
        .respond_with(ResponseTemplate::new(400).set_body_string("double spend"))
        .mount(&explorer)
        .await;
    let service = spawn_service(&explorer).await;

    let (status, body) = service
        .post("/api/txs/signed", json!({ "signedTx": {"id": "bad"} }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "UpstreamRejected");
    assert!(body["message"].as_str().unwrap().contains("double spend"));

    let (status, _) = service.post("/api/txs/signed", json!({})).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_send_with_explorer_down() {
    let explorer = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v0/transactions/send"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&explorer)
        .await;
    let service = spawn_service(&explorer).await;

    let (status, body) = service
        .post("/api/txs/signed", json!({ "signedTx": {"id": "t"} }))
        .await;
    assert_eq!(status, 502);
    assert_eq!(body["error"], "UpstreamUnavailable");
}
