//! Shared utilities for integration testing.
//!
//! The explorer is a `wiremock` server; the service runs for real on an
//! ephemeral port and is driven over HTTP with `reqwest`.

#![allow(dead_code)]

use ergo_wallet_bff::config::{BffConfig, ExplorerConfig, LimitsConfig};
use ergo_wallet_bff::{HttpServer, Shutdown};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A running service instance. Stops when dropped.
pub struct TestService {
    pub url: String,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestService {
    pub async fn post(&self, route: &str, body: Value) -> (u16, Value) {
        let res = self
            .client
            .post(format!("{}{}", self.url, route))
            .json(&body)
            .send()
            .await
            .unwrap();
        Self::decode(res).await
    }

    pub async fn get(&self, route: &str) -> (u16, Value) {
        let res = self
            .client
            .get(format!("{}{}", self.url, route))
            .send()
            .await
            .unwrap();
        Self::decode(res).await
    }

    async fn decode(res: reqwest::Response) -> (u16, Value) {
        let status = res.status().as_u16();
        let body = res.json::<Value>().await.unwrap_or(Value::Null);
        (status, body)
    }
}

impl Drop for TestService {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the service against `explorer` with default limits.
pub async fn spawn_service(explorer: &MockServer) -> TestService {
    spawn_service_with(explorer, LimitsConfig::default()).await
}

/// Start the service against `explorer` with the given limits.
pub async fn spawn_service_with(explorer: &MockServer, limits: LimitsConfig) -> TestService {
    let config = BffConfig {
        explorer: ExplorerConfig {
            base_url: explorer.uri(),
            timeout_secs: 5,
            page_size: 100,
            max_pages: 10,
        },
        limits,
        ..BffConfig::default()
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let receiver = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });

    TestService {
        url: format!("http://{addr}"),
        client: reqwest::Client::new(),
        shutdown,
    }
}

/// A confirmed transaction as the explorer lists it.
pub fn confirmed_tx(id: &str, block: &str, height: i64, index: u32, timestamp: i64) -> Value {
    json!({
        "id": id,
        "headerId": block,
        "inclusionHeight": height,
        "index": index,
        "timestamp": timestamp,
        "confirmationsCount": 1,
        "inputs": [],
        "dataInputs": [],
        "outputs": [],
    })
}

/// A mempool transaction as the explorer lists it.
pub fn pending_tx(id: &str, timestamp: i64) -> Value {
    json!({
        "id": id,
        "creationTimestamp": timestamp,
        "inputs": [],
        "dataInputs": [],
        "outputs": [],
        "size": 0,
    })
}

fn page(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({ "items": items, "total": total })
}

pub async fn mount_address_transactions(server: &MockServer, address: &str, txs: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v0/addresses/{address}/transactions")))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(txs)))
        .mount(server)
        .await;
}

pub async fn mount_unconfirmed(server: &MockServer, address: &str, txs: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/api/v0/transactions/unconfirmed/byAddress/{address}"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(txs)))
        .mount(server)
        .await;
}

pub async fn mount_block(server: &MockServer, hash: &str, height: i64, tx_ids: &[&str]) {
    let txs: Vec<Value> = tx_ids.iter().map(|id| json!({ "id": id })).collect();
    Mock::given(method("GET"))
        .and(path(format!("/api/v0/blocks/{hash}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "block": {
                "header": { "id": hash, "height": height },
                "blockTransactions": txs,
            }
        })))
        .mount(server)
        .await;
}

pub async fn mount_address_summary(server: &MockServer, address: &str, summary: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v0/addresses/{address}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary))
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route.to_string()))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
