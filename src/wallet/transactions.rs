//! Transaction lookups and submission.

use futures_util::future::try_join_all;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{ApiError, ApiResult};
use crate::explorer::{ExplorerClient, ExplorerError};

/// Inputs, data inputs and outputs of one transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxBoxes {
    pub inputs: Vec<Value>,
    pub data_inputs: Vec<Value>,
    pub outputs: Vec<Value>,
}

impl From<&Value> for TxBoxes {
    fn from(body: &Value) -> Self {
        let list = |field: &str| match body.get(field) {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        };
        Self {
            inputs: list("inputs"),
            data_inputs: list("dataInputs"),
            outputs: list("outputs"),
        }
    }
}

/// Raw explorer bodies keyed by transaction hash.
pub async fn tx_bodies(
    client: &ExplorerClient,
    tx_hashes: &[String],
) -> ApiResult<BTreeMap<String, Value>> {
    let bodies = try_join_all(tx_hashes.iter().map(|hash| client.fetch_transaction(hash))).await?;
    Ok(tx_hashes.iter().cloned().zip(bodies).collect())
}

/// Boxes of each transaction keyed by hash.
pub async fn tx_boxes(
    client: &ExplorerClient,
    tx_hashes: &[String],
) -> ApiResult<BTreeMap<String, TxBoxes>> {
    let bodies = tx_bodies(client, tx_hashes).await?;
    Ok(bodies
        .iter()
        .map(|(hash, body)| (hash.clone(), TxBoxes::from(body)))
        .collect())
}

/// Forward a signed transaction. Explorer 4xx answers mean the transaction
/// itself was refused and are reported as such.
pub async fn send_transaction(client: &ExplorerClient, signed_tx: &Value) -> ApiResult<Value> {
    let reply = client.send_transaction(signed_tx).await.map_err(|e| match e {
        ExplorerError::Status { status, body } if (400..500).contains(&status) => {
            ApiError::UpstreamRejected { status, body }
        }
        other => ApiError::UpstreamUnavailable(other.to_string()),
    })?;

    tracing::info!(reply = %reply, "Transaction submitted");
    Ok(reply)
}
