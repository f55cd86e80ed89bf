//! History request, response and error types.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::explorer::types::{ExplorerTransaction, UnconfirmedTransaction};
use crate::explorer::ExplorerError;

/// Lower bound used when no `after` reference is given: everything from genesis.
pub const GENESIS_HEIGHT: i64 = -1;

/// Errors that can occur while assembling history.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The request body is structurally valid JSON but semantically unusable.
    #[error("{0}")]
    Validation(String),

    /// A reference block hash does not resolve.
    #[error("reference block {0} not found")]
    ReferenceBlockMismatch(String),

    /// A reference transaction is missing from its block or from the address history.
    #[error("reference transaction {tx} not found {location}")]
    ReferenceTxNotFound { tx: String, location: String },

    /// Any other explorer failure.
    #[error(transparent)]
    Upstream(#[from] ExplorerError),
}

/// Resolved height bounds of a history query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightWindow {
    /// Height of the `after` block, or [`GENESIS_HEIGHT`].
    pub after: i64,
    /// Height of the `untilBlock`, inclusive.
    pub until: i64,
}

impl HeightWindow {
    /// Whether a confirmed height falls inside the window.
    ///
    /// With a reference transaction the `after` block itself stays in, so
    /// transactions sharing its block can be cut by ordinal instead.
    pub fn contains(&self, height: i64, has_reference_tx: bool) -> bool {
        let above_lower = if has_reference_tx {
            height >= self.after
        } else {
            height > self.after
        };
        above_lower && height <= self.until
    }
}

/// Cursor of a previous history page: the last transaction the wallet has seen.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReferencePoint {
    /// Block hash.
    pub block: String,
    /// Transaction hash inside `block`.
    pub tx: String,
}

/// Inbound `/api/v2/txs/history` body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRequest {
    pub addresses: Vec<String>,
    #[serde(default)]
    pub after: Option<ReferencePoint>,
    pub until_block: String,
    #[serde(default)]
    pub limit: Option<usize>,
    /// Drop inputs, data inputs and outputs from every entry.
    #[serde(default)]
    pub concise: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TxState {
    Successful,
    Pending,
}

/// One entry of a history response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub block_hash: Option<String>,
    pub block_num: Option<i64>,
    pub tx_ordinal: Option<u32>,
    pub epoch: Option<u32>,
    pub slot: Option<u32>,
    pub hash: String,
    pub time: String,
    pub tx_state: TxState,
    pub inputs: Option<Vec<Value>>,
    #[serde(rename = "dataInputs")]
    pub data_inputs: Option<Vec<Value>>,
    pub outputs: Option<Vec<Value>>,
}

impl HistoryEntry {
    pub fn confirmed(tx: ExplorerTransaction, concise: bool) -> Self {
        let (inputs, data_inputs, outputs) = io_fields(tx.inputs, tx.data_inputs, tx.outputs, concise);
        Self {
            block_hash: Some(tx.header_id),
            block_num: Some(tx.inclusion_height),
            tx_ordinal: Some(tx.index),
            // Ergo has no epochs or slots; wallets expect the fields anyway.
            epoch: Some(0),
            slot: Some(0),
            hash: tx.id,
            time: iso_time(tx.timestamp),
            tx_state: TxState::Successful,
            inputs,
            data_inputs,
            outputs,
        }
    }

    pub fn pending(tx: UnconfirmedTransaction, concise: bool) -> Self {
        let (inputs, data_inputs, outputs) = io_fields(tx.inputs, tx.data_inputs, tx.outputs, concise);
        Self {
            block_hash: None,
            block_num: None,
            tx_ordinal: None,
            epoch: None,
            slot: None,
            hash: tx.id,
            time: iso_time(tx.creation_timestamp),
            tx_state: TxState::Pending,
            inputs,
            data_inputs,
            outputs,
        }
    }
}

type IoFields = (Option<Vec<Value>>, Option<Vec<Value>>, Option<Vec<Value>>);

fn io_fields(inputs: Vec<Value>, data_inputs: Vec<Value>, outputs: Vec<Value>, concise: bool) -> IoFields {
    if concise {
        return (None, None, None);
    }
    (
        Some(sort_by_index(inputs)),
        Some(sort_by_index(data_inputs)),
        Some(sort_by_index(outputs)),
    )
}

/// Order boxes by their `index` field. Stable, so boxes without one keep their place.
fn sort_by_index(mut boxes: Vec<Value>) -> Vec<Value> {
    boxes.sort_by_key(|b| b.get("index").and_then(Value::as_u64));
    boxes
}

/// Milliseconds since the epoch as ISO-8601 with millisecond precision.
///
/// Timestamps chrono cannot represent render as the epoch and are logged.
pub fn iso_time(millis: i64) -> String {
    let time = DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_else(|| {
        tracing::warn!(millis, "Explorer timestamp out of range");
        DateTime::<Utc>::UNIX_EPOCH
    });
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}
