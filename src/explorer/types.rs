//! Raw explorer records and error definitions.
//!
//! Only the fields the service reasons about are typed. Inputs, data inputs and
//! outputs stay as JSON values so they can be echoed to wallets untouched.

use serde::Deserialize;
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur while talking to the explorer.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// Connection, timeout or body decoding failure.
    #[error("explorer request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The explorer answered with a non-success status other than 404.
    #[error("explorer returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The explorer answered 404 for the requested resource.
    #[error("not found: {0}")]
    NotFound(String),

    /// Pagination did not terminate within the configured page budget.
    #[error("pagination exceeded {max_pages} pages")]
    PaginationLimit { max_pages: usize },

    /// The configured base URL cannot carry path segments.
    #[error("invalid explorer url: {0}")]
    Url(String),
}

/// Result type for explorer operations.
pub type ExplorerResult<T> = Result<T, ExplorerError>;

/// One page of an offset-paginated listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

/// A confirmed transaction as listed under `addresses/{addr}/transactions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerTransaction {
    pub id: String,
    pub header_id: String,
    pub inclusion_height: i64,
    /// Ordinal of the transaction inside its block.
    pub index: u32,
    /// Block timestamp in milliseconds.
    pub timestamp: i64,
    #[serde(default)]
    pub inputs: Vec<Value>,
    #[serde(default)]
    pub data_inputs: Vec<Value>,
    #[serde(default)]
    pub outputs: Vec<Value>,
}

/// A mempool transaction as listed under `transactions/unconfirmed/byAddress/{addr}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnconfirmedTransaction {
    pub id: String,
    /// Arrival time in milliseconds.
    pub creation_timestamp: i64,
    #[serde(default)]
    pub inputs: Vec<Value>,
    #[serde(default)]
    pub data_inputs: Vec<Value>,
    #[serde(default)]
    pub outputs: Vec<Value>,
}

/// `blocks/{hash}` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockResponse {
    pub block: BlockBody,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockBody {
    pub header: BlockHeader,
    #[serde(default)]
    pub block_transactions: Vec<BlockTransaction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockHeader {
    #[serde(default)]
    pub id: String,
    pub height: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockTransaction {
    pub id: String,
}

/// Entry of the `blocks` listing, used for the chain tip.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockSummary {
    pub id: String,
    pub height: i64,
}

/// `addresses/{addr}` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressSummary {
    #[serde(default)]
    pub transactions: Option<AddressTransactionsSummary>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressTransactionsSummary {
    #[serde(default)]
    pub confirmed_balance: Option<Number>,
    /// Number or decimal string depending on explorer version.
    #[serde(default)]
    pub total_received: Option<Value>,
    #[serde(default)]
    pub confirmed_tokens_balance: Vec<TokenAmount>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAmount {
    pub token_id: String,
    pub amount: Number,
}

/// The box that minted a token, from `assets/{id}/issuingBox`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuingBox {
    pub id: String,
    pub creation_height: i64,
    #[serde(default)]
    pub additional_registers: BTreeMap<String, Value>,
}

impl IssuingBox {
    /// Serialized hex of a register, accepting both the bare-string and the
    /// `{ "serializedValue": .. }` explorer encodings.
    pub fn register(&self, name: &str) -> Option<&str> {
        match self.additional_registers.get(name)? {
            Value::String(hex) => Some(hex),
            Value::Object(fields) => fields.get("serializedValue")?.as_str(),
            _ => None,
        }
    }
}

impl AddressTransactionsSummary {
    /// An address is used once it has received anything at all.
    pub fn has_received(&self) -> bool {
        match &self.total_received {
            None | Some(Value::Null) => false,
            Some(Value::Number(n)) => n.to_string() != "0",
            Some(Value::String(s)) => s.trim() != "0" && !s.trim().is_empty(),
            Some(_) => true,
        }
    }
}
