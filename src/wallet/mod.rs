//! Thin wallet translators.
//!
//! # Data Flow
//! ```text
//! Handler (validated list)
//!     → one explorer call per item, issued concurrently
//!     → reshape into the wallet contract
//! ```
//!
//! Every fan-out is fail-fast: one failing item aborts the whole batch.

pub mod addresses;
pub mod assets;
pub mod balance;
pub mod chain;
pub mod transactions;
pub mod utxo;

use std::collections::HashSet;

use crate::error::{ApiError, ApiResult};

pub use addresses::filter_used;
pub use assets::{asset_info, AssetInfo};
pub use balance::{balance_sum, BalanceSum, TokenBalance};
pub use chain::{best_block, server_status, BestBlock, ServerStatus};
pub use transactions::{send_transaction, tx_bodies, tx_boxes, TxBoxes};
pub use utxo::{utxo_for_addresses, Utxo};

/// Enforce the per-request cap on a list field and drop repeated entries,
/// keeping first-seen order. The empty list is accepted.
pub fn checked_list(field: &str, items: Vec<String>, cap: usize) -> ApiResult<Vec<String>> {
    if items.len() > cap {
        return Err(ApiError::Validation(format!(
            "body.{field}: request length should be [0, {cap}]"
        )));
    }

    let mut seen = HashSet::new();
    Ok(items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect())
}

/// Decimal text of a JSON amount that may arrive as a number or a string.
pub(crate) fn decimal_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::String(s) => Some(s.clone()),
        _ => None,
    }
}
