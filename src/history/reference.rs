//! Reference point resolution.
//!
//! Turns the block hashes of a history request into heights, checking that an
//! `after` transaction really lives in the block it claims.

use crate::explorer::types::BlockResponse;
use crate::explorer::{ExplorerClient, ExplorerError};
use crate::history::types::{HistoryError, GENESIS_HEIGHT};

/// Resolve the height of `block_hash`, optionally verifying `tx_hash` is in it.
///
/// An absent block means "from genesis" and resolves to [`GENESIS_HEIGHT`]. An
/// absent or empty `tx_hash` skips the membership check.
pub async fn resolve_height(
    client: &ExplorerClient,
    block_hash: Option<&str>,
    tx_hash: Option<&str>,
) -> Result<i64, HistoryError> {
    let Some(block_hash) = block_hash else {
        return Ok(GENESIS_HEIGHT);
    };

    let block = client.fetch_block(block_hash).await.map_err(|e| match e {
        ExplorerError::NotFound(_) => HistoryError::ReferenceBlockMismatch(block_hash.to_string()),
        other => HistoryError::Upstream(other),
    })?;

    height_in_block(&block, block_hash, tx_hash)
}

/// Height of an already fetched block, checking `tx_hash` membership.
pub fn height_in_block(
    block: &BlockResponse,
    block_hash: &str,
    tx_hash: Option<&str>,
) -> Result<i64, HistoryError> {
    let height = block.block.header.height;

    match tx_hash.filter(|tx| !tx.is_empty()) {
        None => Ok(height),
        Some(tx) => {
            if block.block.block_transactions.iter().any(|t| t.id == tx) {
                Ok(height)
            } else {
                tracing::warn!(block = %block_hash, tx = %tx, "Reference transaction not in block");
                Err(HistoryError::ReferenceTxNotFound {
                    tx: tx.to_string(),
                    location: format!("in block {block_hash}"),
                })
            }
        }
    }
}
