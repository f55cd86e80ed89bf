//! In-chain transaction aggregation.
//!
//! # Steps
//! 1. Fetch every confirmed transaction of every address, concurrently
//! 2. Deduplicate by transaction id
//! 3. Keep heights inside the resolved window
//! 4. Sort by (height, ordinal); a tie aborts the request
//! 5. Cut everything up to and including the reference transaction
//! 6. Truncate to the limit
//!
//! Sorting happens before the cut so the cut position does not depend on the
//! order in which per-address listings arrived.

use futures_util::future::try_join_all;
use std::collections::HashSet;

use crate::explorer::types::ExplorerTransaction;
use crate::explorer::ExplorerClient;
use crate::history::types::{HeightWindow, HistoryError};

/// Confirmed history of `addresses` inside `window`, after `after_tx`, at most `limit` long.
pub async fn collect_confirmed(
    client: &ExplorerClient,
    addresses: &[String],
    window: HeightWindow,
    after_tx: Option<&str>,
    limit: usize,
) -> Result<Vec<ExplorerTransaction>, HistoryError> {
    let per_address = try_join_all(
        addresses
            .iter()
            .map(|address| client.fetch_address_transactions(address)),
    )
    .await?;

    select_confirmed(per_address.into_iter().flatten(), window, after_tx, limit)
}

/// Pure selection over already fetched transactions.
///
/// # Panics
/// If two distinct transactions share both height and ordinal. That cannot
/// happen on a consistent chain and means the explorer data is corrupt.
pub fn select_confirmed(
    txs: impl IntoIterator<Item = ExplorerTransaction>,
    window: HeightWindow,
    after_tx: Option<&str>,
    limit: usize,
) -> Result<Vec<ExplorerTransaction>, HistoryError> {
    let after_tx = after_tx.filter(|tx| !tx.is_empty());

    let mut seen = HashSet::new();
    let mut selected: Vec<ExplorerTransaction> = txs
        .into_iter()
        .filter(|tx| seen.insert(tx.id.clone()))
        .filter(|tx| window.contains(tx.inclusion_height, after_tx.is_some()))
        .collect();

    selected.sort_by_key(|tx| (tx.inclusion_height, tx.index));
    assert_strictly_ordered(&selected);

    if let Some(after_tx) = after_tx {
        let position = selected
            .iter()
            .position(|tx| tx.id == after_tx)
            .ok_or_else(|| HistoryError::ReferenceTxNotFound {
                tx: after_tx.to_string(),
                location: "in address history".to_string(),
            })?;
        selected.drain(..=position);
    }

    selected.truncate(limit);
    Ok(selected)
}

fn assert_strictly_ordered(sorted: &[ExplorerTransaction]) {
    for pair in sorted.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if (a.inclusion_height, a.index) == (b.inclusion_height, b.index) {
            tracing::error!(
                first = %a.id,
                second = %b.id,
                height = a.inclusion_height,
                ordinal = a.index,
                "Duplicate block position in confirmed set"
            );
            panic!(
                "transactions {} and {} share height {} and ordinal {}",
                a.id, b.id, a.inclusion_height, a.index
            );
        }
    }
}
