//! Pending (mempool) transaction aggregation.

use futures_util::future::try_join_all;
use std::collections::HashSet;

use crate::explorer::types::UnconfirmedTransaction;
use crate::explorer::{ExplorerClient, ExplorerResult};

/// Unconfirmed transactions touching any of `addresses`, oldest first.
///
/// `fetch_limit` bounds each per-address listing; the caller truncates the
/// merged result to whatever budget the confirmed part left.
pub async fn collect_pending(
    client: &ExplorerClient,
    addresses: &[String],
    fetch_limit: usize,
) -> ExplorerResult<Vec<UnconfirmedTransaction>> {
    let per_address = try_join_all(
        addresses
            .iter()
            .map(|address| client.fetch_unconfirmed(address, fetch_limit)),
    )
    .await?;

    Ok(order_pending(per_address.into_iter().flatten()))
}

/// Deduplicate by id and sort by arrival time, ties broken by id.
pub fn order_pending(
    txs: impl IntoIterator<Item = UnconfirmedTransaction>,
) -> Vec<UnconfirmedTransaction> {
    let mut seen = HashSet::new();
    let mut pending: Vec<_> = txs
        .into_iter()
        .filter(|tx| seen.insert(tx.id.clone()))
        .collect();

    pending.sort_by(|a, b| {
        a.creation_timestamp
            .cmp(&b.creation_timestamp)
            .then_with(|| a.id.cmp(&b.id))
    });
    pending
}
