//! Used-address filter.

use futures_util::future::try_join_all;

use crate::error::ApiResult;
use crate::explorer::ExplorerClient;

/// The subset of `addresses` that ever received funds, in request order.
pub async fn filter_used(client: &ExplorerClient, addresses: &[String]) -> ApiResult<Vec<String>> {
    let summaries = try_join_all(
        addresses
            .iter()
            .map(|address| client.fetch_address_summary(address)),
    )
    .await?;

    Ok(addresses
        .iter()
        .zip(summaries)
        .filter(|(_, summary)| {
            summary
                .transactions
                .as_ref()
                .is_some_and(|txs| txs.has_received())
        })
        .map(|(address, _)| address.clone())
        .collect())
}
