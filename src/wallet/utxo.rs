//! Unspent output listing.

use futures_util::future::try_join_all;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiResult;
use crate::explorer::types::ExplorerTransaction;
use crate::explorer::{ExplorerClient, ExplorerError};
use crate::wallet::decimal_text;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Utxo {
    pub tx_hash: String,
    pub tx_index: u64,
    pub utxo_id: String,
    pub receiver: String,
    pub amount: String,
}

/// Unspent main-chain outputs owned by each address, grouped by address in
/// request order.
pub async fn utxo_for_addresses(
    client: &ExplorerClient,
    addresses: &[String],
) -> ApiResult<Vec<Utxo>> {
    let per_address = try_join_all(addresses.iter().map(|address| async move {
        let txs = client.fetch_address_transactions(address).await?;
        Ok::<_, ExplorerError>(unspent_outputs(address, &txs))
    }))
    .await?;

    Ok(per_address.into_iter().flatten().collect())
}

/// Outputs of `txs` paying `address` that are unspent and on the main chain.
pub fn unspent_outputs(address: &str, txs: &[ExplorerTransaction]) -> Vec<Utxo> {
    txs.iter()
        .flat_map(|tx| tx.outputs.iter().enumerate())
        .filter(|(_, output)| is_unspent_for(address, output))
        .filter_map(|(position, output)| {
            let tx_hash = output.get("id")?.as_str()?.to_string();
            let Some(amount) = output.get("value").and_then(decimal_text) else {
                tracing::warn!(box_id = %tx_hash, "Output without a value skipped");
                return None;
            };
            let tx_index = output
                .get("index")
                .and_then(Value::as_u64)
                .unwrap_or(position as u64);

            Some(Utxo {
                utxo_id: format!("{tx_hash}{tx_index}"),
                tx_hash,
                tx_index,
                receiver: address.to_string(),
                amount,
            })
        })
        .collect()
}

fn is_unspent_for(address: &str, output: &Value) -> bool {
    let owned = output.get("address").and_then(Value::as_str) == Some(address);
    let unspent = output.get("spentTransactionId").map_or(true, Value::is_null);
    let main_chain = output.get("mainChain").and_then(Value::as_bool) != Some(false);
    owned && unspent && main_chain
}
