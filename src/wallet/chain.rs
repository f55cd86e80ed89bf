//! Chain tip and service status.

use serde::Serialize;

use crate::error::ApiResult;
use crate::explorer::ExplorerClient;

/// Tip of the main chain. Epoch and slot have no meaning on this chain and
/// are always zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestBlock {
    pub epoch: u64,
    pub slot: u64,
    pub hash: String,
    pub height: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    pub is_server_ok: bool,
}

pub async fn best_block(client: &ExplorerClient) -> ApiResult<BestBlock> {
    let tip = client.fetch_best_block().await?;
    Ok(BestBlock {
        epoch: 0,
        slot: 0,
        hash: tip.id,
        height: tip.height,
    })
}

/// Never fails: an unreachable explorer is reported as `isServerOk: false`.
pub async fn server_status(client: &ExplorerClient) -> ServerStatus {
    let is_server_ok = client.is_healthy().await;
    if !is_server_ok {
        tracing::warn!("Explorer health probe failed");
    }
    ServerStatus { is_server_ok }
}
