//! Route handlers.
//!
//! Each handler validates its body, delegates to `history` or `wallet`, and
//! lets [`ApiError`] render failures.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{ApiError, ApiResult};
use crate::history::{HistoryEntry, HistoryRequest};
use crate::http::server::AppState;
use crate::wallet::{
    self, checked_list, AssetInfo, BalanceSum, BestBlock, ServerStatus, TxBoxes, Utxo,
};

#[derive(Debug, Deserialize)]
pub struct AddressesBody {
    pub addresses: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxHashesBody {
    pub tx_hashes: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetIdsBody {
    pub asset_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTxBody {
    pub signed_tx: Value,
}

impl AppState {
    fn addresses(&self, body: AddressesBody) -> ApiResult<Vec<String>> {
        checked_list("addresses", body.addresses, self.limits.address_request_limit)
    }
}

pub async fn utxo_for_addresses(
    State(state): State<AppState>,
    body: Result<Json<AddressesBody>, JsonRejection>,
) -> ApiResult<Json<Vec<Utxo>>> {
    let addresses = state.addresses(body?.0)?;
    Ok(Json(wallet::utxo_for_addresses(&state.explorer, &addresses).await?))
}

pub async fn utxo_sum_for_addresses(
    State(state): State<AppState>,
    body: Result<Json<AddressesBody>, JsonRejection>,
) -> ApiResult<Json<BalanceSum>> {
    let addresses = state.addresses(body?.0)?;
    Ok(Json(wallet::balance_sum(&state.explorer, &addresses).await?))
}

pub async fn filter_used(
    State(state): State<AppState>,
    body: Result<Json<AddressesBody>, JsonRejection>,
) -> ApiResult<Json<Vec<String>>> {
    let addresses = state.addresses(body?.0)?;
    Ok(Json(wallet::filter_used(&state.explorer, &addresses).await?))
}

pub async fn tx_bodies(
    State(state): State<AppState>,
    body: Result<Json<TxHashesBody>, JsonRejection>,
) -> ApiResult<Json<BTreeMap<String, Value>>> {
    let hashes = checked_list(
        "txHashes",
        body?.0.tx_hashes,
        state.limits.address_request_limit,
    )?;
    Ok(Json(wallet::tx_bodies(&state.explorer, &hashes).await?))
}

pub async fn tx_boxes(
    State(state): State<AppState>,
    body: Result<Json<TxHashesBody>, JsonRejection>,
) -> ApiResult<Json<BTreeMap<String, TxBoxes>>> {
    let hashes = checked_list(
        "txHashes",
        body?.0.tx_hashes,
        state.limits.address_request_limit,
    )?;
    Ok(Json(wallet::tx_boxes(&state.explorer, &hashes).await?))
}

pub async fn history(
    State(state): State<AppState>,
    body: Result<Json<HistoryRequest>, JsonRejection>,
) -> ApiResult<Json<Vec<HistoryEntry>>> {
    let Json(request) = body?;
    Ok(Json(state.history.assemble(request).await?))
}

pub async fn asset_info(
    State(state): State<AppState>,
    body: Result<Json<AssetIdsBody>, JsonRejection>,
) -> ApiResult<Json<BTreeMap<String, AssetInfo>>> {
    let ids = checked_list(
        "assetIds",
        body?.0.asset_ids,
        state.limits.address_request_limit,
    )?;
    Ok(Json(wallet::asset_info(&state.explorer, &ids).await?))
}

pub async fn best_block(State(state): State<AppState>) -> ApiResult<Json<BestBlock>> {
    Ok(Json(wallet::best_block(&state.explorer).await?))
}

pub async fn send_transaction(
    State(state): State<AppState>,
    body: Result<Json<SignedTxBody>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(SignedTxBody { signed_tx }) = body?;
    if signed_tx.is_null() {
        return Err(ApiError::Validation("body.signedTx must not be null".to_string()));
    }
    Ok(Json(wallet::send_transaction(&state.explorer, &signed_tx).await?))
}

pub async fn status(State(state): State<AppState>) -> Json<ServerStatus> {
    Json(wallet::server_status(&state.explorer).await)
}
