//! Balance summation across addresses.
//!
//! Amounts are summed as `U256` so totals never round or wrap.

use alloy::primitives::U256;
use futures_util::future::try_join_all;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{ApiError, ApiResult};
use crate::explorer::types::AddressSummary;
use crate::explorer::ExplorerClient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSum {
    pub sum: String,
    pub tokens_balance: Vec<TokenBalance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub token_id: String,
    pub amount: String,
}

pub async fn balance_sum(client: &ExplorerClient, addresses: &[String]) -> ApiResult<BalanceSum> {
    let summaries = try_join_all(
        addresses
            .iter()
            .map(|address| client.fetch_address_summary(address)),
    )
    .await?;

    sum_summaries(&summaries)
}

/// Sum confirmed balances and per-token amounts. A missing balance counts as zero.
pub fn sum_summaries(summaries: &[AddressSummary]) -> ApiResult<BalanceSum> {
    let mut sum = U256::ZERO;
    let mut tokens: BTreeMap<&str, U256> = BTreeMap::new();

    for txs in summaries.iter().filter_map(|s| s.transactions.as_ref()) {
        if let Some(balance) = &txs.confirmed_balance {
            sum = checked_add(sum, &balance.to_string())?;
        }
        for token in &txs.confirmed_tokens_balance {
            let entry = tokens.entry(token.token_id.as_str()).or_default();
            *entry = checked_add(*entry, &token.amount.to_string())?;
        }
    }

    Ok(BalanceSum {
        sum: sum.to_string(),
        tokens_balance: tokens
            .into_iter()
            .map(|(token_id, amount)| TokenBalance {
                token_id: token_id.to_string(),
                amount: amount.to_string(),
            })
            .collect(),
    })
}

fn checked_add(acc: U256, amount: &str) -> ApiResult<U256> {
    let value = U256::from_str_radix(amount, 10).map_err(|_| {
        ApiError::UpstreamUnavailable(format!("explorer returned malformed amount '{amount}'"))
    })?;
    acc.checked_add(value)
        .ok_or_else(|| ApiError::UpstreamUnavailable("balance sum overflow".to_string()))
}
