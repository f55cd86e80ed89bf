//! History assembly: validation, resolution, aggregation and projection.

use futures_util::future::join;
use std::collections::HashSet;

use crate::config::LimitsConfig;
use crate::explorer::ExplorerClient;
use crate::history::confirmed::collect_confirmed;
use crate::history::pending::collect_pending;
use crate::history::reference::resolve_height;
use crate::history::types::{HeightWindow, HistoryEntry, HistoryError, HistoryRequest};

/// Builds history responses for wallets.
#[derive(Clone, Debug)]
pub struct HistoryAssembler {
    client: ExplorerClient,
    limits: LimitsConfig,
}

impl HistoryAssembler {
    pub fn new(client: ExplorerClient, limits: LimitsConfig) -> Self {
        Self { client, limits }
    }

    /// Check a request before any explorer call. Returns the effective limit.
    pub fn validate(&self, request: &HistoryRequest) -> Result<usize, HistoryError> {
        let cap = self.limits.address_request_limit;
        if request.addresses.is_empty() || request.addresses.len() > cap {
            return Err(HistoryError::Validation(format!(
                "body.addresses: Addresses request length should be (0, {cap}]"
            )));
        }
        if request.until_block.is_empty() {
            return Err(HistoryError::Validation(
                "body.untilBlock must not be empty".to_string(),
            ));
        }
        if let Some(after) = &request.after {
            if after.block.is_empty() {
                return Err(HistoryError::Validation(
                    "body.after.block must not be empty".to_string(),
                ));
            }
        }

        let max = self.limits.response_limit;
        match request.limit {
            None => Ok(max),
            Some(0) => Err(HistoryError::Validation(
                "body.limit must be positive".to_string(),
            )),
            Some(limit) if limit > max => Err(HistoryError::Validation(format!(
                "body.limit parameter exceeds api limit: {max}"
            ))),
            Some(limit) => Ok(limit),
        }
    }

    /// Confirmed entries in chain order, then pending entries in arrival order.
    pub async fn assemble(&self, request: HistoryRequest) -> Result<Vec<HistoryEntry>, HistoryError> {
        let limit = self.validate(&request)?;

        let after_block = request.after.as_ref().map(|a| a.block.as_str());
        let after_tx = request.after.as_ref().map(|a| a.tx.as_str());

        // Independent lookups; errors are checked in a fixed order so the
        // reported failure does not depend on which call finished first.
        let (after, until) = join(
            resolve_height(&self.client, after_block, after_tx),
            resolve_height(&self.client, Some(request.until_block.as_str()), None),
        )
        .await;
        let window = HeightWindow {
            after: after?,
            until: until?,
        };

        let confirmed =
            collect_confirmed(&self.client, &request.addresses, window, after_tx, limit).await?;

        let mut entries: Vec<HistoryEntry> = confirmed
            .into_iter()
            .map(|tx| HistoryEntry::confirmed(tx, request.concise))
            .collect();
        let confirmed_count = entries.len();

        if confirmed_count < limit {
            // The mempool index can lag block inclusion; confirmed wins.
            let confirmed_ids: HashSet<String> =
                entries.iter().map(|entry| entry.hash.clone()).collect();
            let pending = collect_pending(&self.client, &request.addresses, limit).await?;
            entries.extend(
                pending
                    .into_iter()
                    .filter(|tx| !confirmed_ids.contains(&tx.id))
                    .take(limit - confirmed_count)
                    .map(|tx| HistoryEntry::pending(tx, request.concise)),
            );
        }

        tracing::info!(
            addresses = request.addresses.len(),
            after_height = window.after,
            until_height = window.until,
            confirmed = confirmed_count,
            pending = entries.len() - confirmed_count,
            "History assembled"
        );

        Ok(entries)
    }
}
