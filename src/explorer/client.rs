//! Explorer REST client.
//!
//! # Responsibilities
//! - Build explorer URLs from the configured base
//! - Walk offset-paginated listings to completion
//! - Map non-success statuses to typed failures
//! - Provide a health probe for the status endpoint

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::config::ExplorerConfig;
use crate::explorer::types::{
    AddressSummary, BlockResponse, BlockSummary, ExplorerError, ExplorerResult,
    ExplorerTransaction, IssuingBox, Page, UnconfirmedTransaction,
};
use crate::observability::metrics;

/// Explorer client wrapper. Cheap to clone; the connection pool is shared.
#[derive(Clone)]
pub struct ExplorerClient {
    http: reqwest::Client,
    base_url: Url,
    page_size: usize,
    max_pages: usize,
}

impl ExplorerClient {
    /// Create a new explorer client.
    ///
    /// # Arguments
    /// * `config` - Explorer configuration
    ///
    /// # Returns
    /// A new client, or an error if the base URL or HTTP client is unusable
    pub fn new(config: ExplorerConfig) -> ExplorerResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ExplorerError::Url(format!("'{}': {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ExplorerError::Url(config.base_url));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        tracing::info!(
            base_url = %base_url,
            page_size = config.page_size,
            "Explorer client initialized"
        );

        Ok(Self {
            http,
            base_url,
            page_size: config.page_size.max(1),
            max_pages: config.max_pages.max(1),
        })
    }

    /// `{base}/api/v0/{segments...}`, each segment percent-encoded.
    fn url(&self, segments: &[&str]) -> ExplorerResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ExplorerError::Url(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "v0"])
            .extend(segments);
        Ok(url)
    }

    /// Send a request and decode a successful JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &'static str,
    ) -> ExplorerResult<T> {
        let result = self.send_json_inner(request).await;
        metrics::record_upstream(endpoint, result.is_ok());
        if let Err(e) = &result {
            tracing::warn!(endpoint, error = %e, "Explorer call failed");
        }
        result
    }

    async fn send_json_inner<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> ExplorerResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().clone();

        tracing::debug!(url = %url, status = %status, "Explorer responded");

        if status == StatusCode::NOT_FOUND {
            return Err(ExplorerError::NotFound(url.path().to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExplorerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }

    /// Fetch every page of an offset-paginated listing.
    ///
    /// Stops at the first page shorter than the page size. Fails with
    /// `PaginationLimit` rather than looping forever on a misbehaving upstream.
    async fn fetch_all_pages<T: DeserializeOwned>(
        &self,
        url: Url,
        endpoint: &'static str,
    ) -> ExplorerResult<Vec<T>> {
        let mut items = Vec::new();

        for page_index in 0..self.max_pages {
            let offset = page_index * self.page_size;
            let request = self
                .http
                .get(url.clone())
                .query(&[("limit", self.page_size), ("offset", offset)]);
            let page: Page<T> = self.send_json(request, endpoint).await?;

            let fetched = page.items.len();
            items.extend(page.items);
            if fetched < self.page_size {
                return Ok(items);
            }
        }

        Err(ExplorerError::PaginationLimit {
            max_pages: self.max_pages,
        })
    }

    /// All confirmed transactions touching an address.
    pub async fn fetch_address_transactions(
        &self,
        address: &str,
    ) -> ExplorerResult<Vec<ExplorerTransaction>> {
        let url = self.url(&["addresses", address, "transactions"])?;
        let txs = self.fetch_all_pages(url, "address_transactions").await?;
        tracing::debug!(address = %address, count = txs.len(), "Fetched confirmed transactions");
        Ok(txs)
    }

    /// Mempool transactions touching an address, at most `limit` of them.
    pub async fn fetch_unconfirmed(
        &self,
        address: &str,
        limit: usize,
    ) -> ExplorerResult<Vec<UnconfirmedTransaction>> {
        let url = self.url(&["transactions", "unconfirmed", "byAddress", address])?;
        let request = self.http.get(url).query(&[("limit", limit)]);
        let page: Page<UnconfirmedTransaction> =
            self.send_json(request, "unconfirmed_by_address").await?;
        Ok(page.items)
    }

    /// Block header and transaction list by block hash.
    pub async fn fetch_block(&self, hash: &str) -> ExplorerResult<BlockResponse> {
        let url = self.url(&["blocks", hash])?;
        self.send_json(self.http.get(url), "block").await
    }

    /// Most recent block of the main chain.
    pub async fn fetch_best_block(&self) -> ExplorerResult<BlockSummary> {
        let url = self.url(&["blocks"])?;
        let request = self.http.get(url).query(&[
            ("limit", "1"),
            ("sortBy", "height"),
            ("sortDirection", "desc"),
        ]);
        let page: Page<BlockSummary> = self.send_json(request, "blocks").await?;
        page.items
            .into_iter()
            .next()
            .ok_or_else(|| ExplorerError::NotFound("best block".to_string()))
    }

    /// The box that minted `asset_id`.
    pub async fn fetch_issuing_box(&self, asset_id: &str) -> ExplorerResult<IssuingBox> {
        let url = self.url(&["assets", asset_id, "issuingBox"])?;
        let boxes: Vec<IssuingBox> = self.send_json(self.http.get(url), "issuing_box").await?;
        boxes
            .into_iter()
            .next()
            .ok_or_else(|| ExplorerError::NotFound(format!("issuing box for {asset_id}")))
    }

    /// Balance summary of an address.
    pub async fn fetch_address_summary(&self, address: &str) -> ExplorerResult<AddressSummary> {
        let url = self.url(&["addresses", address])?;
        self.send_json(self.http.get(url), "address_summary").await
    }

    /// Full transaction body, kept verbatim.
    pub async fn fetch_transaction(&self, tx_hash: &str) -> ExplorerResult<Value> {
        let url = self.url(&["transactions", tx_hash])?;
        self.send_json(self.http.get(url), "transaction").await
    }

    /// Explorer info document.
    pub async fn fetch_info(&self) -> ExplorerResult<Value> {
        let url = self.url(&["info"])?;
        self.send_json(self.http.get(url), "info").await
    }

    /// Forward a signed transaction verbatim and return the explorer's reply.
    pub async fn send_transaction(&self, signed_tx: &Value) -> ExplorerResult<Value> {
        let url = self.url(&["transactions", "send"])?;
        self.send_json(self.http.post(url).json(signed_tx), "send_transaction")
            .await
    }

    /// Check if the explorer is reachable and healthy.
    pub async fn is_healthy(&self) -> bool {
        self.fetch_info().await.is_ok()
    }

    /// Items requested per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

impl std::fmt::Debug for ExplorerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplorerClient")
            .field("base_url", &self.base_url.as_str())
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}
