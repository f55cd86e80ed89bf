//! Service error taxonomy.
//!
//! Every failure a handler can produce maps to exactly one variant, which in
//! turn fixes the HTTP status and the machine-readable code sent to wallets
//! (see `http::response`).

use axum::http::StatusCode;
use thiserror::Error;

use crate::explorer::ExplorerError;
use crate::history::HistoryError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request fields.
    #[error("{0}")]
    Validation(String),

    /// A history reference transaction cannot be found.
    #[error("{0}")]
    ReferenceTxNotFound(String),

    /// A history reference block hash does not resolve.
    #[error("{0}")]
    ReferenceBlockMismatch(String),

    /// A looked-up asset or transaction does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The explorer refused a submitted transaction.
    #[error("explorer rejected the request ({status}): {body}")]
    UpstreamRejected { status: u16, body: String },

    /// Network failure or non-success answer from the explorer.
    #[error("explorer unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The request body exceeds the configured size limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// The request did not finish within the configured deadline.
    #[error("request did not complete within {0}s")]
    Timeout(u64),

    /// Explorer data violates a chain invariant.
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "ValidationError",
            ApiError::ReferenceTxNotFound(_) => "ReferenceTxNotFound",
            ApiError::ReferenceBlockMismatch(_) => "ReferenceBlockMismatch",
            ApiError::NotFound(_) => "NotFound",
            ApiError::UpstreamRejected { .. } => "UpstreamRejected",
            ApiError::UpstreamUnavailable(_) => "UpstreamUnavailable",
            ApiError::PayloadTooLarge(_) => "PayloadTooLarge",
            ApiError::Timeout(_) => "Timeout",
            ApiError::InternalInconsistency(_) => "InternalInconsistency",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::UpstreamRejected { .. } => StatusCode::BAD_REQUEST,
            ApiError::ReferenceTxNotFound(_)
            | ApiError::ReferenceBlockMismatch(_)
            | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::InternalInconsistency(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ExplorerError> for ApiError {
    fn from(err: ExplorerError) -> Self {
        match err {
            ExplorerError::NotFound(what) => ApiError::NotFound(format!("{what} not found")),
            other => ApiError::UpstreamUnavailable(other.to_string()),
        }
    }
}

impl From<HistoryError> for ApiError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::Validation(msg) => ApiError::Validation(msg),
            e @ HistoryError::ReferenceBlockMismatch(_) => {
                ApiError::ReferenceBlockMismatch(e.to_string())
            }
            e @ HistoryError::ReferenceTxNotFound { .. } => {
                ApiError::ReferenceTxNotFound(e.to_string())
            }
            // A 404 while walking listings is an explorer fault, not a bad reference.
            HistoryError::Upstream(e) => ApiError::UpstreamUnavailable(e.to_string()),
        }
    }
}
