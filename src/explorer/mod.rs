//! Explorer integration subsystem.
//!
//! # Data Flow
//! ```text
//! ExplorerConfig (base URL, page size, timeouts)
//!     → client.rs (HTTP calls, pagination, status mapping)
//!     → types.rs (raw per-endpoint records, ExplorerError)
//! ```
//!
//! # Constraints
//! - No retries: any non-success status is surfaced immediately
//! - Every call is a GET except `send_transaction`
//! - Numbers are decoded losslessly (serde_json `arbitrary_precision`)

pub mod client;
pub mod types;

pub use client::ExplorerClient;
pub use types::{ExplorerError, ExplorerResult};
