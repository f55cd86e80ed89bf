//! Ergo wallet backend-for-frontend.
//!
//! Translates the explorer REST API into the contract wallets consume, with
//! transaction history reconstruction at its core.
//!
//! # Architecture Overview
//!
//! ```text
//!     Wallet Request
//!     ──────────────▶ http (router, middleware, handlers)
//!                        │
//!              ┌─────────┴──────────┐
//!              ▼                    ▼
//!           history              wallet
//!     (reference, confirmed,   (utxo, balance, assets,
//!      pending, assembler)      txs, chain)
//!              │                    │
//!              └─────────┬──────────┘
//!                        ▼
//!                    explorer ──────────▶ Explorer REST API
//!
//!     Cross-cutting: config, error, lifecycle, observability
//! ```

pub mod config;
pub mod error;
pub mod explorer;
pub mod history;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod wallet;

pub use config::BffConfig;
pub use error::{ApiError, ApiResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
