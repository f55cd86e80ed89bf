//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all wallet routes
//! - Wire up middleware (request ID, tracing, limits, timeout, panic capture, metrics)
//! - Bind the router to a listener and serve until shutdown

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, MatchedPath, State},
    http::Request,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{BffConfig, LimitsConfig};
use crate::error::ApiError;
use crate::explorer::{ExplorerClient, ExplorerResult};
use crate::history::HistoryAssembler;
use crate::http::handlers;
use crate::http::request::{request_id_of, UuidRequestId, X_REQUEST_ID};
use crate::http::response::panic_response;
use crate::lifecycle::shutdown;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub explorer: ExplorerClient,
    pub history: HistoryAssembler,
    pub limits: LimitsConfig,
}

/// HTTP server for the wallet backend.
pub struct HttpServer {
    router: Router,
    config: BffConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: BffConfig) -> ExplorerResult<Self> {
        let explorer = ExplorerClient::new(config.explorer.clone())?;
        let state = AppState {
            history: HistoryAssembler::new(explorer.clone(), config.limits.clone()),
            explorer,
            limits: config.limits.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers run outermost-last: the request id is assigned before the trace
    /// span opens, panics are caught inside the deadline, and metrics see the
    /// deadline's 504. Oversized bodies are rejected by the JSON extractor.
    fn build_router(config: &BffConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/txs/utxoForAddresses", post(handlers::utxo_for_addresses))
            .route("/api/txs/utxoSumForAddresses", post(handlers::utxo_sum_for_addresses))
            .route("/api/v2/addresses/filterUsed", post(handlers::filter_used))
            .route("/api/txs/txBodies", post(handlers::tx_bodies))
            .route("/api/v2/txs/boxes", post(handlers::tx_boxes))
            .route("/api/v2/txs/history", post(handlers::history))
            .route("/api/assets/info", post(handlers::asset_info))
            .route("/api/v2/bestblock", get(handlers::best_block))
            .route("/api/txs/signed", post(handlers::send_transaction))
            .route("/api/status", get(handlers::status))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.limits.max_body_size))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(middleware::from_fn_with_state(
                Duration::from_secs(config.timeouts.request_secs),
                enforce_deadline,
            ))
            .layer(middleware::from_fn(track_metrics))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id_of(request),
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    /// The fully layered router, for serving elsewhere or driving in tests.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server until `shutdown_rx` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            explorer = %self.config.explorer.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &BffConfig {
        &self.config
    }
}

/// Outer deadline over the whole request, answered as a 504 error body.
async fn enforce_deadline(
    State(deadline): State<Duration>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match tokio::time::timeout(deadline, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(deadline_secs = deadline.as_secs(), "Request deadline exceeded");
            ApiError::Timeout(deadline.as_secs()).into_response()
        }
    }
}

async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    metrics::record_request(&route, response.status().as_u16(), start);
    response
}
