//! Router Module
//!
//! HTTP front door for the cache cluster. Every data request resolves its
//! key through the consistent-hash ring, then forwards to the node that
//! owns it and relays the node's response verbatim. The router holds the
//! only copy of backend addressing; ring membership is seeded from the
//! configured backends.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/keys/{key}` | Resolve owner, forward read |
//! | `PUT` | `/keys/{key}/{value}` | Resolve owner, forward write |
//! | `GET` | `/cluster/members` | Current ring membership |
//! | `GET` | `/cluster/resolve/{key}` | Owner for a key, no dispatch |
//! | `GET` | `/cluster/stats` | Routing metrics snapshot |

mod backends;
mod client;
mod config;

pub use backends::BackendMap;
pub use client::{BackendClient, Upstream};
pub use config::RouterConfig;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::metrics::Metrics;
use crate::ring::{Ring, RingError};

/// Routing failures surfaced to clients.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error(transparent)]
    Ring(#[from] RingError),

    /// The ring resolved a node the backend map does not know.
    #[error("no backend address configured for node {0}")]
    UnknownBackend(String),

    #[error("backend request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl RouterError {
    fn status(&self) -> StatusCode {
        match self {
            RouterError::Ring(_) => StatusCode::SERVICE_UNAVAILABLE,
            RouterError::UnknownBackend(_) | RouterError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Shared router state: the ring, backend addressing, dispatch client and
/// metrics. Cloned per request; every clone addresses the same ring.
#[derive(Clone)]
pub struct RouterState {
    pub ring: Ring,
    pub backends: Arc<BackendMap>,
    pub client: BackendClient,
    pub metrics: Arc<Metrics>,
}

impl RouterState {
    /// Build router state from configuration. The ring is seeded with the
    /// configured backend identities.
    pub fn from_config(config: &RouterConfig) -> Self {
        let ring = Ring::new(config.replicas);
        let ids: Vec<String> = config.backends.iter().map(|(node, _)| node.clone()).collect();
        ring.set(&ids);

        Self {
            ring,
            backends: Arc::new(BackendMap::from_pairs(config.backends.iter().cloned())),
            client: BackendClient::new(Duration::from_secs(config.dispatch_timeout_secs)),
            metrics: Arc::new(Metrics::new()),
        }
    }
}

/// Creates the router HTTP app.
pub fn app(state: RouterState) -> Router {
    Router::new()
        .route("/keys/{key}", get(get_key))
        .route("/keys/{key}/{value}", put(put_key))
        .route("/cluster/members", get(cluster_members))
        .route("/cluster/resolve/{key}", get(cluster_resolve))
        .route("/cluster/stats", get(cluster_stats))
        .with_state(state)
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, msg: impl Into<String>) -> impl IntoResponse {
    (status, Json(ErrorResponse { error: msg.into() }))
}

/// Relay an upstream node response verbatim.
fn relay(upstream: Upstream) -> Response {
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        upstream.body,
    )
        .into_response()
}

/// Resolve the owning node for `key`, recording lookup metrics.
fn resolve_owner(state: &RouterState, key: &str) -> Result<String, RouterError> {
    state.metrics.record_lookup();
    let node = state.ring.get(key).map_err(|e| {
        state.metrics.record_failed_lookup();
        e
    })?;
    debug!(%key, %node, "resolved owner");
    Ok(node)
}

async fn route_get(state: &RouterState, key: &str) -> Result<Upstream, RouterError> {
    let started = Instant::now();
    let node = resolve_owner(state, key)?;
    let base = state
        .backends
        .url_for(&node)
        .ok_or_else(|| RouterError::UnknownBackend(node.clone()))?;

    let upstream = state.client.get(base, key).await?;
    state.metrics.record_dispatch(&node, started.elapsed());
    Ok(upstream)
}

async fn route_put(state: &RouterState, key: &str, value: &str) -> Result<Upstream, RouterError> {
    let started = Instant::now();
    let node = resolve_owner(state, key)?;
    let base = state
        .backends
        .url_for(&node)
        .ok_or_else(|| RouterError::UnknownBackend(node.clone()))?;

    let upstream = state.client.put(base, key, value).await?;
    state.metrics.record_dispatch(&node, started.elapsed());
    Ok(upstream)
}

/// `GET /keys/{key}` — resolve and forward a read.
async fn get_key(State(state): State<RouterState>, Path(key): Path<String>) -> Response {
    match route_get(&state, &key).await {
        Ok(upstream) => relay(upstream),
        Err(e) => {
            warn!(%key, error = %e, "read dispatch failed");
            error_response(e.status(), e.to_string()).into_response()
        }
    }
}

/// `PUT /keys/{key}/{value}` — resolve and forward a write.
async fn put_key(
    State(state): State<RouterState>,
    Path((key, value)): Path<(String, String)>,
) -> Response {
    match route_put(&state, &key, &value).await {
        Ok(upstream) => relay(upstream),
        Err(e) => {
            warn!(%key, error = %e, "write dispatch failed");
            error_response(e.status(), e.to_string()).into_response()
        }
    }
}

/// Membership response body.
#[derive(Debug, Serialize)]
struct MembersResponse {
    members: Vec<String>,
}

/// `GET /cluster/members` — current ring membership.
async fn cluster_members(State(state): State<RouterState>) -> impl IntoResponse {
    let mut members = state.ring.members();
    members.sort();
    Json(MembersResponse { members })
}

/// Resolution response body.
#[derive(Debug, Serialize)]
struct ResolveResponse {
    key: String,
    node: String,
}

/// `GET /cluster/resolve/{key}` — owner for a key without dispatching.
async fn cluster_resolve(State(state): State<RouterState>, Path(key): Path<String>) -> Response {
    match state.ring.get(&key) {
        Ok(node) => Json(ResolveResponse { key, node }).into_response(),
        Err(e) => error_response(StatusCode::SERVICE_UNAVAILABLE, e.to_string()).into_response(),
    }
}

/// Routing metrics snapshot.
#[derive(Debug, Serialize)]
struct StatsResponse {
    total_lookups: u64,
    failed_lookups: u64,
    dispatches_by_node: HashMap<String, u64>,
    latency: LatencySummary,
}

#[derive(Debug, Serialize)]
struct LatencySummary {
    avg_us: f64,
    min_us: u64,
    max_us: u64,
}

/// `GET /cluster/stats` — routing metrics snapshot.
async fn cluster_stats(State(state): State<RouterState>) -> impl IntoResponse {
    let m = &state.metrics;
    Json(StatsResponse {
        total_lookups: m.total_lookups(),
        failed_lookups: m.failed_lookups(),
        dispatches_by_node: m.dispatches_by_node(),
        latency: LatencySummary {
            avg_us: m.avg_latency_us(),
            min_us: m.min_latency_us(),
            max_us: m.max_latency_us(),
        },
    })
}
