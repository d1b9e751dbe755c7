//! Cache Node
//!
//! HTTP cache backend: an addressable in-memory store exposing get and
//! put. Any number of nodes run side by side; the router decides which one
//! owns a key, so a node never inspects anything beyond its own store.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/keys/{key}` | Read one entry |
//! | `GET` | `/keys` | List all entries |
//! | `PUT` | `/keys/{key}/{value}` | Write one entry |

mod store;

pub use store::Store;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Serialize;
use tracing::debug;

/// One key/value entry on the wire.
#[derive(Debug, Serialize)]
pub struct Resource {
    pub key: String,
    pub value: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Creates the cache node HTTP app over the given store.
pub fn app(store: Store) -> Router {
    Router::new()
        .route("/keys", get(list_keys))
        .route("/keys/{key}", get(get_key))
        .route("/keys/{key}/{value}", put(put_key))
        .with_state(store)
}

/// `GET /keys/{key}` — read one entry.
async fn get_key(State(store): State<Store>, Path(key): Path<String>) -> impl IntoResponse {
    match store.get(&key) {
        Some(value) => (StatusCode::OK, Json(Resource { key, value })).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("key {key} not found"),
            }),
        )
            .into_response(),
    }
}

/// `PUT /keys/{key}/{value}` — write one entry.
async fn put_key(
    State(store): State<Store>,
    Path((key, value)): Path<(String, String)>,
) -> impl IntoResponse {
    debug!(%key, "storing value");
    store.set(key.clone(), value.clone());
    (StatusCode::CREATED, Json(Resource { key, value }))
}

/// `GET /keys` — list all entries.
async fn list_keys(State(store): State<Store>) -> impl IntoResponse {
    let entries: Vec<Resource> = store
        .entries()
        .into_iter()
        .map(|(key, value)| Resource { key, value })
        .collect();
    Json(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let app = app(Store::new());

        let req = Request::builder()
            .method("PUT")
            .uri("/keys/42/hello")
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = Request::builder()
            .uri("/keys/42")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let entry = body_json(resp).await;
        assert_eq!(entry["key"], "42");
        assert_eq!(entry["value"], "hello");
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let app = app(Store::new());

        let req = Request::builder()
            .uri("/keys/nope")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = Store::new();
        let app = app(store.clone());

        for value in ["first", "second"] {
            let req = Request::builder()
                .method("PUT")
                .uri(format!("/keys/k/{value}"))
                .body(Body::empty())
                .unwrap();
            let resp = app.clone().oneshot(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        assert_eq!(store.get("k"), Some("second".to_string()));
    }

    #[tokio::test]
    async fn test_list_keys() {
        let store = Store::new();
        store.set("a".to_string(), "1".to_string());
        store.set("b".to_string(), "2".to_string());
        let app = app(store);

        let req = Request::builder().uri("/keys").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let entries = body_json(resp).await;
        assert_eq!(entries.as_array().unwrap().len(), 2);
    }
}
