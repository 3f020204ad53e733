//! Request dispatcher: the single `/kv` route.
//!
//! Write-through on `POST`, cache-then-store fallthrough on `GET`,
//! invalidate-on-delete. See each handler for the exact source-of-truth
//! rules.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::store::Store;
use kv_cache::Cache;

/// Shared handles threaded into every handler. Constructed once in `main`
/// and passed in rather than reached for as global/singleton state.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<Cache>,
    pub store: Store,
}

#[derive(Deserialize)]
pub struct GetQuery {
    key: Option<String>,
}

fn plain_text(status: StatusCode, body: impl Into<String>) -> Response {
    (status, [("content-type", "text/plain")], body.into()).into_response()
}

/// `POST /kv` with JSON body `{"key": str, "value": str}`.
pub async fn post_kv(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = body else {
        return ApiError::BadRequest("body must be valid JSON".into()).into_response();
    };
    let key = body.get("key").and_then(Value::as_str);
    let value = body.get("value").and_then(Value::as_str);
    let (key, value) = match (key, value) {
        (Some(k), Some(v)) => (k, v),
        _ => {
            return ApiError::BadRequest("expected {\"key\": str, \"value\": str}".into())
                .into_response()
        }
    };

    if let Err(err) = state.store.put(key, value).await {
        return err.into_response();
    }

    if let Err(err) = state.cache.put(key.to_string(), value.to_string()) {
        tracing::warn!(%key, error = %err, "cache write-through failed, ignoring");
    }

    plain_text(StatusCode::OK, "OK\n")
}

/// `GET /kv?key=...`. Cache-first, falling through to the store on miss.
pub async fn get_kv(State(state): State<AppState>, Query(q): Query<GetQuery>) -> Response {
    let Some(key) = q.key else {
        return ApiError::BadRequest("missing query parameter `key`".into()).into_response();
    };

    if let Some(value) = state.cache.get(&key) {
        return (
            StatusCode::OK,
            [("content-type", "text/plain"), ("X-Source", "CACHE")],
            format!("CACHE:{value}\n"),
        )
            .into_response();
    }

    match state.store.get(&key).await {
        Ok(Some(value)) => {
            if let Err(err) = state.cache.put(key.clone(), value.clone()) {
                tracing::warn!(%key, error = %err, "cache fill failed, ignoring");
            }
            (
                StatusCode::OK,
                [("content-type", "text/plain"), ("X-Source", "DB")],
                format!("DB:{value}\n"),
            )
                .into_response()
        }
        Ok(None) => ApiError::NotFound.into_response(),
        Err(err) => err.into_response(),
    }
}

/// `DELETE /kv?key=...`. Deletes from the store, then invalidates the cache.
pub async fn delete_kv(State(state): State<AppState>, Query(q): Query<GetQuery>) -> Response {
    let Some(key) = q.key else {
        return ApiError::BadRequest("missing query parameter `key`".into()).into_response();
    };

    match state.store.delete(&key).await {
        Ok(true) => {
            state.cache.delete(&key);
            plain_text(StatusCode::OK, "Deleted\n")
        }
        Ok(false) => ApiError::NotFound.into_response(),
        Err(err) => err.into_response(),
    }
}
