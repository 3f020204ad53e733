//! Cache-fronted key-value HTTP server.
//!
//! Wires [`kv_cache::Cache`] and the SQLite-backed [`store::Store`]
//! together behind a single `/kv` route. See [`dispatcher`] for the
//! routing contract.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod store;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use kv_cache::{config::CacheConfig, Cache};

use dispatcher::AppState;

/// Builds the application router given an already-connected [`store::Store`]
/// and cache capacity. Split out from `main` so integration tests can drive
/// the router directly via `tower::ServiceExt::oneshot`.
pub fn build_router(cache_capacity: core::num::NonZeroUsize, store: store::Store) -> Router {
    let state = AppState {
        cache: Arc::new(Cache::new(CacheConfig { capacity: cache_capacity })),
        store,
    };

    Router::new()
        .route(
            "/kv",
            get(dispatcher::get_kv)
                .post(dispatcher::post_kv)
                .delete(dispatcher::delete_kv),
        )
        .with_state(state)
}
