use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use core::num::NonZeroUsize;
use kv_server::{build_router, store::Store};
use tower::ServiceExt;

/// A fresh SQLite file path backed by a leaked tempdir; tests are
/// short-lived processes so this is not a real leak in practice.
fn new_db_path() -> String {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db").to_str().unwrap().to_string();
    std::mem::forget(dir);
    db_path
}

async fn router() -> axum::Router {
    router_over(&new_db_path()).await
}

/// Builds a router with its own fresh cache over an existing store file.
/// Calling this twice against the same `db_path` simulates a server
/// restart: the store keeps its rows, but the second router's cache
/// starts empty.
async fn router_over(db_path: &str) -> axum::Router {
    let store = Store::connect(db_path).await.unwrap();
    build_router(NonZeroUsize::new(16).unwrap(), store)
}

fn request(method: Method, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn put_then_get_hits_cache() {
    let app = router().await;

    let resp = app
        .clone()
        .oneshot(request(
            Method::POST,
            "/kv",
            Some(serde_json::json!({"key": "a", "value": "1"})),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(request(Method::GET, "/kv?key=a", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("X-Source").unwrap(), "CACHE");
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"CACHE:1\n");
}

#[tokio::test]
async fn put_then_get_on_missing_key_is_not_found() {
    let app = router().await;

    app.clone()
        .oneshot(request(
            Method::POST,
            "/kv",
            Some(serde_json::json!({"key": "a", "value": "1"})),
        ))
        .await
        .unwrap();

    let resp = app
        .oneshot(request(Method::GET, "/kv?key=missing", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_miss_in_fresh_cache_falls_through_to_store() {
    let db_path = new_db_path();

    // First router POSTs "a", write-through populating both the store and
    // its own cache.
    let first = router_over(&db_path).await;
    first
        .oneshot(request(
            Method::POST,
            "/kv",
            Some(serde_json::json!({"key": "a", "value": "1"})),
        ))
        .await
        .unwrap();

    // A second router over the same store starts with an empty cache —
    // this is what a server restart looks like: the store kept the row,
    // the cache did not.
    let second = router_over(&db_path).await;
    let resp = second
        .clone()
        .oneshot(request(Method::GET, "/kv?key=a", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("X-Source").unwrap(), "DB");
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"DB:1\n");

    // The store-hit filled the second router's cache, so the immediate
    // re-GET now hits it.
    let resp = second
        .oneshot(request(Method::GET, "/kv?key=a", None))
        .await
        .unwrap();
    assert_eq!(resp.headers().get("X-Source").unwrap(), "CACHE");
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let app = router().await;

    app.clone()
        .oneshot(request(
            Method::POST,
            "/kv",
            Some(serde_json::json!({"key": "a", "value": "1"})),
        ))
        .await
        .unwrap();

    let resp = app
        .clone()
        .oneshot(request(Method::DELETE, "/kv?key=a", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"Deleted\n");

    let resp = app
        .oneshot(request(Method::GET, "/kv?key=a", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_key_query_param_is_bad_request_and_wrong_method_is_not_allowed() {
    let app = router().await;

    let resp = app
        .clone()
        .oneshot(request(Method::GET, "/kv", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app
        .oneshot(request(Method::PUT, "/kv", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn post_missing_value_field_is_bad_request() {
    let app = router().await;

    let resp = app
        .oneshot(request(
            Method::POST,
            "/kv",
            Some(serde_json::json!({"key": "a"})),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
