#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceExt;

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub async fn post_raw(router: &Router, path: &str, body: impl Into<Body>) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(body.into())
        .expect("request");
    send(router, request).await
}

pub async fn post_json(router: &Router, path: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    post_raw(router, path, serde_json::to_string(&body).expect("serialize body")).await
}

pub async fn get(router: &Router, path: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder().method("GET").uri(path).body(Body::empty()).expect("request");
    send(router, request).await
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body bytes");
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server");
    });
    format!("http://{}", addr)
}

pub fn group_sizes(body: &serde_json::Value) -> Vec<usize> {
    body["groups"]
        .as_array()
        .expect("groups array")
        .iter()
        .map(|g| g.as_array().expect("group array").len())
        .collect()
}

pub fn sorted_members(body: &serde_json::Value) -> Vec<String> {
    let mut members: Vec<String> = body["groups"]
        .as_array()
        .expect("groups array")
        .iter()
        .flat_map(|g| g.as_array().expect("group array").iter())
        .map(|m| m.as_str().expect("member string").to_string())
        .collect();
    members.sort();
    members
}
