use crate::domain::model::ErrorEnvelope;
use crate::utils::error::{Result, ShuffleError};
use axum::extract::rejection::BytesRejection;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use std::any::Any as PanicPayload;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Browsers call both services directly during development.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Envelope for a body that could not be read at all, keeping the
/// rejection's status (413 for an oversized body).
pub fn body_rejection_response(rejection: BytesRejection) -> Response {
    let status = rejection.status();
    let envelope = if status == StatusCode::PAYLOAD_TOO_LARGE {
        ErrorEnvelope::payload_too_large(BODY_LIMIT_BYTES)
    } else {
        ErrorEnvelope::invalid_request(rejection.body_text())
    };
    tracing::info!(status = status.as_u16(), "unreadable request body: {}", rejection.body_text());
    (status, Json(envelope)).into_response()
}

/// Turns a handler panic into a generic 500 envelope; the detail is logged.
pub fn handle_panic(payload: Box<dyn PanicPayload + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!("request handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorEnvelope::internal()),
    )
        .into_response()
}

/// Binds `addr` and serves `app` until Ctrl-C.
pub async fn serve(addr: SocketAddr, app: Router, name: &str) -> Result<()> {
    tracing::info!("binding {} addr={}", name, addr);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("🌐 {} listening on http://{}", name, listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| {
            tracing::error!("{} terminated unexpectedly addr={} error={}", name, addr, err);
            ShuffleError::Io(err)
        })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
