use crate::app::http::{body_rejection_response, cors_layer, handle_panic, BODY_LIMIT_BYTES};
use crate::app::proxy::ForwardingProxy;
use crate::app::restaurants;
use crate::domain::ports::RestaurantSource;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;

pub struct EdgeState {
    pub proxy: ForwardingProxy,
}

/// Router for the client-facing edge. Restaurant routes are mounted only
/// when a source is configured.
pub fn build_router(
    proxy: ForwardingProxy,
    restaurant_source: Option<Arc<dyn RestaurantSource>>,
) -> Router {
    let state = Arc::new(EdgeState { proxy });

    let mut router = Router::new()
        .route("/", get(handle_root))
        .route("/api/shuffle", post(handle_shuffle))
        .with_state(state);

    if let Some(source) = restaurant_source {
        router = router.merge(restaurants::routes(source));
    }

    router
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer())
}

async fn handle_root() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "shuffle-edge"
    }))
}

async fn handle_shuffle(
    State(state): State<Arc<EdgeState>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match body {
        Ok(body) => state.proxy.handle(body.to_vec()).await.into_response(),
        Err(rejection) => body_rejection_response(rejection),
    }
}
