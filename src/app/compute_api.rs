use crate::app::http::{body_rejection_response, cors_layer, handle_panic, BODY_LIMIT_BYTES};
use crate::core::ShuffleService;
use crate::domain::model::{ErrorEnvelope, GroupingRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;

pub struct ComputeState {
    pub service: ShuffleService,
}

/// Router for the compute service: validation and partitioning behind
/// `POST /api/shuffle`.
pub fn build_router(service: ShuffleService) -> Router {
    let state = Arc::new(ComputeState { service });

    Router::new()
        .route("/", get(handle_root))
        .route("/api/shuffle", post(handle_shuffle))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer())
        .with_state(state)
}

async fn handle_root() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Shuffle Lunch API" }))
}

async fn handle_shuffle(
    State(state): State<Arc<ComputeState>>,
    payload: Result<Json<GroupingRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(JsonRejection::BytesRejection(rejection)) => return body_rejection_response(rejection),
        Err(rejection) => {
            tracing::debug!("undecodable shuffle request: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorEnvelope::invalid_request(rejection.body_text())),
            )
                .into_response();
        }
    };

    match state.service.shuffle(&request) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            tracing::info!("shuffle request rejected: {}", e);
            (StatusCode::BAD_REQUEST, Json(ErrorEnvelope::validation(e.to_string()))).into_response()
        }
    }
}
